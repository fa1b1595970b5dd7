//! Core data types for the floor-map tool.
//!
//! This module defines the shared item list ([`FloorMap`]) and the records it holds:
//! placed items, their shape variant and the display data each tool node edits.

use crate::constants::{NODE_HEIGHT, NODE_WIDTH};
use crate::error::FloorMapError;
use crate::sync::{merge_node_data, NodeDisplayState};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for floor-map items.
pub type ItemId = Uuid;

/// Width and height of a node, in world units.
///
/// Values are not clamped: shrinking past zero yields negative dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Size {
    /// Creates a size from its two dimensions.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(NODE_WIDTH, NODE_HEIGHT)
    }
}

/// The shape variants a tool node can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    /// Square filling the node box
    #[default]
    Square,
    /// Ellipse inscribed in the node box
    Circle,
    /// Upper half of the inscribed ellipse
    HalfCircle,
    /// L-shaped outline
    #[serde(rename = "lshape")]
    LShape,
    /// Rectangle filling the node box
    Rectangle,
    /// Isosceles triangle pointing up
    Triangle,
}

impl ShapeKind {
    /// Every variant, in toolbar order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::HalfCircle,
        ShapeKind::LShape,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
    ];

    /// Human-friendly name shown in menus and the properties panel.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::HalfCircle => "Half circle",
            ShapeKind::LShape => "L-shape",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
        }
    }

    /// Default size for a freshly placed item of this variant.
    pub fn default_size(self) -> Size {
        match self {
            ShapeKind::Rectangle => Size::new(NODE_WIDTH * 2.0, NODE_HEIGHT),
            ShapeKind::HalfCircle => Size::new(NODE_WIDTH, NODE_HEIGHT / 2.0),
            _ => Size::default(),
        }
    }
}

/// How a tool node presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// Controls shown on selection, label editable
    #[default]
    Normal,
    /// No controls, label not editable
    ReadOnly,
}

/// Display data of an item, the part a tool node edits.
///
/// Fields other than rotation, size and label are carried in `extra` and
/// are preserved by every commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Rotation in degrees, clockwise
    #[serde(default)]
    pub rotate_angle: f32,
    /// Node dimensions
    #[serde(default)]
    pub size: Size,
    /// Text label shown under the shape
    #[serde(default)]
    pub label: String,
    /// Any other fields the host attached to the item
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            rotate_angle: 0.0,
            size: Size::default(),
            label: String::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A single placed node on the floor map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this item
    pub id: ItemId,
    /// Shape variant to render
    #[serde(rename = "type", default)]
    pub shape: ShapeKind,
    /// Center of the node on the canvas as (x, y) world coordinates
    #[serde(default)]
    pub position: (f32, f32),
    /// Display data edited by the item's tool node
    #[serde(default)]
    pub data: NodeData,
}

impl Item {
    /// Creates a new item of the given shape with default data for that shape.
    pub fn new(shape: ShapeKind, position: (f32, f32)) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
            position,
            data: NodeData {
                size: shape.default_size(),
                ..NodeData::default()
            },
        }
    }

    /// Replaces the item's data, builder style.
    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    /// Creates a square item.
    pub fn square(position: (f32, f32)) -> Self {
        Self::new(ShapeKind::Square, position)
    }

    /// Creates a circle item.
    pub fn circle(position: (f32, f32)) -> Self {
        Self::new(ShapeKind::Circle, position)
    }

    /// Creates a half-circle item.
    pub fn half_circle(position: (f32, f32)) -> Self {
        Self::new(ShapeKind::HalfCircle, position)
    }

    /// Creates an L-shape item.
    pub fn lshape(position: (f32, f32)) -> Self {
        Self::new(ShapeKind::LShape, position)
    }

    /// Creates a rectangle item.
    pub fn rectangle(position: (f32, f32)) -> Self {
        Self::new(ShapeKind::Rectangle, position)
    }

    /// Creates a triangle item.
    pub fn triangle(position: (f32, f32)) -> Self {
        Self::new(ShapeKind::Triangle, position)
    }
}

/// The shared list of floor-map items.
///
/// Holds at most one item per id. Tool nodes only write to it through
/// [`FloorMap::commit_node_data`], which swaps in a fresh list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorMap {
    items: Vec<Item>,
}

impl FloorMap {
    /// Creates an empty floor map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a floor map from a list of items, rejecting duplicate ids.
    pub fn from_items(items: Vec<Item>) -> Result<Self, FloorMapError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(FloorMapError::DuplicateItemId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Decodes a floor map from its JSON item list.
    pub fn from_json(json: &str) -> Result<Self, FloorMapError> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Encodes the item list as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.items)
    }

    /// Adds an item and returns its id.
    pub fn add_item(&mut self, item: Item) -> Result<ItemId, FloorMapError> {
        if self.contains(item.id) {
            return Err(FloorMapError::DuplicateItemId(item.id));
        }
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Removes an item, returning it if it was present.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Looks up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an item with this id exists.
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// All items in list order (later items draw on top).
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the floor map has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Moves an item to a new canvas position. Returns false if the id is unknown.
    pub fn move_item(&mut self, id: ItemId, position: (f32, f32)) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.position = position;
                true
            }
            None => false,
        }
    }

    /// Merges a node's local display state into its item.
    ///
    /// Returns false, leaving the list untouched, when no item has this id.
    pub fn commit_node_data(&mut self, id: ItemId, state: &NodeDisplayState) -> bool {
        match merge_node_data(&self.items, id, state) {
            Some(updated) => {
                self.items = updated;
                log::debug!(
                    "committed node {id}: angle={} size={}x{} label={:?}",
                    state.rotate_angle,
                    state.size.width,
                    state.size.height,
                    state.label
                );
                true
            }
            None => {
                log::debug!("commit for unknown node {id} ignored");
                false
            }
        }
    }
}
