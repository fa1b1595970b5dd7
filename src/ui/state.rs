//! Application state management structures.
//!
//! This module contains the state structures that track the application's
//! current UI state: canvas navigation, selection and dragging, and the
//! mounted tool nodes for the shared floor map.

use crate::layouts::{build_layout, LayoutKind};
use crate::node::{ToolNode, ToolNodeConfig};
use crate::repeat::RepeatTrigger;
use crate::sync::CommitPolicy;
use crate::types::*;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State related to canvas navigation and display.
///
/// Tracks the current pan offset, zoom level, and display options for the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasState {
    /// Current canvas pan offset for navigation (in screen space)
    #[serde(skip)]
    pub offset: egui::Vec2,
    /// Current zoom level (1.0 = normal, 2.0 = 2x zoom, 0.5 = 50% zoom)
    pub zoom_factor: f32,
    /// Whether the grid should be displayed on the canvas
    pub show_grid: bool,
    /// Whether the origin has been centered in the canvas this session
    #[serde(skip)]
    pub centered: bool,
    /// Screen rect of the canvas during the last frame
    #[serde(skip)]
    pub last_rect: Option<egui::Rect>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom_factor: 1.0,
            show_grid: true,
            centered: false,
            last_rect: None,
        }
    }
}

impl CanvasState {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        ((screen_pos - self.offset).to_vec2() / self.zoom_factor).to_pos2()
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        (world_pos.to_vec2() * self.zoom_factor + self.offset).to_pos2()
    }
}

/// State related to user interactions with items and canvas.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Currently selected item, if any
    pub selected_item: Option<ItemId>,
    /// Item currently being dragged by the user
    pub dragging_item: Option<ItemId>,
    /// Offset from mouse to item center during dragging
    pub drag_offset: egui::Vec2,
    /// Set once the current primary press has been handled by the canvas
    pub press_consumed: bool,
    /// Whether the user is currently panning the canvas
    pub is_panning: bool,
    /// Last mouse position during panning operation
    pub last_pan_pos: Option<egui::Pos2>,
}

/// The main application structure containing UI state and the floor map.
///
/// Only UI preferences are serialized; the floor map itself is never stored.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FloorMapApp {
    /// The shared item list
    #[serde(skip)]
    pub floor_map: FloorMap,
    /// Mounted tool nodes, one per item
    #[serde(skip)]
    pub nodes: HashMap<ItemId, ToolNode>,
    /// Configuration applied to every tool node
    pub node_config: ToolNodeConfig,
    /// When tool nodes write their edits back to the floor map
    pub commit_policy: CommitPolicy,
    /// Layout loaded at startup and shown in the layout picker
    pub layout: LayoutKind,
    /// Canvas navigation and display state
    pub canvas: CanvasState,
    /// User interaction state
    #[serde(skip)]
    pub interaction: InteractionState,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Remembered width of the properties panel across sessions
    pub properties_panel_width: f32,
}

impl Default for FloorMapApp {
    fn default() -> Self {
        Self {
            floor_map: FloorMap::new(),
            nodes: HashMap::new(),
            node_config: ToolNodeConfig::default(),
            commit_policy: CommitPolicy::default(),
            layout: LayoutKind::default(),
            canvas: CanvasState::default(),
            interaction: InteractionState::default(),
            dark_mode: true,
            properties_panel_width: 280.0,
        }
    }
}

impl FloorMapApp {
    /// Restores UI preferences from eframe storage and loads the remembered layout.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = cc
            .storage
            .and_then(|storage| storage.get_string(crate::constants::UI_PREFS_KEY))
            .and_then(|json| match Self::from_json(&json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("ignoring stored UI preferences: {err}");
                    None
                }
            })
            .unwrap_or_default();
        app.load_layout(app.layout);
        app
    }

    /// Serializes the UI preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes UI preferences from JSON.
    ///
    /// A stored repeat interval that nodes could not mount with is replaced
    /// by the default.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut app: Self = serde_json::from_str(json)?;
        app.sanitize_node_config();
        Ok(app)
    }

    fn sanitize_node_config(&mut self) {
        if let Err(err) = RepeatTrigger::new(self.node_config.repeat_interval()) {
            log::warn!("resetting stored node config: {err}");
            self.node_config.repeat_interval_ms = ToolNodeConfig::default().repeat_interval_ms;
        }
    }

    /// Replaces the floor map with a built-in layout, unmounting every node.
    pub fn load_layout(&mut self, kind: LayoutKind) {
        match build_layout(kind) {
            Ok(map) => {
                self.floor_map = map;
                self.nodes.clear();
                self.interaction = InteractionState::default();
                self.layout = kind;
            }
            Err(err) => log::error!("failed to load layout {kind:?}: {err}"),
        }
    }

    /// Places a new item of the given shape at a world position and selects it.
    pub fn add_item_at(&mut self, shape: ShapeKind, world_pos: egui::Pos2) -> Option<ItemId> {
        match self.floor_map.add_item(Item::new(shape, (world_pos.x, world_pos.y))) {
            Ok(id) => {
                self.interaction.selected_item = Some(id);
                Some(id)
            }
            Err(err) => {
                log::error!("failed to add {shape:?}: {err}");
                None
            }
        }
    }

    /// Removes the selected item, if any. Its node is unmounted on the next frame.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.interaction.selected_item.take() {
            self.floor_map.remove_item(id);
            if self.interaction.dragging_item == Some(id) {
                self.interaction.dragging_item = None;
            }
        }
    }

    /// Pushes the current node config and commit policy to every mounted node.
    pub fn apply_node_settings(&mut self) {
        for node in self.nodes.values_mut() {
            node.set_config(self.node_config);
            node.set_commit_policy(self.commit_policy, &mut self.floor_map);
        }
    }

    /// Mounts nodes for new items and drops nodes whose item is gone.
    pub fn reconcile_nodes(&mut self) {
        let map = &self.floor_map;
        self.nodes.retain(|id, _| {
            let keep = map.contains(*id);
            if !keep {
                log::debug!("unmounted node {id}");
            }
            keep
        });
        for item in self.floor_map.items() {
            if self.nodes.contains_key(&item.id) {
                continue;
            }
            match ToolNode::mount(item, self.node_config, self.commit_policy) {
                Ok(node) => {
                    self.nodes.insert(item.id, node);
                }
                Err(err) => log::error!("failed to mount node {}: {err}", item.id),
            }
        }
    }
}
