//! Node state synchronization.
//!
//! A tool node keeps a local [`NodeDisplayState`] copied from its item when it
//! mounts. Edits land in that copy immediately; they reach the shared
//! [`FloorMap`] only when the node commits, which happens according to its
//! [`CommitPolicy`].

use crate::types::{FloorMap, Item, ItemId, NodeData, Size};
use serde::{Deserialize, Serialize};

/// Rotates an angle clockwise by one unit.
pub fn rotate_cw(angle: f32, unit: f32) -> f32 {
    angle + unit
}

/// Rotates an angle counter-clockwise by one unit.
pub fn rotate_ccw(angle: f32, unit: f32) -> f32 {
    angle - unit
}

/// Grows both dimensions by one unit.
pub fn grow_size(size: Size, unit: f32) -> Size {
    Size::new(size.width + unit, size.height + unit)
}

/// Shrinks both dimensions by one unit. Dimensions may become negative.
pub fn shrink_size(size: Size, unit: f32) -> Size {
    Size::new(size.width - unit, size.height - unit)
}

/// Local, editable copy of the fields a tool node owns.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDisplayState {
    /// Rotation in degrees
    pub rotate_angle: f32,
    /// Node dimensions
    pub size: Size,
    /// Label text
    pub label: String,
}

impl NodeDisplayState {
    /// Copies the display fields out of an item's data.
    pub fn from_data(data: &NodeData) -> Self {
        Self {
            rotate_angle: data.rotate_angle,
            size: data.size,
            label: data.label.clone(),
        }
    }

    /// Returns `base` with this state's fields written over it.
    pub fn merged_into(&self, base: &NodeData) -> NodeData {
        NodeData {
            rotate_angle: self.rotate_angle,
            size: self.size,
            label: self.label.clone(),
            extra: base.extra.clone(),
        }
    }
}

/// When local node edits are written to the shared floor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommitPolicy {
    /// Commit whenever the node gains or loses selection
    #[default]
    OnSelectionChange,
    /// Commit after every edit
    OnEdit,
}

impl CommitPolicy {
    /// Label for settings menus.
    pub fn display_name(self) -> &'static str {
        match self {
            CommitPolicy::OnSelectionChange => "On selection change",
            CommitPolicy::OnEdit => "On every edit",
        }
    }
}

/// Builds the list that results from committing `state` for item `id`.
///
/// The matching item is removed and re-appended with merged data; all other
/// items are cloned unchanged and keep their relative order. Returns `None`
/// when no item has this id.
pub fn merge_node_data(items: &[Item], id: ItemId, state: &NodeDisplayState) -> Option<Vec<Item>> {
    let index = items.iter().position(|item| item.id == id)?;
    let old = &items[index];
    let updated = Item {
        data: state.merged_into(&old.data),
        ..old.clone()
    };

    let mut next = Vec::with_capacity(items.len());
    next.extend_from_slice(&items[..index]);
    next.extend_from_slice(&items[index + 1..]);
    next.push(updated);
    Some(next)
}

/// Keeps one node's local display state and writes it back to the floor map.
#[derive(Debug, Clone)]
pub struct NodeStateSync {
    id: ItemId,
    state: NodeDisplayState,
    policy: CommitPolicy,
    last_selected: Option<bool>,
    dirty: bool,
}

impl NodeStateSync {
    /// Starts tracking item `id` with display state copied from `data`.
    pub fn new(id: ItemId, data: &NodeData, policy: CommitPolicy) -> Self {
        Self {
            id,
            state: NodeDisplayState::from_data(data),
            policy,
            last_selected: None,
            dirty: false,
        }
    }

    /// Starts tracking an item.
    pub fn for_item(item: &Item, policy: CommitPolicy) -> Self {
        Self::new(item.id, &item.data, policy)
    }

    /// Id of the tracked item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Current local display state.
    pub fn state(&self) -> &NodeDisplayState {
        &self.state
    }

    /// Active commit policy.
    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Switches the commit policy. Moving to [`CommitPolicy::OnEdit`] flushes pending edits.
    pub fn set_policy(&mut self, policy: CommitPolicy, map: &mut FloorMap) {
        self.policy = policy;
        if policy == CommitPolicy::OnEdit && self.dirty {
            self.commit(map);
        }
    }

    /// Whether local edits exist that have not been committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Applies an edit to the local state. Returns true if the edit was committed.
    pub fn edit(&mut self, map: &mut FloorMap, f: impl FnOnce(&mut NodeDisplayState)) -> bool {
        f(&mut self.state);
        self.dirty = true;
        match self.policy {
            CommitPolicy::OnEdit => self.commit(map),
            CommitPolicy::OnSelectionChange => false,
        }
    }

    /// Records the node's selection flag for this frame.
    ///
    /// The first observation only sets the baseline. Under
    /// [`CommitPolicy::OnSelectionChange`] every later change commits, even
    /// when nothing was edited. Returns true if a commit happened.
    pub fn observe_selection(&mut self, selected: bool, map: &mut FloorMap) -> bool {
        let previous = self.last_selected.replace(selected);
        match previous {
            Some(was) if was != selected && self.policy == CommitPolicy::OnSelectionChange => {
                self.commit(map)
            }
            _ => false,
        }
    }

    /// Writes the local state into the floor map. Returns false if the item is gone.
    pub fn commit(&mut self, map: &mut FloorMap) -> bool {
        let committed = map.commit_node_data(self.id, &self.state);
        if committed {
            self.dirty = false;
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn three_items() -> Vec<Item> {
        let mut b = Item::new(ShapeKind::Circle, (100.0, 0.0));
        b.data.label = "Room".into();
        b.data.extra.insert("zone".into(), json!("east"));
        vec![
            Item::new(ShapeKind::Square, (0.0, 0.0)),
            b,
            Item::new(ShapeKind::Triangle, (200.0, 0.0)),
        ]
    }

    #[test]
    fn rotation_and_size_steps_are_inverse_pairs() {
        assert_eq!(rotate_ccw(rotate_cw(30.0, 15.0), 15.0), 30.0);
        let size = Size::new(40.0, 60.0);
        assert_eq!(shrink_size(grow_size(size, 20.0), 20.0), size);
    }

    #[test]
    fn steps_are_not_clamped() {
        assert_eq!(rotate_cw(355.0, 15.0), 370.0);
        assert_eq!(rotate_ccw(0.0, 15.0), -15.0);
        assert_eq!(shrink_size(Size::new(10.0, 10.0), 20.0), Size::new(-10.0, -10.0));
    }

    #[test]
    fn merge_updates_only_the_target_item() {
        let items = three_items();
        let (a, b, c) = (items[0].clone(), items[1].clone(), items[2].clone());
        let state = NodeDisplayState {
            rotate_angle: 45.0,
            size: Size::new(100.0, 50.0),
            label: "Room 2".into(),
        };

        let next = merge_node_data(&items, b.id, &state).expect("b is present");
        assert_eq!(next.len(), 3);
        assert_eq!(next.iter().find(|i| i.id == a.id), Some(&a));
        assert_eq!(next.iter().find(|i| i.id == c.id), Some(&c));

        let new_b = next.iter().find(|i| i.id == b.id).unwrap();
        let mut expected = b.data.clone();
        expected.rotate_angle = 45.0;
        expected.size = Size::new(100.0, 50.0);
        expected.label = "Room 2".into();
        assert_eq!(new_b.data, expected);
        assert_eq!(new_b.data.extra["zone"], "east");
        assert_eq!(new_b.position, b.position);
        assert_eq!(new_b.shape, b.shape);
    }

    #[test]
    fn merge_moves_updated_item_to_the_end() {
        let items = three_items();
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        let state = NodeDisplayState::from_data(&items[1].data);
        let next = merge_node_data(&items, ids[1], &state).unwrap();
        let order: Vec<_> = next.iter().map(|i| i.id).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[1]]);
    }

    #[test]
    fn commit_for_unknown_id_is_a_noop() {
        let mut map = FloorMap::from_items(three_items()).unwrap();
        let before = map.clone();
        let state = NodeDisplayState::from_data(&NodeData::default());
        assert!(merge_node_data(map.items(), uuid::Uuid::new_v4(), &state).is_none());
        assert!(!map.commit_node_data(uuid::Uuid::new_v4(), &state));
        assert_eq!(map, before);
    }

    #[test]
    fn selection_policy_commits_on_each_toggle() {
        let mut map = FloorMap::new();
        let id = map.add_item(Item::square((0.0, 0.0))).unwrap();
        let mut sync = NodeStateSync::for_item(map.get(id).unwrap(), CommitPolicy::OnSelectionChange);

        assert!(!sync.observe_selection(false, &mut map));
        assert!(sync.observe_selection(true, &mut map));
        assert!(!sync.edit(&mut map, |s| s.label = "Lobby".into()));
        assert!(sync.is_dirty());
        assert_eq!(map.get(id).unwrap().data.label, "");
        assert!(!sync.observe_selection(true, &mut map));
        assert!(sync.observe_selection(false, &mut map));
        assert!(!sync.is_dirty());
        assert_eq!(map.get(id).unwrap().data.label, "Lobby");
    }

    #[test]
    fn edit_policy_commits_immediately() {
        let mut map = FloorMap::new();
        let id = map.add_item(Item::circle((0.0, 0.0))).unwrap();
        let mut sync = NodeStateSync::for_item(map.get(id).unwrap(), CommitPolicy::OnEdit);

        assert!(sync.edit(&mut map, |s| s.rotate_angle = rotate_cw(s.rotate_angle, 15.0)));
        assert_eq!(map.get(id).unwrap().data.rotate_angle, 15.0);
        sync.observe_selection(false, &mut map);
        assert!(!sync.observe_selection(true, &mut map));
    }

    #[test]
    fn switching_to_edit_policy_flushes_pending_edits() {
        let mut map = FloorMap::new();
        let id = map.add_item(Item::square((0.0, 0.0))).unwrap();
        let mut sync = NodeStateSync::for_item(map.get(id).unwrap(), CommitPolicy::OnSelectionChange);
        sync.edit(&mut map, |s| s.size = grow_size(s.size, 20.0));
        sync.set_policy(CommitPolicy::OnEdit, &mut map);
        assert_eq!(map.get(id).unwrap().data.size, Size::new(100.0, 100.0));
    }

    #[test]
    fn commit_after_item_removed_returns_false() {
        let mut map = FloorMap::new();
        let id = map.add_item(Item::square((0.0, 0.0))).unwrap();
        let mut sync = NodeStateSync::for_item(map.get(id).unwrap(), CommitPolicy::OnEdit);
        map.remove_item(id);
        assert!(!sync.edit(&mut map, |s| s.label = "gone".into()));
        assert!(sync.is_dirty());
        assert!(map.is_empty());
    }
}
