//! The tool node: one mounted floor-map item with its controls.
//!
//! A [`ToolNode`] pairs a [`NodeStateSync`] with one [`RepeatTrigger`] per
//! control. The UI feeds it pointer state every frame through
//! [`ToolNode::drive_control`]; each fire applies the control's step to the
//! local display state. Dropping the node drops its triggers, so an unmounted
//! node can never fire again.

use crate::constants::{DEFAULT_ROTATE_UNIT, DEFAULT_SIZE_UNIT, REPEAT_INTERVAL_MS};
use crate::error::FloorMapError;
use crate::repeat::RepeatTrigger;
use crate::sync::{grow_size, rotate_ccw, rotate_cw, shrink_size, CommitPolicy, NodeDisplayState, NodeStateSync};
use crate::types::{DisplayMode, FloorMap, Item, ItemId, ShapeKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The four press-and-hold controls shown around a selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeControl {
    /// Rotate clockwise by one rotate unit
    RotateCw,
    /// Rotate counter-clockwise by one rotate unit
    RotateCcw,
    /// Grow both dimensions by one size unit
    Grow,
    /// Shrink both dimensions by one size unit
    Shrink,
}

impl NodeControl {
    /// Every control, in drawing order.
    pub const ALL: [NodeControl; 4] = [
        NodeControl::Grow,
        NodeControl::Shrink,
        NodeControl::RotateCw,
        NodeControl::RotateCcw,
    ];

    /// Glyph drawn inside the control button.
    pub fn glyph(self) -> &'static str {
        match self {
            NodeControl::RotateCw => "↻",
            NodeControl::RotateCcw => "↺",
            NodeControl::Grow => "+",
            NodeControl::Shrink => "−",
        }
    }

    /// Hover text for the control.
    pub fn tooltip(self) -> &'static str {
        match self {
            NodeControl::RotateCw => "Rotate clockwise (hold to repeat)",
            NodeControl::RotateCcw => "Rotate counter-clockwise (hold to repeat)",
            NodeControl::Grow => "Grow (hold to repeat)",
            NodeControl::Shrink => "Shrink (hold to repeat)",
        }
    }

    fn index(self) -> usize {
        match self {
            NodeControl::Grow => 0,
            NodeControl::Shrink => 1,
            NodeControl::RotateCw => 2,
            NodeControl::RotateCcw => 3,
        }
    }
}

/// Per-node tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolNodeConfig {
    /// Degrees per rotate tick
    pub rotate_unit: f32,
    /// Pixels per resize tick
    pub size_unit: f32,
    /// Milliseconds between repeated fires while a control is held
    pub repeat_interval_ms: u64,
    /// Display mode for nodes
    pub mode: DisplayMode,
}

impl Default for ToolNodeConfig {
    fn default() -> Self {
        Self {
            rotate_unit: DEFAULT_ROTATE_UNIT,
            size_unit: DEFAULT_SIZE_UNIT,
            repeat_interval_ms: REPEAT_INTERVAL_MS,
            mode: DisplayMode::Normal,
        }
    }
}

impl ToolNodeConfig {
    /// Repeat interval as a duration.
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}

/// A mounted floor-map item: local display state plus its controls.
#[derive(Debug, Clone)]
pub struct ToolNode {
    sync: NodeStateSync,
    shape: ShapeKind,
    config: ToolNodeConfig,
    triggers: [RepeatTrigger; 4],
}

impl ToolNode {
    /// Mounts a node for `item`, copying its display data.
    ///
    /// # Errors
    ///
    /// Fails when the configured repeat interval is zero.
    pub fn mount(item: &Item, config: ToolNodeConfig, policy: CommitPolicy) -> Result<Self, FloorMapError> {
        let trigger = RepeatTrigger::new(config.repeat_interval())?;
        log::debug!("mounted {:?} node {}", item.shape, item.id);
        Ok(Self {
            sync: NodeStateSync::for_item(item, policy),
            shape: item.shape,
            config,
            triggers: [trigger.clone(), trigger.clone(), trigger.clone(), trigger],
        })
    }

    /// Id of the item this node renders.
    pub fn id(&self) -> ItemId {
        self.sync.id()
    }

    /// Shape variant rendered by this node.
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Local display state, including uncommitted edits.
    pub fn state(&self) -> &NodeDisplayState {
        self.sync.state()
    }

    /// Node configuration.
    pub fn config(&self) -> &ToolNodeConfig {
        &self.config
    }

    /// Whether local edits are waiting for a commit.
    pub fn has_pending_edits(&self) -> bool {
        self.sync.is_dirty()
    }

    /// Updates rotate/size units and display mode. The repeat interval is fixed at mount.
    pub fn set_config(&mut self, config: ToolNodeConfig) {
        self.config = ToolNodeConfig {
            repeat_interval_ms: self.config.repeat_interval_ms,
            ..config
        };
    }

    /// Switches the commit policy.
    pub fn set_commit_policy(&mut self, policy: CommitPolicy, map: &mut FloorMap) {
        self.sync.set_policy(policy, map);
    }

    /// Feeds one frame of pointer state for `control` and applies the resulting fires.
    ///
    /// Returns the number of steps applied.
    pub fn drive_control(&mut self, control: NodeControl, held: bool, now: f64, map: &mut FloorMap) -> u32 {
        let fires = self.triggers[control.index()].update(held, now);
        for _ in 0..fires {
            self.apply_control(control, map);
        }
        fires
    }

    /// Releases every control, applying fires that came due before `now`.
    pub fn release_controls(&mut self, now: f64, map: &mut FloorMap) {
        for control in NodeControl::ALL {
            self.drive_control(control, false, now, map);
        }
    }

    /// Whether any control is currently held.
    pub fn is_holding(&self) -> bool {
        self.triggers.iter().any(RepeatTrigger::is_holding)
    }

    /// Time until the next held control fires, if any is held.
    pub fn next_fire_in(&self, now: f64) -> Option<Duration> {
        self.triggers.iter().filter_map(|t| t.next_fire_in(now)).min()
    }

    /// Applies one step of `control` to the local display state.
    pub fn apply_control(&mut self, control: NodeControl, map: &mut FloorMap) -> bool {
        let ToolNodeConfig {
            rotate_unit,
            size_unit,
            ..
        } = self.config;
        self.sync.edit(map, |state| match control {
            NodeControl::RotateCw => state.rotate_angle = rotate_cw(state.rotate_angle, rotate_unit),
            NodeControl::RotateCcw => state.rotate_angle = rotate_ccw(state.rotate_angle, rotate_unit),
            NodeControl::Grow => state.size = grow_size(state.size, size_unit),
            NodeControl::Shrink => state.size = shrink_size(state.size, size_unit),
        })
    }

    /// Replaces the label text.
    pub fn set_label(&mut self, label: impl Into<String>, map: &mut FloorMap) -> bool {
        let label = label.into();
        self.sync.edit(map, move |state| state.label = label)
    }

    /// Reports this frame's selection flag; commits on change under the default policy.
    pub fn observe_selection(&mut self, selected: bool, map: &mut FloorMap) -> bool {
        self.sync.observe_selection(selected, map)
    }

    /// Commits local edits regardless of policy.
    pub fn commit(&mut self, map: &mut FloorMap) -> bool {
        self.sync.commit(map)
    }
}
