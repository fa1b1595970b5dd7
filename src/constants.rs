//! Shared application-wide constants.
//! Centralizes tweakable values used across node controls, rendering and interactions.

// Node controls
/// Degrees added or removed per rotate tick.
pub const DEFAULT_ROTATE_UNIT: f32 = 15.0;
/// Pixels added or removed from both width and height per resize tick.
pub const DEFAULT_SIZE_UNIT: f32 = 20.0;
/// Interval between repeated fires while a control is held, in milliseconds.
pub const REPEAT_INTERVAL_MS: u64 = 200;
/// Diameter of a node control button (in screen pixels).
pub const CONTROL_SIZE: f32 = 18.0;
/// Gap between a node's bounding box and its controls (in screen pixels).
pub const CONTROL_GAP: f32 = 4.0;

// Node dimensions
/// Default node width in world units.
pub const NODE_WIDTH: f32 = 80.0;
/// Default node height in world units.
pub const NODE_HEIGHT: f32 = 80.0;
/// Width of the label field under a node (in screen pixels).
pub const LABEL_WIDTH: f32 = 110.0;
/// Height of the label field under a node (in screen pixels).
pub const LABEL_HEIGHT: f32 = 20.0;
/// Number of segments used to approximate circular outlines.
pub const CIRCLE_SEGMENTS: usize = 48;

// Grid/drawing
/// Grid cell size in world units.
pub const GRID_SIZE: f32 = 20.0;
/// Every n-th grid line is drawn as a major line.
pub const GRID_MAJOR_EVERY: i64 = 5;

// Canvas interactions
/// Smallest zoom factor reachable with the scroll wheel.
pub const MIN_ZOOM: f32 = 0.25;
/// Largest zoom factor reachable with the scroll wheel.
pub const MAX_ZOOM: f32 = 5.0;
/// Zoom change per scroll event.
pub const ZOOM_STEP: f32 = 0.025;

// Persistence of UI preferences
/// eframe storage key holding the serialized UI preferences.
pub const UI_PREFS_KEY: &str = "ui_prefs";
