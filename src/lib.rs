//! # Floor Map Tool
//!
//! An editor for laying out floor maps from simple shapes. Every placed item is
//! rendered by a tool node that can be:
//! - **Rotated** clockwise or counter-clockwise with press-and-hold controls
//! - **Resized** by growing or shrinking both dimensions
//! - **Labelled** through an inline text field
//!
//! ## Features
//! - Six shape variants: square, circle, half-circle, L-shape, rectangle, triangle
//! - Hold-to-repeat controls driven by [`RepeatTrigger`]
//! - Local node edits merged back into the shared [`FloorMap`] by [`NodeStateSync`]
//! - Selectable commit policy (on selection change or on every edit)
//! - Canvas panning, zooming, dragging and grid snapping
//! - Built-in sample layouts

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod error;
mod layouts;
mod node;
mod repeat;
mod sync;
mod types;
mod ui;

// Re-export public types and functions
pub use constants::*;
pub use error::FloorMapError;
pub use layouts::{all_layouts, build_layout, LayoutInfo, LayoutKind};
pub use node::{NodeControl, ToolNode, ToolNodeConfig};
pub use repeat::RepeatTrigger;
pub use sync::*;
pub use types::*;
pub use ui::{CanvasState, FloorMapApp};

/// Runs the floor-map application with default settings.
///
/// Initializes the egui application window, restores stored UI preferences
/// and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use floormap_tool::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Floor Map Tool",
        options,
        Box::new(|cc| Ok(Box::new(FloorMapApp::new(cc)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_map_default() {
        let map = FloorMap::default();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_node_data_default() {
        let data = NodeData::default();
        assert_eq!(data.rotate_angle, 0.0);
        assert_eq!(data.size, Size::new(NODE_WIDTH, NODE_HEIGHT));
        assert!(data.label.is_empty());
        assert!(data.extra.is_empty());
    }
}
