//! Canvas interaction and navigation functionality.
//!
//! This module handles canvas panning, zooming, item selection and dragging,
//! and hit testing of items against their rotated shapes.

use super::rendering::{local_box_contains, world_to_local};
use super::state::FloorMapApp;
use crate::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::types::*;
use eframe::egui;

impl FloorMapApp {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        self.canvas.screen_to_world(screen_pos)
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        self.canvas.world_to_screen(world_pos)
    }

    /// Snaps a position to the nearest grid point.
    pub fn snap_to_grid(&self, pos: egui::Pos2) -> egui::Pos2 {
        let grid = crate::constants::GRID_SIZE;
        egui::pos2((pos.x / grid).round() * grid, (pos.y / grid).round() * grid)
    }

    /// World position at the center of the visible canvas.
    pub fn canvas_center_world(&self) -> egui::Pos2 {
        match self.canvas.last_rect {
            Some(rect) => self.screen_to_world(rect.center()),
            None => egui::Pos2::ZERO,
        }
    }

    /// Handles middle-click or Cmd/Ctrl+left-click canvas panning.
    ///
    /// While panning, item presses are ignored so a pan never starts a drag
    /// or changes the selection.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        // modifiers.command is Cmd on macOS and Ctrl elsewhere
        let should_pan = ui.input(|i| {
            i.pointer.middle_down() || (i.pointer.primary_down() && i.modifiers.command)
        });

        if should_pan {
            if let Some(current_pos) = response.interact_pointer_pos() {
                if !self.interaction.is_panning {
                    self.interaction.is_panning = true;
                    self.interaction.last_pan_pos = Some(current_pos);
                } else if let Some(last_pos) = self.interaction.last_pan_pos {
                    self.canvas.offset += current_pos - last_pos;
                    self.interaction.last_pan_pos = Some(current_pos);
                }
            }
        } else {
            self.interaction.is_panning = false;
            self.interaction.last_pan_pos = None;
        }
    }

    /// Handles scroll wheel zooming, keeping the world point under the cursor fixed.
    ///
    /// Each scroll event moves the zoom by [`ZOOM_STEP`], clamped to
    /// [`MIN_ZOOM`]..=[`MAX_ZOOM`]. Node controls and labels keep their
    /// screen size; only shapes scale.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }
        let Some(mouse_pos) = ui
            .input(|i| i.pointer.hover_pos())
            .or_else(|| response.interact_pointer_pos())
        else {
            return;
        };
        if !response.rect.contains(mouse_pos) {
            return;
        }

        let world_before = self.screen_to_world(mouse_pos);
        let zoom_delta = if scroll_delta > 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        let old_zoom = self.canvas.zoom_factor;
        self.canvas.zoom_factor = (old_zoom + zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);

        // Shift the pan so the floor point under the cursor stays put
        if (self.canvas.zoom_factor - old_zoom).abs() > f32::EPSILON {
            let screen_after = self.world_to_screen(world_before);
            self.canvas.offset += mouse_pos - screen_after;
        }
    }

    /// Handles selection and dragging of items with the left mouse button.
    ///
    /// A press on an item selects it and starts a drag; Shift snaps the dragged
    /// item to the grid. A press on empty canvas clears the selection.
    pub fn handle_item_dragging(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        if ui.input(|i| i.pointer.primary_down()) && !self.interaction.is_panning {
            let Some(current_pos) = response.interact_pointer_pos() else {
                return;
            };
            let world_pos = self.screen_to_world(current_pos);

            if let Some(dragging_id) = self.interaction.dragging_item {
                let mut target = world_pos + self.interaction.drag_offset;
                if ui.input(|i| i.modifiers.shift) {
                    target = self.snap_to_grid(target);
                }
                self.floor_map.move_item(dragging_id, (target.x, target.y));
            } else if !self.interaction.press_consumed {
                self.interaction.press_consumed = true;
                match self.find_item_at_position(world_pos) {
                    Some(item_id) => self.start_item_drag(item_id, world_pos),
                    None => self.interaction.selected_item = None,
                }
            }
        } else {
            self.interaction.dragging_item = None;
            self.interaction.press_consumed = false;
        }
    }

    /// Selects an item and records the grab offset for dragging.
    fn start_item_drag(&mut self, item_id: ItemId, world_pos: egui::Pos2) {
        self.interaction.selected_item = Some(item_id);
        self.interaction.dragging_item = Some(item_id);
        if let Some(item) = self.floor_map.get(item_id) {
            let center = egui::pos2(item.position.0, item.position.1);
            self.interaction.drag_offset = center - world_pos;
        }
    }

    /// Finds the topmost item whose rotated box contains the world position.
    ///
    /// Uses the mounted node's local size and angle when available, so hit
    /// testing follows uncommitted edits.
    pub fn find_item_at_position(&self, pos: egui::Pos2) -> Option<ItemId> {
        self.floor_map.items().iter().rev().find_map(|item| {
            let (size, angle) = match self.nodes.get(&item.id) {
                Some(node) => (node.state().size, node.state().rotate_angle),
                None => (item.data.size, item.data.rotate_angle),
            };
            let center = egui::pos2(item.position.0, item.position.1);
            local_box_contains(size, world_to_local(pos, center, angle)).then_some(item.id)
        })
    }
}
