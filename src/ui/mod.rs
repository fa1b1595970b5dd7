//! User interface components and rendering logic for the floor-map tool.
//!
//! This module contains the application shell: toolbar, properties panel and
//! the canvas that hosts one [`crate::node::ToolNode`] per floor-map item.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main FloorMapApp
//! - `canvas` - Canvas navigation, zooming, panning, selection and dragging
//! - `rendering` - Shape geometry, grid and node painting
//! - `tool_node` - Per-node drawing, label editing and hold-to-repeat controls

mod canvas;
mod rendering;
mod state;
mod tool_node;

pub use state::{CanvasState, FloorMapApp};

use crate::layouts::{all_layouts, layout_name};
use crate::sync::CommitPolicy;
use crate::types::*;
use eframe::egui;

impl eframe::App for FloorMapApp {
    /// Persist UI preferences between restarts. The floor map is not stored.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(crate::constants::UI_PREFS_KEY, json),
            Err(err) => log::error!("failed to serialize UI preferences: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_delete_key(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let viewport_width = ctx.input(|i| i.screen_rect().width());
        let max_allowed = (viewport_width * 0.9).max(180.0);
        let clamped_width = self.properties_panel_width.clamp(180.0, max_allowed);
        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(clamped_width)
            .show(ctx, |ui| {
                self.properties_panel_width = ui.available_width().clamp(180.0, max_allowed);
                self.draw_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl FloorMapApp {
    /// Handles the Delete key, removing the selected item unless a text field has focus.
    fn handle_delete_key(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            self.delete_selected();
        }
    }

    /// Renders the top toolbar: shape palette, layout picker and node settings.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.menu_button("Add shape", |ui| {
                for shape in ShapeKind::ALL {
                    if ui.button(shape.display_name()).clicked() {
                        let at = self.canvas_center_world();
                        self.add_item_at(shape, at);
                    }
                }
            });

            let mut layout = self.layout;
            egui::ComboBox::from_id_salt("layout_combo")
                .selected_text(layout_name(layout))
                .show_ui(ui, |ui| {
                    for info in all_layouts() {
                        ui.selectable_value(&mut layout, info.kind, info.name);
                    }
                });
            if layout != self.layout {
                self.load_layout(layout);
            }

            ui.separator();

            let before = (self.node_config, self.commit_policy);
            ui.label("Rotate step");
            ui.add(
                egui::DragValue::new(&mut self.node_config.rotate_unit)
                    .speed(1.0)
                    .suffix("°"),
            );
            ui.label("Size step");
            ui.add(
                egui::DragValue::new(&mut self.node_config.size_unit)
                    .speed(1.0)
                    .suffix(" px"),
            );
            egui::ComboBox::from_id_salt("commit_policy_combo")
                .selected_text(self.commit_policy.display_name())
                .show_ui(ui, |ui| {
                    for policy in [CommitPolicy::OnSelectionChange, CommitPolicy::OnEdit] {
                        ui.selectable_value(&mut self.commit_policy, policy, policy.display_name());
                    }
                });
            let mut read_only = self.node_config.mode == DisplayMode::ReadOnly;
            if ui.checkbox(&mut read_only, "Read-only").changed() {
                self.node_config.mode = if read_only {
                    DisplayMode::ReadOnly
                } else {
                    DisplayMode::Normal
                };
            }
            if before != (self.node_config, self.commit_policy) {
                self.apply_node_settings();
            }

            ui.separator();
            ui.checkbox(&mut self.canvas.show_grid, "Show Grid");
            ui.checkbox(&mut self.dark_mode, "Dark Mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("Zoom: {:.0}%", self.canvas.zoom_factor * 100.0));
                ui.label(format!("Items: {}", self.floor_map.len()));
            });
        });
    }

    /// Renders the properties panel for the selected item.
    ///
    /// Shows both the committed data from the floor map and the node's local
    /// state so pending edits are visible.
    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Properties");
                ui.separator();

                let Some(id) = self.interaction.selected_item else {
                    ui.label("Select an item on the canvas to see its properties.");
                    return;
                };
                let Some(item) = self.floor_map.get(id).cloned() else {
                    ui.label("The selected item no longer exists.");
                    return;
                };

                ui.label(format!("Id: {}", item.id));
                ui.label(format!("Type: {}", item.shape.display_name()));
                ui.label(format!(
                    "Position: ({:.0}, {:.0})",
                    item.position.0, item.position.1
                ));

                ui.separator();
                ui.strong("Committed data");
                let committed = serde_json::to_string_pretty(&item.data)
                    .unwrap_or_else(|err| format!("<unserializable: {err}>"));
                ui.add(
                    egui::TextEdit::multiline(&mut committed.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );

                if let Some(node) = self.nodes.get_mut(&id) {
                    ui.separator();
                    ui.strong("Local state");
                    let state = node.state();
                    ui.label(format!("Angle: {}°", state.rotate_angle));
                    ui.label(format!(
                        "Size: {} × {}",
                        state.size.width, state.size.height
                    ));
                    ui.label(format!("Label: {:?}", state.label));
                    if node.has_pending_edits() {
                        ui.colored_label(egui::Color32::from_rgb(230, 180, 60), "Uncommitted edits");
                    }
                    if ui.button("Commit now").clicked() {
                        node.commit(&mut self.floor_map);
                    }
                }

                ui.separator();
                if ui.button("Delete").clicked() {
                    self.delete_selected();
                }
            });
    }

    /// Renders the canvas and every mounted tool node.
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        // Center the world origin on the first frame
        if !self.canvas.centered {
            self.canvas.offset = response.rect.center().to_vec2();
            self.canvas.centered = true;
        }
        self.canvas.last_rect = Some(response.rect);

        self.handle_canvas_panning(ui, &response);
        self.handle_canvas_zoom(ui, &response);
        self.handle_item_dragging(ui, &response);

        if self.canvas.show_grid {
            self.draw_grid(&painter, response.rect);
        }

        self.reconcile_nodes();

        // Nodes may commit while drawing, which reorders the list; iterate a snapshot.
        let placed: Vec<(ItemId, (f32, f32))> = self
            .floor_map
            .items()
            .iter()
            .map(|item| (item.id, item.position))
            .collect();
        for (id, position) in placed {
            let selected = self.interaction.selected_item == Some(id);
            if let Some(node) = self.nodes.get_mut(&id) {
                node.show(
                    ui,
                    &painter,
                    &self.canvas,
                    position,
                    selected,
                    self.dark_mode,
                    &mut self.floor_map,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests;
