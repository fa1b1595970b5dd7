//! On-canvas rendering and interaction for a [`ToolNode`].

use super::rendering::{paint_shape, ShapeStyle};
use super::state::CanvasState;
use crate::constants::{CONTROL_GAP, CONTROL_SIZE, LABEL_HEIGHT, LABEL_WIDTH};
use crate::node::{NodeControl, ToolNode};
use crate::types::{DisplayMode, FloorMap};
use eframe::egui;

impl ToolNode {
    /// Draws the node and runs its controls for one frame.
    ///
    /// Controls are only interactive while the node is selected and in
    /// [`DisplayMode::Normal`]; otherwise every held control is released.
    /// The selection flag is reported after the controls so a release on the
    /// deselecting frame is included in the commit.
    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        painter: &egui::Painter,
        canvas: &CanvasState,
        position: (f32, f32),
        selected: bool,
        dark_mode: bool,
        map: &mut FloorMap,
    ) {
        let now = ui.input(|i| i.time);
        let zoom = canvas.zoom_factor;
        let center = canvas.world_to_screen(egui::pos2(position.0, position.1));
        let state = self.state().clone();

        paint_shape(
            painter,
            self.shape(),
            state.size,
            state.rotate_angle,
            center,
            zoom,
            ShapeStyle::for_node(dark_mode, selected),
        );

        // Radius of the circle the rotated shape always fits in.
        let reach = 0.5 * state.size.width.hypot(state.size.height) * zoom;
        let editable = self.config().mode == DisplayMode::Normal;

        let label_rect = egui::Rect::from_center_size(
            egui::pos2(center.x, center.y + reach + CONTROL_GAP + LABEL_HEIGHT / 2.0),
            egui::vec2(LABEL_WIDTH, LABEL_HEIGHT),
        );
        let mut label = state.label;
        let label_response = ui.put(
            label_rect,
            egui::TextEdit::singleline(&mut label)
                .id(egui::Id::new((self.id(), "label")))
                .horizontal_align(egui::Align::Center)
                .hint_text("Label")
                .interactive(editable),
        );
        if label_response.changed() {
            self.set_label(label, map);
        }

        if selected && editable {
            for control in NodeControl::ALL {
                let rect = egui::Rect::from_center_size(
                    control_anchor(control, center, reach),
                    egui::vec2(CONTROL_SIZE, CONTROL_SIZE),
                );
                let response = ui
                    .interact(rect, egui::Id::new((self.id(), control)), egui::Sense::click_and_drag())
                    .on_hover_text(control.tooltip());
                // Senses drag so the press never falls through to the canvas.
                // Leaving the control while pressed counts as a release.
                let held = response.is_pointer_button_down_on() && response.contains_pointer();
                self.drive_control(control, held, now, map);
                paint_control(painter, rect, control, held || response.hovered(), dark_mode);
            }
        } else {
            self.release_controls(now, map);
        }

        if let Some(wait) = self.next_fire_in(now) {
            ui.ctx().request_repaint_after(wait);
        }

        self.observe_selection(selected, map);
    }
}

/// Screen position of a control around a node of the given reach.
pub(super) fn control_anchor(control: NodeControl, center: egui::Pos2, reach: f32) -> egui::Pos2 {
    let d = reach + CONTROL_GAP + CONTROL_SIZE / 2.0;
    let offset = match control {
        NodeControl::Grow => egui::vec2(-d, -d),
        NodeControl::Shrink => egui::vec2(-d, d),
        NodeControl::RotateCw => egui::vec2(d, -d),
        NodeControl::RotateCcw => egui::vec2(d, d),
    };
    center + offset * std::f32::consts::FRAC_1_SQRT_2
}

fn paint_control(painter: &egui::Painter, rect: egui::Rect, control: NodeControl, active: bool, dark_mode: bool) {
    let fill = match (active, dark_mode) {
        (true, _) => egui::Color32::from_rgb(100, 150, 255),
        (false, true) => egui::Color32::from_gray(70),
        (false, false) => egui::Color32::from_gray(225),
    };
    let text_color = if dark_mode || active {
        egui::Color32::WHITE
    } else {
        egui::Color32::from_gray(30)
    };
    painter.circle(
        rect.center(),
        rect.width() / 2.0,
        fill,
        egui::Stroke::new(1.0, egui::Color32::from_gray(140)),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        control.glyph(),
        egui::FontId::proportional(CONTROL_SIZE * 0.75),
        text_color,
    );
}
