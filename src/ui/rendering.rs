//! Canvas rendering functionality for the grid and node shapes.
//!
//! Shape outlines are built in node-local coordinates (origin at the node
//! center, y pointing down) from the node size, then rotated and placed on
//! screen. Concave outlines are filled as several convex parts.

use super::state::FloorMapApp;
use crate::constants::{CIRCLE_SEGMENTS, GRID_MAJOR_EVERY, GRID_SIZE};
use crate::types::{ShapeKind, Size};
use eframe::egui;
use eframe::egui::emath::Rot2;
use std::f32::consts::PI;

/// Colors used to paint one node.
#[derive(Debug, Clone, Copy)]
pub struct ShapeStyle {
    /// Interior fill
    pub fill: egui::Color32,
    /// Outline stroke
    pub stroke: egui::Stroke,
}

impl ShapeStyle {
    /// Style for a node, depending on theme and selection.
    pub fn for_node(dark_mode: bool, selected: bool) -> Self {
        let fill = if dark_mode {
            egui::Color32::from_rgb(60, 70, 90)
        } else {
            egui::Color32::from_rgb(215, 225, 240)
        };
        let stroke = if selected {
            egui::Stroke::new(2.5, egui::Color32::from_rgb(100, 150, 255))
        } else if dark_mode {
            egui::Stroke::new(1.5, egui::Color32::from_gray(180))
        } else {
            egui::Stroke::new(1.5, egui::Color32::from_gray(60))
        };
        Self { fill, stroke }
    }
}

/// Outline of a shape in node-local coordinates.
pub fn shape_outline(shape: ShapeKind, size: Size) -> Vec<egui::Vec2> {
    let (hw, hh) = (size.width / 2.0, size.height / 2.0);
    match shape {
        ShapeKind::Square | ShapeKind::Rectangle => vec![
            egui::vec2(-hw, -hh),
            egui::vec2(hw, -hh),
            egui::vec2(hw, hh),
            egui::vec2(-hw, hh),
        ],
        ShapeKind::Circle => (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / CIRCLE_SEGMENTS as f32 * 2.0 * PI;
                egui::vec2(hw * t.cos(), hh * t.sin())
            })
            .collect(),
        ShapeKind::HalfCircle => {
            // Dome over the bottom edge, radius spanning the full height.
            let segments = CIRCLE_SEGMENTS / 2;
            (0..=segments)
                .map(|i| {
                    let t = PI + i as f32 / segments as f32 * PI;
                    egui::vec2(hw * t.cos(), hh + size.height * t.sin())
                })
                .collect()
        }
        ShapeKind::Triangle => vec![
            egui::vec2(0.0, -hh),
            egui::vec2(hw, hh),
            egui::vec2(-hw, hh),
        ],
        ShapeKind::LShape => {
            let (inner_x, inner_y) = lshape_inner_corner(size);
            vec![
                egui::vec2(-hw, -hh),
                egui::vec2(inner_x, -hh),
                egui::vec2(inner_x, inner_y),
                egui::vec2(hw, inner_y),
                egui::vec2(hw, hh),
                egui::vec2(-hw, hh),
            ]
        }
    }
}

/// Convex pieces that together fill a shape, in node-local coordinates.
pub fn convex_parts(shape: ShapeKind, size: Size) -> Vec<Vec<egui::Vec2>> {
    match shape {
        ShapeKind::LShape => {
            let (hw, hh) = (size.width / 2.0, size.height / 2.0);
            let (inner_x, inner_y) = lshape_inner_corner(size);
            vec![
                vec![
                    egui::vec2(-hw, -hh),
                    egui::vec2(inner_x, -hh),
                    egui::vec2(inner_x, inner_y),
                    egui::vec2(-hw, inner_y),
                ],
                vec![
                    egui::vec2(-hw, inner_y),
                    egui::vec2(hw, inner_y),
                    egui::vec2(hw, hh),
                    egui::vec2(-hw, hh),
                ],
            ]
        }
        _ => vec![shape_outline(shape, size)],
    }
}

// The L's arms are one third of the box wide.
fn lshape_inner_corner(size: Size) -> (f32, f32) {
    (-size.width / 6.0, size.height / 6.0)
}

/// Rotates local points by `angle_deg` (clockwise on screen) and places them at `center`.
pub fn place_points(points: &[egui::Vec2], center: egui::Pos2, angle_deg: f32, scale: f32) -> Vec<egui::Pos2> {
    let rot = Rot2::from_angle(angle_deg.to_radians());
    points.iter().map(|p| center + rot * (*p * scale)).collect()
}

/// Whether a point given in node-local (unrotated) coordinates lies inside the node box.
pub fn local_box_contains(size: Size, local: egui::Vec2) -> bool {
    local.x.abs() <= size.width.abs() / 2.0 && local.y.abs() <= size.height.abs() / 2.0
}

/// Converts a world point into the unrotated local frame of a node.
pub fn world_to_local(point: egui::Pos2, center: egui::Pos2, angle_deg: f32) -> egui::Vec2 {
    Rot2::from_angle(-angle_deg.to_radians()) * (point - center)
}

/// Paints a node shape centered at `center` (screen space).
pub fn paint_shape(
    painter: &egui::Painter,
    shape: ShapeKind,
    size: Size,
    angle_deg: f32,
    center: egui::Pos2,
    scale: f32,
    style: ShapeStyle,
) {
    for part in convex_parts(shape, size) {
        painter.add(egui::Shape::convex_polygon(
            place_points(&part, center, angle_deg, scale),
            style.fill,
            egui::Stroke::NONE,
        ));
    }
    painter.add(egui::Shape::closed_line(
        place_points(&shape_outline(shape, size), center, angle_deg, scale),
        style.stroke,
    ));
}

impl FloorMapApp {
    /// Draws a zoom-aware floor grid on the canvas.
    ///
    /// Minor lines are drawn every [`GRID_SIZE`] world units and a stronger
    /// line every [`GRID_MAJOR_EVERY`] cells. Minor lines are dropped once
    /// cells get too small on screen; major lines are kept.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle defining visible area
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let zoom = self.canvas.zoom_factor;
        let major_size = GRID_SIZE * GRID_MAJOR_EVERY as f32;
        let (step, minor_visible) = if GRID_SIZE * zoom < 4.0 {
            (major_size, false)
        } else {
            (GRID_SIZE, true)
        };
        if step * zoom < 2.0 {
            return;
        }
        let minor = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 28));
        let major = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 70));
        let stroke_at = |world: f32| {
            let cell = (world / GRID_SIZE).round() as i64;
            if !minor_visible || cell.rem_euclid(GRID_MAJOR_EVERY) == 0 {
                major
            } else {
                minor
            }
        };

        let top_left = self.canvas.screen_to_world(canvas_rect.min);
        let bottom_right = self.canvas.screen_to_world(canvas_rect.max);

        for x in grid_lines(top_left.x, bottom_right.x, step) {
            let screen_x = self.canvas.world_to_screen(egui::pos2(x, 0.0)).x;
            painter.vline(screen_x, canvas_rect.y_range(), stroke_at(x));
        }
        for y in grid_lines(top_left.y, bottom_right.y, step) {
            let screen_y = self.canvas.world_to_screen(egui::pos2(0.0, y)).y;
            painter.hline(canvas_rect.x_range(), screen_y, stroke_at(y));
        }
    }
}

/// World coordinates of grid lines spaced `step` apart covering `min..=max`.
fn grid_lines(min: f32, max: f32, step: f32) -> impl Iterator<Item = f32> {
    let first = (min / step).floor() as i64;
    let last = (max / step).ceil() as i64;
    (first..=last).map(move |i| i as f32 * step)
}
