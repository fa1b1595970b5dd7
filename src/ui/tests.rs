use super::tool_node::control_anchor;
use super::*;
use crate::node::NodeControl;
use crate::types::{Item, ItemId};
use eframe::egui;
use pretty_assertions::assert_eq;

/// Builds raw input for one headless frame at the given time.
fn raw_input(time: f64, events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.time = Some(time);
    raw.events = events;
    raw
}

/// Runs one frame that only draws the canvas.
fn run_canvas_frame(ctx: &egui::Context, app: &mut FloorMapApp, raw: egui::RawInput) {
    let _ = ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

fn primary(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

/// App with screen space equal to world space and one square at `pos`.
fn app_with_square(pos: (f32, f32)) -> (FloorMapApp, ItemId) {
    let mut app = FloorMapApp::default();
    app.canvas.centered = true;
    app.canvas.offset = egui::Vec2::ZERO;
    app.canvas.zoom_factor = 1.0;
    let id = app.floor_map.add_item(Item::square(pos)).unwrap();
    (app, id)
}

#[test]
fn first_frame_mounts_a_node_per_item() {
    let mut app = FloorMapApp::default();
    app.load_layout(crate::layouts::LayoutKind::SmallOffice);
    let ctx = egui::Context::default();
    run_canvas_frame(&ctx, &mut app, raw_input(0.0, vec![]));

    assert_eq!(app.nodes.len(), app.floor_map.len());
    for item in app.floor_map.items() {
        let node = &app.nodes[&item.id];
        assert_eq!(node.state().label, item.data.label);
    }
}

#[test]
fn removed_items_are_unmounted() {
    let (mut app, id) = app_with_square((200.0, 200.0));
    let ctx = egui::Context::default();
    run_canvas_frame(&ctx, &mut app, raw_input(0.0, vec![]));
    assert!(app.nodes.contains_key(&id));

    app.interaction.selected_item = Some(id);
    app.delete_selected();
    run_canvas_frame(&ctx, &mut app, raw_input(0.1, vec![]));
    assert!(app.nodes.is_empty());
    assert_eq!(app.interaction.selected_item, None);
}

#[test]
fn clicking_canvas_selects_item() {
    let (mut app, id) = app_with_square((200.0, 150.0));
    let click_pos = egui::pos2(200.0, 150.0);
    let ctx = egui::Context::default();

    // First frame: move cursor over the item to establish hover
    run_canvas_frame(
        &ctx,
        &mut app,
        raw_input(0.0, vec![egui::Event::PointerMoved(click_pos)]),
    );
    // Second frame: press the primary button over the item center
    run_canvas_frame(
        &ctx,
        &mut app,
        raw_input(
            0.1,
            vec![egui::Event::PointerMoved(click_pos), primary(click_pos, true)],
        ),
    );

    assert_eq!(app.interaction.selected_item, Some(id));
    assert_eq!(app.interaction.dragging_item, Some(id));
}

/// Hovers the rotate-clockwise control of a selected square at `center`, then
/// presses it at t = 1.0. Returns the control position.
fn press_rotate_control(
    ctx: &egui::Context,
    app: &mut FloorMapApp,
    id: ItemId,
    center: egui::Pos2,
) -> egui::Pos2 {
    app.interaction.selected_item = Some(id);
    let size = app.floor_map.get(id).unwrap().data.size;
    let reach = 0.5 * size.width.hypot(size.height);
    let control_pos = control_anchor(NodeControl::RotateCw, center, reach);

    // Selected frame registers the controls under the cursor
    run_canvas_frame(
        ctx,
        app,
        raw_input(0.0, vec![egui::Event::PointerMoved(control_pos)]),
    );
    run_canvas_frame(
        ctx,
        app,
        raw_input(
            1.0,
            vec![egui::Event::PointerMoved(control_pos), primary(control_pos, true)],
        ),
    );
    control_pos
}

#[test]
fn holding_rotate_control_repeats_and_commits_on_deselect() {
    let (mut app, id) = app_with_square((300.0, 300.0));
    let ctx = egui::Context::default();
    let control_pos = press_rotate_control(&ctx, &mut app, id, egui::pos2(300.0, 300.0));

    run_canvas_frame(&ctx, &mut app, raw_input(1.2, vec![]));
    run_canvas_frame(&ctx, &mut app, raw_input(1.4, vec![]));
    run_canvas_frame(
        &ctx,
        &mut app,
        raw_input(1.45, vec![primary(control_pos, false)]),
    );

    assert_eq!(app.nodes[&id].state().rotate_angle, 45.0);
    assert_eq!(app.interaction.selected_item, Some(id));
    assert_eq!(app.floor_map.get(id).unwrap().data.rotate_angle, 0.0);

    // Deselecting commits the local angle
    app.interaction.selected_item = None;
    run_canvas_frame(&ctx, &mut app, raw_input(2.0, vec![]));
    assert_eq!(app.floor_map.get(id).unwrap().data.rotate_angle, 45.0);
    assert!(!app.nodes[&id].has_pending_edits());
}

#[test]
fn leaving_a_held_control_stops_repeating() {
    let (mut app, id) = app_with_square((300.0, 300.0));
    let ctx = egui::Context::default();
    press_rotate_control(&ctx, &mut app, id, egui::pos2(300.0, 300.0));
    assert_eq!(app.nodes[&id].state().rotate_angle, 15.0);

    // Button stays down while the pointer moves to empty canvas
    let away = egui::pos2(900.0, 650.0);
    run_canvas_frame(
        &ctx,
        &mut app,
        raw_input(1.1, vec![egui::Event::PointerMoved(away)]),
    );
    assert!(!app.nodes[&id].is_holding());
    assert_eq!(app.nodes[&id].next_fire_in(1.1), None);

    for t in [1.5, 2.0, 3.0] {
        run_canvas_frame(&ctx, &mut app, raw_input(t, vec![]));
    }
    assert_eq!(app.nodes[&id].state().rotate_angle, 15.0);
    assert_eq!(app.nodes[&id].next_fire_in(3.0), None);
}

#[test]
fn deselecting_mid_hold_releases_and_commits() {
    let (mut app, id) = app_with_square((300.0, 300.0));
    let ctx = egui::Context::default();
    press_rotate_control(&ctx, &mut app, id, egui::pos2(300.0, 300.0));
    run_canvas_frame(&ctx, &mut app, raw_input(1.2, vec![]));
    assert_eq!(app.nodes[&id].state().rotate_angle, 30.0);

    app.interaction.selected_item = None;
    run_canvas_frame(&ctx, &mut app, raw_input(1.3, vec![]));
    assert!(!app.nodes[&id].is_holding());
    assert_eq!(app.nodes[&id].next_fire_in(1.3), None);
    assert_eq!(app.floor_map.get(id).unwrap().data.rotate_angle, 30.0);

    for t in [1.6, 2.0] {
        run_canvas_frame(&ctx, &mut app, raw_input(t, vec![]));
    }
    assert_eq!(app.nodes[&id].state().rotate_angle, 30.0);
    assert_eq!(app.floor_map.get(id).unwrap().data.rotate_angle, 30.0);
}

#[test]
fn deleting_an_item_mid_hold_unmounts_its_node() {
    let (mut app, id) = app_with_square((300.0, 300.0));
    let ctx = egui::Context::default();
    press_rotate_control(&ctx, &mut app, id, egui::pos2(300.0, 300.0));
    assert!(app.nodes[&id].is_holding());

    app.delete_selected();
    for t in [1.2, 1.6, 2.0] {
        run_canvas_frame(&ctx, &mut app, raw_input(t, vec![]));
    }
    assert!(!app.nodes.contains_key(&id));
    assert!(app.floor_map.is_empty());
}

#[test]
fn delete_key_removes_selected_item() {
    let (mut app, id) = app_with_square((0.0, 0.0));
    app.interaction.selected_item = Some(id);

    let ctx = egui::Context::default();
    let raw = raw_input(
        0.0,
        vec![egui::Event::Key {
            key: egui::Key::Delete,
            physical_key: Some(egui::Key::Delete),
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }],
    );
    let _ = ctx.run(raw, |ctx| app.handle_delete_key(ctx));

    assert!(app.floor_map.is_empty());
    assert_eq!(app.interaction.selected_item, None);
}

#[test]
fn loading_a_layout_replaces_items_and_nodes() {
    let (mut app, id) = app_with_square((0.0, 0.0));
    let ctx = egui::Context::default();
    run_canvas_frame(&ctx, &mut app, raw_input(0.0, vec![]));
    assert!(app.nodes.contains_key(&id));

    app.load_layout(crate::layouts::LayoutKind::Warehouse);
    assert!(!app.floor_map.contains(id));
    assert!(app.nodes.is_empty());
    assert_eq!(app.layout, crate::layouts::LayoutKind::Warehouse);
}

#[test]
fn switching_to_edit_policy_flushes_mounted_nodes() {
    let (mut app, id) = app_with_square((0.0, 0.0));
    app.reconcile_nodes();
    app.nodes
        .get_mut(&id)
        .unwrap()
        .set_label("Kitchen", &mut app.floor_map);
    assert_eq!(app.floor_map.get(id).unwrap().data.label, "");

    app.commit_policy = crate::sync::CommitPolicy::OnEdit;
    app.apply_node_settings();
    assert_eq!(app.floor_map.get(id).unwrap().data.label, "Kitchen");
}

#[test]
fn ui_preferences_round_trip_without_items() {
    let (mut app, _) = app_with_square((0.0, 0.0));
    app.dark_mode = false;
    app.node_config.rotate_unit = 30.0;

    let json = app.to_json().unwrap();
    let restored = FloorMapApp::from_json(&json).unwrap();
    assert!(!restored.dark_mode);
    assert_eq!(restored.node_config.rotate_unit, 30.0);
    assert!(restored.floor_map.is_empty());
}

#[test]
fn stored_zero_repeat_interval_falls_back_to_default() {
    let mut stored = FloorMapApp::default();
    stored.node_config.repeat_interval_ms = 0;
    stored.node_config.size_unit = 5.0;
    let json = stored.to_json().unwrap();

    let mut app = FloorMapApp::from_json(&json).unwrap();
    assert_eq!(
        app.node_config.repeat_interval_ms,
        crate::constants::REPEAT_INTERVAL_MS
    );
    assert_eq!(app.node_config.size_unit, 5.0);

    let id = app.floor_map.add_item(Item::circle((0.0, 0.0))).unwrap();
    app.reconcile_nodes();
    assert!(app.nodes.contains_key(&id));
}
