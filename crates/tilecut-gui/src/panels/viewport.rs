use tracing::debug;

use crate::app::TilecutApp;
use crate::panels::crop_interaction;
use crate::states::{PaneState, UIState};

pub fn show(ctx: &egui::Context, app: &mut TilecutApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        show_pane(ui, rect, &mut app.primary, &mut app.ui_state, app.config.zoom_step, true);
    });
    handle_zoom_keys(ctx, &mut app.primary, app.config.zoom_step);
}

/// Draw one pane into `rect` and route its input. `editable` panes accept
/// selection drags; the others only zoom and pan.
pub fn show_pane(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    pane: &mut PaneState,
    ui_state: &mut UIState,
    zoom_step: f64,
    editable: bool,
) {
    paint_background(ui, rect);
    pane.session
        .refit([f64::from(rect.width()), f64::from(rect.height())]);
    let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

    let Some(texture_id) = pane.texture.as_ref().map(|t| t.id()) else {
        show_placeholder(ui, rect, pane.title());
        return;
    };

    handle_zoom(ui, &response, pane, zoom_step);
    handle_pan(ui, &response, pane);
    if editable {
        crop_interaction::handle_selection(ui, &response, pane, ui_state);
    }

    let Some(img_rect) = pane.image_rect(rect) else {
        return;
    };
    let painter = ui.painter_at(rect);
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    crop_interaction::draw_overlay(&painter, pane, img_rect);
    draw_viewing_label(&painter, rect, &pane.position_label());
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Scroll distance, in points, that makes one zoom step.
const SCROLL_PER_STEP: f32 = 50.0;

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, pane: &mut PaneState, zoom_step: f64) {
    if !response.hovered() {
        pane.scroll_accum = 0.0;
        return;
    }
    let delta = ui.input(|i| i.smooth_scroll_delta.y);
    let steps = zoom_steps(&mut pane.scroll_accum, delta);
    for _ in 0..steps.unsigned_abs() {
        step_zoom(pane, zoom_step * f64::from(steps.signum()));
    }
}

/// Add `delta` to the accumulator and take out whole zoom steps, keeping the
/// remainder for later frames.
fn zoom_steps(accum: &mut f32, delta: f32) -> i32 {
    *accum += delta;
    let steps = (*accum / SCROLL_PER_STEP).trunc();
    *accum -= steps * SCROLL_PER_STEP;
    steps as i32
}

fn handle_zoom_keys(ctx: &egui::Context, pane: &mut PaneState, zoom_step: f64) {
    let (zoom_in, zoom_out) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
            i.key_pressed(egui::Key::Minus),
        )
    });
    if zoom_in {
        step_zoom(pane, zoom_step);
    }
    if zoom_out {
        step_zoom(pane, -zoom_step);
    }
}

/// Zoom about the panel center: the pan offset scales with the zoom.
fn step_zoom(pane: &mut PaneState, step: f64) {
    let before = pane.session.viewport().zoom();
    match pane.session.zoom_by(step) {
        Ok(after) => pane.pan_offset *= (after / before) as f32,
        Err(e) => debug!("{}: {e}", pane.title()),
    }
}

fn handle_pan(ui: &egui::Ui, response: &egui::Response, pane: &mut PaneState) {
    if response.dragged_by(egui::PointerButton::Middle)
        || response.dragged_by(egui::PointerButton::Secondary)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command))
    {
        pane.pan_offset += response.drag_delta();
    }
}

fn draw_viewing_label(painter: &egui::Painter, rect: egui::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    painter.text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect, title: &str) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("{title}: open a folder to begin"),
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
