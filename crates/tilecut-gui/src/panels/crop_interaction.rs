use tilecut_core::geometry::{DisplayRect, PixelRect, Point};

use crate::states::{PaneState, UIState};

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 60, 60);
const OVERFLOW_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 170, 0);
const HISTORY_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 220, 90);

/// Convert a screen position to display coordinates (origin at the image's
/// top-left corner).
pub fn screen_to_display(pos: egui::Pos2, img_rect: egui::Rect) -> Point {
    Point::new(
        f64::from(pos.x - img_rect.left()),
        f64::from(pos.y - img_rect.top()),
    )
}

fn display_to_screen(p: Point, img_rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(
        img_rect.left() + p.x as f32,
        img_rect.top() + p.y as f32,
    )
}

fn display_rect_to_screen(r: &DisplayRect, img_rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        display_to_screen(r.min, img_rect),
        display_to_screen(r.max, img_rect),
    )
}

fn pixel_rect_to_screen(r: &PixelRect, scale: f64, img_rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        display_to_screen(Point::new(r.x1 as f64, r.y1 as f64).scaled(scale), img_rect),
        display_to_screen(Point::new(r.x2 as f64, r.y2 as f64).scaled(scale), img_rect),
    )
}

/// Forward primary-button input to the selection controller and set the
/// cursor icon.
pub fn handle_selection(
    ui: &egui::Ui,
    response: &egui::Response,
    pane: &mut PaneState,
    ui_state: &mut UIState,
) {
    let Some(img_rect) = pane.image_rect(response.rect) else {
        return;
    };
    let (pressed, down, released, pos, command) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            i.modifiers.command,
        )
    });

    if pressed && !command && response.hovered() {
        if let Some(pos) = pos {
            pane.session.pointer_down(screen_to_display(pos, img_rect));
            pane.mark_preview_dirty();
        }
    } else if down && pane.session.selection().is_dragging() {
        if let Some(pos) = pos {
            if pane.session.pointer_move(screen_to_display(pos, img_rect)) {
                pane.mark_preview_dirty();
            }
        }
    }

    if released && pane.session.selection().is_dragging() {
        let outcome = pane.session.pointer_up();
        if let (Some(outcome), Some(img)) = (outcome, pane.session.image_ref()) {
            if !outcome.fits(img.width(), img.height()) {
                ui_state.add_log(format!(
                    "WARN: {} box is larger than the {}x{} image",
                    pane.session.selection().size(),
                    img.width(),
                    img.height()
                ));
            }
        }
        pane.mark_preview_dirty();
    }

    update_cursor(ui, response, pane, img_rect);
}

fn update_cursor(ui: &egui::Ui, response: &egui::Response, pane: &PaneState, img_rect: egui::Rect) {
    if pane.session.selection().is_dragging() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        return;
    }
    let Some(hover) = response.hover_pos() else {
        return;
    };
    let inside = pane.session.selection().selection().is_some_and(|sel| {
        sel.display_rect(pane.session.viewport())
            .contains(screen_to_display(hover, img_rect))
    });
    if inside {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    } else {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
    }
}

/// Committed crops in green with their sequence numbers, then the active
/// selection on top.
pub fn draw_overlay(painter: &egui::Painter, pane: &PaneState, img_rect: egui::Rect) {
    let scale = pane.session.viewport().effective_scale();

    for record in pane.session.history().records() {
        let screen = pixel_rect_to_screen(&record.rect, scale, img_rect);
        painter.rect_stroke(
            screen,
            0.0,
            egui::Stroke::new(1.5, HISTORY_COLOR),
            egui::epaint::StrokeKind::Outside,
        );
        painter.text(
            screen.left_top() + egui::vec2(4.0, 2.0),
            egui::Align2::LEFT_TOP,
            format!("#{}", record.sequence),
            egui::FontId::proportional(13.0),
            HISTORY_COLOR,
        );
    }

    let (Some(sel), Some(img)) = (pane.session.selection().selection(), pane.session.image_ref())
    else {
        return;
    };
    let color = if sel.rect().is_within(img.width(), img.height()) {
        SELECTION_COLOR
    } else {
        OVERFLOW_COLOR
    };
    let screen = display_rect_to_screen(&sel.display_rect(pane.session.viewport()), img_rect);
    painter.rect_stroke(
        screen,
        0.0,
        egui::Stroke::new(2.0, color),
        egui::epaint::StrokeKind::Outside,
    );
    painter.text(
        egui::pos2(screen.right() - 4.0, screen.bottom() + 4.0),
        egui::Align2::RIGHT_TOP,
        sel.size().to_string(),
        egui::FontId::proportional(12.0),
        color,
    );
}
