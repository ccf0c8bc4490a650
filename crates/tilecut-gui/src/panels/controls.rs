use tilecut_core::navigation::Direction;

use crate::app::TilecutApp;

const PREVIEW_SIDE: f32 = 100.0;

pub fn show(ctx: &egui::Context, app: &mut TilecutApp) {
    app.primary.refresh_preview(ctx);

    egui::TopBottomPanel::bottom("controls")
        .min_height(PREVIEW_SIDE + 12.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                navigation_section(ctx, ui, app);
                ui.separator();
                crop_section(ui, app);
                ui.separator();
                preview_section(ui, app);
            });
        });

    handle_shortcuts(ctx, app);
}

fn navigation_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut TilecutApp) {
    let has_image = app.primary.session.image().is_some();
    if ui
        .add_enabled(has_image, egui::Button::new("< Prev"))
        .clicked()
    {
        app.navigate_primary(ctx, Direction::Prev);
    }
    if ui
        .add_enabled(has_image, egui::Button::new("Next >"))
        .clicked()
    {
        app.navigate_primary(ctx, Direction::Next);
    }
}

fn crop_section(ui: &mut egui::Ui, app: &mut TilecutApp) {
    let has_selection = app.primary.session.selection().selection().is_some();
    if ui
        .add_enabled(has_selection, egui::Button::new("Confirm crop").shortcut_text("Enter"))
        .clicked()
    {
        app.confirm_crop();
    }
    if ui
        .add_enabled(has_selection, egui::Button::new("Clear"))
        .clicked()
    {
        app.primary.session.clear_selection();
        app.primary.mark_preview_dirty();
    }

    let history = app.primary.session.history();
    ui.vertical(|ui| {
        ui.label(format!("Crops on this image: {}", history.len()));
        ui.small(format!("Next: #{}", history.next_sequence()));
    });
}

fn preview_section(ui: &mut egui::Ui, app: &TilecutApp) {
    match app.primary.preview {
        Some(ref texture) => {
            let size = texture.size_vec2();
            let scale = (PREVIEW_SIDE / size.x.max(size.y)).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        None => {
            ui.add_sized(
                [PREVIEW_SIDE, PREVIEW_SIDE],
                egui::Label::new(egui::RichText::new("No selection").weak()),
            );
        }
    }
}

/// Enter commits, Left/Right navigate the primary pane.
fn handle_shortcuts(ctx: &egui::Context, app: &mut TilecutApp) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let (enter, left, right) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::Enter),
            i.key_pressed(egui::Key::ArrowLeft),
            i.key_pressed(egui::Key::ArrowRight),
        )
    });
    if enter {
        app.confirm_crop();
    }
    if left {
        app.navigate_primary(ctx, Direction::Prev);
    }
    if right {
        app.navigate_primary(ctx, Direction::Next);
    }
}
