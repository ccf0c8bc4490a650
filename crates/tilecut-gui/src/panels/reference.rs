use tilecut_core::navigation::Direction;

use crate::app::TilecutApp;
use crate::panels::{menu_bar, viewport};

/// Floating window with the reference pane. Its selection is never edited
/// by hand; it only shows crops replayed from the primary pane.
pub fn show(ctx: &egui::Context, app: &mut TilecutApp) {
    if !app.ui_state.show_reference {
        return;
    }

    let mut open = true;
    egui::Window::new("Reference")
        .open(&mut open)
        .default_size([520.0, 460.0])
        .min_size([320.0, 260.0])
        .resizable(true)
        .show(ctx, |ui| {
            toolbar(ctx, ui, app);
            ui.separator();
            let rect = ui.available_rect_before_wrap();
            viewport::show_pane(
                ui,
                rect,
                &mut app.reference,
                &mut app.ui_state,
                app.config.zoom_step,
                false,
            );
        });
    app.ui_state.show_reference = open;
}

fn toolbar(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut TilecutApp) {
    ui.horizontal(|ui| {
        if ui.button("Open Folder...").clicked() {
            menu_bar::open_reference_folder(ctx, app);
        }

        let has_image = app.reference.session.image().is_some();
        if ui.add_enabled(has_image, egui::Button::new("< Prev")).clicked() {
            app.navigate_reference(ctx, Direction::Prev);
        }
        if ui.add_enabled(has_image, egui::Button::new("Next >")).clicked() {
            app.navigate_reference(ctx, Direction::Next);
        }

        let can_match = has_image && app.primary.session.image().is_some();
        if ui
            .add_enabled(can_match, egui::Button::new("Match filename"))
            .on_hover_text("Rename this image after the primary image")
            .clicked()
        {
            app.match_reference_name();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.small(format!(
                "{} crops, box {}",
                app.reference.session.history().len(),
                app.reference.session.selection().size()
            ));
        });
    });
}
