use crate::app::TilecutApp;

pub fn show(ctx: &egui::Context, app: &mut TilecutApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            let session = &app.primary.session;
            if let Some(img) = session.image_ref() {
                ui.label(format!("{}x{}", img.width(), img.height()));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", session.viewport().zoom() * 100.0));
            ui.separator();
            ui.label(format!("Box: {}", session.selection().size()));
            ui.separator();
            ui.label(format!("Zoom on navigate: {}", app.config.zoom_policy));
            if let Some(out) = session.output_dir() {
                ui.separator();
                ui.label(format!("Output: {}", out.display()));
            }
        });

        ui.add_space(2.0);
    });
}
