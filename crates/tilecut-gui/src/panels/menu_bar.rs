use tilecut_core::config::{SessionConfig, ZoomPolicy};

use crate::app::TilecutApp;

pub fn show(ctx: &egui::Context, app: &mut TilecutApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Folder...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_primary_folder(ctx, app);
                }

                if ui.button("Open Reference Folder...").clicked() {
                    ui.close();
                    open_reference_folder(ctx, app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                let mut retain = app.config.zoom_policy == ZoomPolicy::Retain;
                if ui.checkbox(&mut retain, "Keep zoom between images").changed() {
                    let mut config = app.config.clone();
                    config.zoom_policy = if retain { ZoomPolicy::Retain } else { ZoomPolicy::Reset };
                    app.apply_config(config);
                }

                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.apply_config(SessionConfig::default());
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut app.ui_state.show_reference, "Reference window");
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_primary_folder(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub fn open_primary_folder(ctx: &egui::Context, app: &mut TilecutApp) {
    if let Some(dir) = rfd::FileDialog::new().set_title("Open image folder").pick_folder() {
        app.open_primary_folder(ctx, &dir);
    }
}

pub fn open_reference_folder(ctx: &egui::Context, app: &mut TilecutApp) {
    if let Some(dir) = rfd::FileDialog::new().set_title("Open reference folder").pick_folder() {
        app.open_reference_folder(ctx, &dir);
    }
}

fn import_config(app: &mut TilecutApp) {
    let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
        return;
    };
    match SessionConfig::load(&path) {
        Ok(config) => {
            app.apply_config(config);
            app.ui_state.add_log(format!("Config imported from {}", path.display()));
        }
        Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
    }
}

fn export_config(app: &mut TilecutApp) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("TOML", &["toml"])
        .set_file_name("tilecut.toml")
        .save_file()
    else {
        return;
    };
    match app.config.save(&path) {
        Ok(()) => app.ui_state.add_log(format!("Config exported to {}", path.display())),
        Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
    }
}
