use std::path::Path;
use std::sync::mpsc;

use tilecut_core::config::SessionConfig;
use tilecut_core::history::CropRecord;
use tilecut_core::io::paths::reference_dir;
use tilecut_core::navigation::{Direction, NavOutcome};
use tilecut_core::session::{CommitOutcome, EditorSession, NavReport};
use tilecut_core::sync::SyncEvent;

use crate::panels;
use crate::states::{PaneState, UIState};

pub struct TilecutApp {
    pub primary: PaneState,
    pub reference: PaneState,
    /// Commit events from the primary session, applied to the reference pane.
    pub sync_rx: mpsc::Receiver<SyncEvent>,
    pub ui_state: UIState,
    pub config: SessionConfig,
    pub show_about: bool,
}

impl TilecutApp {
    pub fn new() -> Self {
        let config = SessionConfig::default();
        let mut primary = EditorSession::primary(&config);
        let sync_rx = primary.subscribe();

        Self {
            primary: PaneState::new(primary),
            reference: PaneState::new(EditorSession::reference(&config)),
            sync_rx,
            ui_state: UIState::default(),
            config,
            show_about: false,
        }
    }

    pub fn open_primary_folder(&mut self, ctx: &egui::Context, dir: &Path) {
        match self.primary.session.open_folder(dir) {
            Ok(report) => {
                log_skipped(&mut self.ui_state, &report);
                self.primary.reload_texture(ctx);
                self.ui_state.add_log(format!(
                    "Opened {} ({} images)",
                    dir.display(),
                    self.primary.session.images().len()
                ));
                self.route_reference_output();
            }
            Err(e) => self
                .ui_state
                .add_log(format!("ERROR: cannot open {}: {e}", dir.display())),
        }
    }

    pub fn open_reference_folder(&mut self, ctx: &egui::Context, dir: &Path) {
        match self.reference.session.open_folder(dir) {
            Ok(report) => {
                log_skipped(&mut self.ui_state, &report);
                self.reference.reload_texture(ctx);
                self.ui_state.add_log(format!(
                    "Reference: opened {} ({} images)",
                    dir.display(),
                    self.reference.session.images().len()
                ));
                self.route_reference_output();
                self.ui_state.show_reference = true;
            }
            Err(e) => self
                .ui_state
                .add_log(format!("ERROR: cannot open {}: {e}", dir.display())),
        }
    }

    /// Reference crops land in a subfolder of the primary output folder.
    fn route_reference_output(&mut self) {
        if let Some(out) = self.primary.session.output_dir() {
            let dir = reference_dir(out, &self.config.reference_subfolder);
            self.reference.session.set_output_dir(dir);
        }
    }

    /// Commit the primary selection, then replay it on the reference pane
    /// before the frame ends.
    pub fn confirm_crop(&mut self) {
        match self.primary.session.confirm_crop() {
            Ok(CommitOutcome::Committed(record)) => {
                log_replaced(&mut self.ui_state, &record);
                self.ui_state.add_log(format!(
                    "Crop #{} saved: {}",
                    record.sequence,
                    record.output_path.display()
                ));
                self.primary.mark_preview_dirty();
            }
            Ok(CommitOutcome::NoSelection) => {
                self.ui_state
                    .add_log("Nothing to crop: click the image to place a box".into());
            }
            Ok(CommitOutcome::NoImage) => {
                self.ui_state.add_log("Nothing to crop: open a folder first".into());
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: crop failed: {e}")),
        }
        self.drain_sync();
    }

    fn drain_sync(&mut self) {
        while let Ok(event) = self.sync_rx.try_recv() {
            match self.reference.session.apply_sync(event) {
                Ok(CommitOutcome::Committed(record)) => {
                    log_replaced(&mut self.ui_state, &record);
                    self.ui_state.add_log(format!(
                        "Reference crop #{} saved: {}",
                        record.sequence,
                        record.output_path.display()
                    ));
                }
                Ok(CommitOutcome::NoImage) => self.ui_state.add_log(format!(
                    "WARN: reference crop #{} skipped: no reference image loaded",
                    event.sequence
                )),
                Ok(CommitOutcome::NoSelection) => self.ui_state.add_log(format!(
                    "WARN: reference crop #{} skipped: no box placed",
                    event.sequence
                )),
                Err(e) => self.ui_state.add_log(format!(
                    "ERROR: reference crop #{} failed: {e}",
                    event.sequence
                )),
            }
        }
    }

    pub fn navigate_primary(&mut self, ctx: &egui::Context, direction: Direction) {
        navigate_pane(ctx, &mut self.primary, &mut self.ui_state, direction);
    }

    pub fn navigate_reference(&mut self, ctx: &egui::Context, direction: Direction) {
        navigate_pane(ctx, &mut self.reference, &mut self.ui_state, direction);
    }

    /// Rename the reference image after the primary image's stem.
    pub fn match_reference_name(&mut self) {
        let Some(stem) = self.primary.session.image_ref().map(|img| img.stem()) else {
            self.ui_state
                .add_log("Cannot match: no primary image loaded".into());
            return;
        };
        match self.reference.session.match_to(&stem) {
            Ok(path) => self
                .ui_state
                .add_log(format!("Reference renamed to {}", path.display())),
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    /// Install new settings in both panes.
    pub fn apply_config(&mut self, config: SessionConfig) {
        self.primary.session.apply_config(&config);
        self.reference.session.apply_config(&config);
        self.primary.mark_preview_dirty();
        self.config = config;
        self.route_reference_output();
    }
}

fn navigate_pane(
    ctx: &egui::Context,
    pane: &mut PaneState,
    ui_state: &mut UIState,
    direction: Direction,
) {
    if pane.session.image().is_none() {
        return;
    }
    let report = pane.session.navigate(direction);
    log_skipped(ui_state, &report);
    match report.outcome {
        NavOutcome::Moved(_) => pane.reload_texture(ctx),
        NavOutcome::AtStart => ui_state.add_log(format!("{}: already at the first image", pane.title())),
        NavOutcome::AtEnd => ui_state.add_log(format!("{}: already at the last image", pane.title())),
    }
}

fn log_replaced(ui_state: &mut UIState, record: &CropRecord) {
    if record.replaced {
        ui_state.add_log(format!(
            "WARN: overwrote existing {}",
            record.output_path.display()
        ));
    }
}

fn log_skipped(ui_state: &mut UIState, report: &NavReport) {
    for (path, reason) in &report.skipped {
        ui_state.add_log(format!("Skipped {}: {reason}", path.display()));
    }
}

impl eframe::App for TilecutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::reference::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Tilecut")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Tilecut");
                        ui.label("Fixed-size tile cropping with a paired reference view");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecut_core::geometry::Point;

    fn folder_with_image(name: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::new(1000, 800)
            .save(dir.path().join(name))
            .unwrap();
        dir
    }

    #[test]
    fn commit_without_reference_image_is_logged() {
        let ctx = egui::Context::default();
        let dir = folder_with_image("a.png");
        let mut app = TilecutApp::new();
        app.open_primary_folder(&ctx, dir.path());

        app.primary.session.pointer_down(Point::new(100.0, 100.0));
        app.primary.session.pointer_up();
        app.confirm_crop();

        let log = &app.ui_state.log_messages;
        assert!(log.iter().any(|m| m.starts_with("Crop #1 saved")), "{log:?}");
        assert!(
            log.iter()
                .any(|m| m == "WARN: reference crop #1 skipped: no reference image loaded"),
            "{log:?}"
        );
    }

    #[test]
    fn commit_is_replayed_on_reference_pane() {
        let ctx = egui::Context::default();
        let primary = folder_with_image("a.png");
        let reference = folder_with_image("a_ir.png");
        let mut app = TilecutApp::new();
        app.open_primary_folder(&ctx, primary.path());
        app.open_reference_folder(&ctx, reference.path());

        app.primary.session.pointer_down(Point::new(100.0, 100.0));
        app.confirm_crop();

        assert_eq!(app.reference.session.history().len(), 1);
        assert!(primary
            .path()
            .join("cutoff")
            .join("reference")
            .join("a_ir_cut_1.png")
            .exists());
    }
}
