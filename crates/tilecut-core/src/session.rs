use std::path::{Path, PathBuf};
use std::sync::mpsc;

use image::DynamicImage;
use tracing::{info, warn};

use crate::clamp::ClampOutcome;
use crate::config::{SessionConfig, ZoomPolicy};
use crate::error::{Result, TilecutError};
use crate::geometry::Point;
use crate::history::{CropHistory, CropRecord};
use crate::io::image_io::{load_image, preview_thumbnail, save_crop};
use crate::io::paths::{crop_output_path, cutoff_dir, rename_to_match};
use crate::navigation::{Direction, ImageList, NavOutcome};
use crate::selection::{BoxSize, SelectionController};
use crate::source::{ImageRef, LoadedImage};
use crate::sync::{SyncBroadcaster, SyncEvent, SyncSink};
use crate::viewport::ViewportState;

/// Which of the two paired editors a session drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportRole {
    /// Operator-driven; owns the output folder and numbers the crops.
    Primary,
    /// Follows primary commits on a spatially registered image.
    Reference,
}

impl ViewportRole {
    pub fn box_size(&self, config: &SessionConfig) -> BoxSize {
        match self {
            Self::Primary => config.primary_box,
            Self::Reference => config.reference_box,
        }
    }
}

/// Result of a commit request. Missing preconditions are outcomes, not errors.
#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    Committed(CropRecord),
    NoSelection,
    NoImage,
}

/// Result of a navigation request.
#[derive(Clone, Debug, PartialEq)]
pub struct NavReport {
    pub outcome: NavOutcome,
    /// Files that failed to decode and were stepped over, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Everything one viewport owns while the operator works through a folder.
///
/// Two sessions never share state; the only link between them is the
/// [`SyncEvent`] a primary session broadcasts on commit.
#[derive(Debug)]
pub struct EditorSession {
    role: ViewportRole,
    config: SessionConfig,
    folder: Option<PathBuf>,
    images: ImageList,
    current: Option<LoadedImage>,
    window: [f64; 2],
    viewport: ViewportState,
    selection: SelectionController,
    history: CropHistory,
    output_dir: Option<PathBuf>,
    broadcaster: SyncBroadcaster,
}

impl EditorSession {
    pub fn new(role: ViewportRole, config: &SessionConfig) -> Self {
        Self {
            role,
            config: config.clone(),
            folder: None,
            images: ImageList::default(),
            current: None,
            window: config.fallback_window,
            viewport: ViewportState::default(),
            selection: SelectionController::new(role.box_size(config)),
            history: CropHistory::new(),
            output_dir: None,
            broadcaster: SyncBroadcaster::new(),
        }
    }

    pub fn primary(config: &SessionConfig) -> Self {
        Self::new(ViewportRole::Primary, config)
    }

    pub fn reference(config: &SessionConfig) -> Self {
        Self::new(ViewportRole::Reference, config)
    }

    /// Swap in new settings. A changed box size drops the active selection.
    pub fn apply_config(&mut self, config: &SessionConfig) {
        let size = self.role.box_size(config);
        if size != self.selection.size() {
            self.selection = SelectionController::new(size);
        }
        self.config = config.clone();
    }

    pub fn role(&self) -> ViewportRole {
        self.role
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.current.as_ref().map(|img| &img.info)
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn history(&self) -> &CropHistory {
        &self.history
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Load a folder and show its first readable image. On error the session
    /// is left as it was.
    pub fn open_folder(&mut self, dir: &Path) -> Result<NavReport> {
        let mut list = ImageList::from_folder(dir)?;

        let mut skipped = Vec::new();
        let mut found = None;
        for (i, path) in list.files().iter().enumerate() {
            match load_image(path) {
                Ok(loaded) => {
                    found = Some((i, loaded));
                    break;
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    skipped.push((path.clone(), e.to_string()));
                }
            }
        }
        let Some((index, loaded)) = found else {
            return Err(TilecutError::NoImages(dir.to_path_buf()));
        };

        if self.role == ViewportRole::Primary {
            let out = cutoff_dir(dir, &self.config.output_folder_name);
            std::fs::create_dir_all(&out)?;
            self.output_dir = Some(out);
        }

        list.jump_to(index);
        info!(
            "Opened {} ({} images) as {:?}",
            dir.display(),
            list.len(),
            self.role
        );
        self.images = list;
        self.folder = Some(dir.to_path_buf());
        self.viewport.reset_zoom();
        self.show(loaded);

        Ok(NavReport {
            outcome: NavOutcome::Moved(index),
            skipped,
        })
    }

    /// Where committed crops go. The primary sets its own on `open_folder`;
    /// a reference session gets it from the app.
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = Some(dir.into());
    }

    /// Recompute the fit scale for the current window size.
    pub fn refit(&mut self, window: [f64; 2]) {
        self.window = if window[0] <= 0.0 || window[1] <= 0.0 {
            self.config.fallback_window
        } else {
            window
        };
        if let Some(img) = &self.current {
            self.viewport.refit(self.window, img.info.size());
        }
    }

    /// Step the zoom by `delta`. Out-of-range requests are rejected unchanged.
    pub fn zoom_by(&mut self, delta: f64) -> Result<f64> {
        if self.current.is_none() {
            return Err(TilecutError::NoActiveImage);
        }
        self.viewport.zoom_by(delta)
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.current.is_some() {
            self.selection.pointer_down(p, &self.viewport);
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.current.is_some() && self.selection.pointer_move(p, &self.viewport)
    }

    pub fn pointer_up(&mut self) -> Option<ClampOutcome> {
        let img = self.current.as_ref()?;
        self.selection.pointer_up(&img.info)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Thumbnail of the crop the current selection would produce.
    pub fn preview(&self) -> Option<DynamicImage> {
        let img = self.current.as_ref()?;
        let sel = self.selection.selection()?;
        Some(preview_thumbnail(
            &img.pixels,
            sel.rect(),
            self.config.preview_size,
        ))
    }

    /// Attach an observer for commit events.
    pub fn attach_sink(&mut self, sink: impl SyncSink + 'static) {
        self.broadcaster.attach(sink);
    }

    /// Attach a channel for commit events and return its receiver.
    pub fn subscribe(&mut self) -> mpsc::Receiver<SyncEvent> {
        self.broadcaster.subscribe()
    }

    /// Clamp and write the active selection, log it, and notify observers.
    ///
    /// If writing fails the selection and history are kept so the operator
    /// can retry.
    pub fn confirm_crop(&mut self) -> Result<CommitOutcome> {
        let Some(img) = self.current.as_ref() else {
            warn!("Crop requested with no image loaded");
            return Ok(CommitOutcome::NoImage);
        };
        let Some(clamped) = self.selection.settle(&img.info) else {
            warn!("Crop requested with no active selection");
            return Ok(CommitOutcome::NoSelection);
        };
        let dir = self.output_dir.as_deref().ok_or(TilecutError::NoOutputDir)?;

        let sequence = self.history.next_sequence();
        let path = crop_output_path(dir, &img.info, sequence);
        std::fs::create_dir_all(dir)?;
        let replaced = warn_if_replacing(&path);
        save_crop(&img.pixels, clamped.rect, &path)?;

        let record = self.history.record(clamped.rect, path, replaced).clone();
        self.selection.clear();
        info!(
            "Crop #{} of {} saved to {}",
            record.sequence,
            img.info.file_name(),
            record.output_path.display()
        );

        let center = clamped.rect.center();
        self.broadcaster.broadcast(SyncEvent {
            center_x: center.x,
            center_y: center.y,
            sequence: record.sequence,
        });

        Ok(CommitOutcome::Committed(record))
    }

    /// Crop this session's image at a center received from the paired
    /// viewport, using this session's own box size and the sender's sequence.
    pub fn apply_sync(&mut self, event: SyncEvent) -> Result<CommitOutcome> {
        let Some(img) = self.current.as_ref() else {
            warn!(
                "Synced crop #{} dropped: no reference image loaded",
                event.sequence
            );
            return Ok(CommitOutcome::NoImage);
        };
        let dir = self.output_dir.as_deref().ok_or(TilecutError::NoOutputDir)?;

        self.selection
            .place_at(Point::new(event.center_x, event.center_y));
        let Some(clamped) = self.selection.settle(&img.info) else {
            return Ok(CommitOutcome::NoSelection);
        };

        let path = crop_output_path(dir, &img.info, event.sequence);
        std::fs::create_dir_all(dir)?;
        let replaced = warn_if_replacing(&path);
        let saved = save_crop(&img.pixels, clamped.rect, &path);
        self.selection.clear();
        saved?;

        let record = self
            .history
            .record_synced(clamped.rect, event.sequence, path, replaced)
            .clone();
        info!(
            "Synced crop #{} saved to {}",
            record.sequence,
            record.output_path.display()
        );
        Ok(CommitOutcome::Committed(record))
    }

    /// Move to the adjacent image, stepping over files that fail to decode.
    ///
    /// At either end of the folder nothing changes and the outcome reports the
    /// boundary.
    pub fn navigate(&mut self, direction: Direction) -> NavReport {
        let start = self.images.position();
        let mut skipped = Vec::new();

        loop {
            let outcome = self.images.step(direction);
            if !outcome.moved() {
                self.images.jump_to(start);
                info!("Navigation stopped at {outcome:?}");
                return NavReport { outcome, skipped };
            }

            let Some(path) = self.images.current().map(Path::to_path_buf) else {
                self.images.jump_to(start);
                return NavReport { outcome, skipped };
            };
            match load_image(&path) {
                Ok(loaded) => {
                    if self.config.zoom_policy == ZoomPolicy::Reset {
                        self.viewport.reset_zoom();
                    }
                    self.show(loaded);
                    return NavReport { outcome, skipped };
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", path.display());
                    skipped.push((path, e.to_string()));
                }
            }
        }
    }

    /// Rename the current image to `<primary_stem><match_suffix><ext>`.
    pub fn match_to(&mut self, primary_stem: &str) -> Result<PathBuf> {
        let img = self.current.take().ok_or(TilecutError::NoActiveImage)?;
        match rename_to_match(img.info.path(), primary_stem, &self.config.match_suffix) {
            Ok(target) => {
                self.images.replace_current(target.clone());
                self.current = Some(LoadedImage::new(target.clone(), img.pixels));
                Ok(target)
            }
            Err(e) => {
                self.current = Some(img);
                Err(e)
            }
        }
    }

    /// Replace the displayed image and drop everything tied to the old one.
    /// Files already written stay on disk.
    fn show(&mut self, loaded: LoadedImage) {
        self.history.reset();
        self.selection.clear();
        self.viewport.refit(self.window, loaded.info.size());
        self.current = Some(loaded);
    }
}

/// Sequence numbers restart per image, so a revisited image writes over its
/// earlier crops.
fn warn_if_replacing(path: &Path) -> bool {
    let exists = path.exists();
    if exists {
        warn!("Overwriting existing crop {}", path.display());
    }
    exists
}
