use tracing::debug;

use crate::error::{Result, TilecutError};
use crate::geometry::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

/// Window size substituted while the real one is still degenerate (initial layout).
pub const FALLBACK_WINDOW: [f64; 2] = [800.0, 600.0];

/// Slack for accumulated rounding when zoom is stepped in 0.1 increments.
const ZOOM_TOLERANCE: f64 = 1e-9;

/// Scale that fits the whole image inside the window, preserving aspect ratio.
pub fn compute_fit_scale(window: [f64; 2], image: [f64; 2]) -> f64 {
    let [w, h] = if window[0] <= 0.0 || window[1] <= 0.0 {
        FALLBACK_WINDOW
    } else {
        window
    };
    if image[0] <= 0.0 || image[1] <= 0.0 {
        return 1.0;
    }
    (w / image[0]).min(h / image[1])
}

/// `fit_scale x zoom` for the given window and image.
pub fn compute_scale(window: [f64; 2], image: [f64; 2], zoom: f64) -> f64 {
    compute_fit_scale(window, image) * zoom
}

/// Mapping between source pixels and display coordinates for one viewport.
///
/// `fit_scale` is derived from the current window and image every time either
/// changes; only `zoom` is user state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    fit_scale: f64,
    zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            fit_scale: 1.0,
            zoom: 1.0,
        }
    }
}

impl ViewportState {
    pub fn new(window: [f64; 2], image: [f64; 2]) -> Self {
        Self {
            fit_scale: compute_fit_scale(window, image),
            zoom: 1.0,
        }
    }

    /// Recompute the fit scale after a resize or image change.
    pub fn refit(&mut self, window: [f64; 2], image: [f64; 2]) {
        self.fit_scale = compute_fit_scale(window, image);
    }

    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn effective_scale(&self) -> f64 {
        self.fit_scale * self.zoom
    }

    pub fn to_display(&self, source: Point) -> Point {
        source.scaled(self.effective_scale())
    }

    pub fn to_source(&self, display: Point) -> Point {
        source_from_display(display, self.effective_scale())
    }

    /// Set the zoom factor. Values outside `[MIN_ZOOM, MAX_ZOOM]` are rejected
    /// and leave the state unchanged.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<f64> {
        if !zoom.is_finite()
            || zoom < MIN_ZOOM - ZOOM_TOLERANCE
            || zoom > MAX_ZOOM + ZOOM_TOLERANCE
        {
            debug!("Rejected zoom {zoom:.3}");
            return Err(TilecutError::ZoomOutOfRange(zoom));
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Ok(self.zoom)
    }

    pub fn zoom_by(&mut self, step: f64) -> Result<f64> {
        self.set_zoom(self.zoom + step)
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }
}

fn source_from_display(display: Point, scale: f64) -> Point {
    Point::new(display.x / scale, display.y / scale)
}
