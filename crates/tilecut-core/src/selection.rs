use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clamp::{clamp_to_bounds, ClampOutcome};
use crate::geometry::{DisplayRect, PixelRect, Point};
use crate::source::ImageRef;
use crate::viewport::ViewportState;

/// Fixed crop size of a viewport, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: u32,
    pub height: u32,
}

impl BoxSize {
    pub const PRIMARY: BoxSize = BoxSize::square(640);
    pub const REFERENCE: BoxSize = BoxSize::square(700);

    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl std::fmt::Display for BoxSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The single candidate crop: a source-space center plus the viewport's fixed size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionBox {
    center: Point,
    size: BoxSize,
}

impl SelectionBox {
    pub fn new(center: Point, size: BoxSize) -> Self {
        Self { center, size }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    /// Source-space corners. The leading corner is floored and the trailing one
    /// derived from it, so the rectangle is always exactly `size`.
    pub fn rect(&self) -> PixelRect {
        let x1 = (self.center.x - f64::from(self.size.width) / 2.0).floor() as i64;
        let y1 = (self.center.y - f64::from(self.size.height) / 2.0).floor() as i64;
        PixelRect::new(
            x1,
            y1,
            x1 + i64::from(self.size.width),
            y1 + i64::from(self.size.height),
        )
    }

    /// On-screen outline; only this changes with zoom.
    pub fn display_rect(&self, viewport: &ViewportState) -> DisplayRect {
        let scale = viewport.effective_scale();
        DisplayRect::from_center_size(
            viewport.to_display(self.center),
            f64::from(self.size.width) * scale,
            f64::from(self.size.height) * scale,
        )
    }
}

/// Interaction state while the pointer button is held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SelectionMode {
    #[default]
    Idle,
    PositioningNew,
    /// `offset` is pointer minus box center, in display space.
    DraggingExisting { offset: Point },
}

/// Owns the one active selection box of a viewport.
#[derive(Clone, Debug)]
pub struct SelectionController {
    size: BoxSize,
    selection: Option<SelectionBox>,
    mode: SelectionMode,
}

impl SelectionController {
    pub fn new(size: BoxSize) -> Self {
        Self {
            size,
            selection: None,
            mode: SelectionMode::Idle,
        }
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    pub fn selection(&self) -> Option<&SelectionBox> {
        self.selection.as_ref()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.mode != SelectionMode::Idle
    }

    /// Start a drag at display point `p`: grab the existing box if `p` is inside
    /// it, otherwise drop a new box centered on `p`.
    pub fn pointer_down(&mut self, p: Point, viewport: &ViewportState) {
        if let Some(sel) = &self.selection {
            let shown = sel.display_rect(viewport);
            if shown.contains(p) {
                self.mode = SelectionMode::DraggingExisting {
                    offset: p.offset_from(shown.center()),
                };
                return;
            }
        }
        self.mode = SelectionMode::PositioningNew;
        self.place_at(viewport.to_source(p));
    }

    /// Follow the pointer. Returns true if the box moved.
    pub fn pointer_move(&mut self, p: Point, viewport: &ViewportState) -> bool {
        let display_center = match self.mode {
            SelectionMode::Idle => return false,
            SelectionMode::PositioningNew => p,
            SelectionMode::DraggingExisting { offset } => p.offset_from(offset),
        };
        self.place_at(viewport.to_source(display_center));
        true
    }

    /// Release the pointer and pull the box back inside the image.
    ///
    /// Returns the clamp outcome when a box exists.
    pub fn pointer_up(&mut self, image: &ImageRef) -> Option<ClampOutcome> {
        self.mode = SelectionMode::Idle;
        self.settle(image)
    }

    /// Clamp the current box against the image without touching the mode.
    pub fn settle(&mut self, image: &ImageRef) -> Option<ClampOutcome> {
        let sel = self.selection.as_mut()?;
        let outcome = clamp_to_bounds(sel.rect(), image.width(), image.height());
        if outcome.corrected() {
            sel.center = outcome.rect.center();
        }
        if !outcome.fits(image.width(), image.height()) {
            warn!(
                "{} box exceeds {}x{} image; left partially outside",
                self.size,
                image.width(),
                image.height()
            );
        }
        Some(outcome)
    }

    /// Put the box at a source-space center, replacing any existing one.
    pub fn place_at(&mut self, center: Point) {
        self.selection = Some(SelectionBox::new(center, self.size));
    }

    pub fn clear(&mut self) {
        self.selection = None;
        self.mode = SelectionMode::Idle;
    }
}
