use crate::geometry::PixelRect;

/// Result of translating a rectangle back inside the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClampOutcome {
    pub rect: PixelRect,
    pub dx: i64,
    pub dy: i64,
}

impl ClampOutcome {
    pub fn corrected(&self) -> bool {
        self.dx != 0 || self.dy != 0
    }

    /// False only when the box is larger than the image on some axis, in which
    /// case the single-sided shift cannot bring both edges inside.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.rect.is_within(width, height)
    }
}

/// Translate `rect` so that it lies inside a `width x height` image.
///
/// Each axis is handled on its own: a left/top overflow shifts the box
/// right/down, otherwise a right/bottom overflow shifts it left/up. Both shifts
/// are applied as one translation, so the box keeps its size. A box larger than
/// the image overflows both sides of an axis and is only corrected on the
/// leading side.
pub fn clamp_to_bounds(rect: PixelRect, width: u32, height: u32) -> ClampOutcome {
    let dx = axis_shift(rect.x1, rect.x2, i64::from(width));
    let dy = axis_shift(rect.y1, rect.y2, i64::from(height));
    ClampOutcome {
        rect: rect.translate(dx, dy),
        dx,
        dy,
    }
}

fn axis_shift(lo: i64, hi: i64, limit: i64) -> i64 {
    if lo < 0 {
        -lo
    } else if hi > limit {
        limit - hi
    } else {
        0
    }
}
