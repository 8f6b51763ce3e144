// File: crates/kbar-core/src/scale.rs
// Summary: Row-index (X) and value (Y) transforms from data space to panel pixels.

use crate::layout::RectI32;

/// Horizontal scale over row indices: row `i` sits in the middle of slot `i`.
#[derive(Clone, Copy, Debug)]
pub struct IndexScale {
    pub left_px: f32,
    pub slot_px: f32,
}

impl IndexScale {
    pub fn new(rect: RectI32, rows: usize) -> Self {
        let rows = rows.max(1) as f32;
        Self { left_px: rect.left as f32, slot_px: (rect.width() as f32 / rows).max(0.01) }
    }
    #[inline]
    pub fn to_px(&self, i: usize) -> f32 {
        self.left_px + (i as f32 + 0.5) * self.slot_px
    }
    /// Candle body / volume bar width.
    pub fn body_px(&self) -> f32 {
        (self.slot_px * 0.7).max(1.0)
    }
}

/// Vertical value scale mapping [vmin, vmax] to [bottom, top] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(rect: RectI32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px: rect.top as f32, bottom_px: rect.bottom as f32, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 {
            s.vmin -= 0.5;
            s.vmax += 0.5;
        }
        s
    }

    /// Range padded by `frac` of the span on both ends.
    pub fn padded(rect: RectI32, (lo, hi): (f64, f64), frac: f64) -> Self {
        let m = (hi - lo).abs() * frac;
        Self::new(rect, lo - m, hi + m)
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}
