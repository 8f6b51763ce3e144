// File: crates/kbar-core/src/layout.rs
// Summary: Figure sizing, panel stacking and tick helpers (pixel math).

/// Output resolution used to turn inch sizes into pixels.
pub const DPI: f32 = 100.0;
/// Default width:height ratio of a figure.
pub const DEFAULT_FIGRATIO: (f32, f32) = (8.0, 5.75);
/// Width in inches that `figratio` is normalised to.
pub const BASE_WIDTH_IN: f32 = 8.0;

/// Screen margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Margins leave room for the title, y labels and rotated date ticks.
    pub fn for_figure(has_title: bool, tight: bool) -> Self {
        let top = match (has_title, tight) {
            (true, true) => 36,
            (true, false) => 56,
            (false, true) => 12,
            (false, false) => 28,
        };
        if tight { Self::new(64, 12, top, 64) } else { Self::new(84, 24, top, 84) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

/// Figure size in pixels from explicit inches or ratio, scaled by `figscale`.
pub fn figure_pixels(
    figsize: Option<(f32, f32)>,
    figratio: Option<(f32, f32)>,
    figscale: Option<f32>,
) -> (i32, i32) {
    let (w_in, h_in) = match figsize {
        Some(size) => size,
        None => {
            let (rw, rh) = figratio.unwrap_or(DEFAULT_FIGRATIO);
            let rw = if rw > 0.0 { rw } else { DEFAULT_FIGRATIO.0 };
            (BASE_WIDTH_IN, BASE_WIDTH_IN * rh / rw)
        }
    };
    let scale = figscale.unwrap_or(1.0);
    ((w_in * scale * DPI).round() as i32, (h_in * scale * DPI).round() as i32)
}

/// Split the plot area vertically into panels by relative height.
/// `gap` pixels separate consecutive panels.
pub fn stack_panels(area: RectI32, ratios: &[f32], gap: i32) -> Vec<RectI32> {
    if ratios.is_empty() {
        return Vec::new();
    }
    let total: f32 = ratios.iter().map(|r| r.max(0.0)).sum::<f32>().max(1e-6);
    let usable = (area.height() - gap * (ratios.len() as i32 - 1)).max(ratios.len() as i32) as f32;
    let mut out = Vec::with_capacity(ratios.len());
    let mut top = area.top as f32;
    for (i, r) in ratios.iter().enumerate() {
        let h = usable * r.max(0.0) / total;
        let bottom = if i + 1 == ratios.len() { area.bottom as f32 } else { top + h };
        out.push(RectI32::from_ltrb(area.left, top.round() as i32, area.right, bottom.round() as i32));
        top = bottom + gap as f32;
    }
    out
}

/// "Nice" tick values (1/2/5 x 10^k steps) covering [min, max].
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min || target == 0 {
        return Vec::new();
    }
    let raw = (max - min) / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let step = mag * if norm < 1.5 { 1.0 } else if norm < 3.0 { 2.0 } else if norm < 7.0 { 5.0 } else { 10.0 };
    let first = (min / step).ceil() * step;
    // Step below the f64 spacing at this magnitude: ticks would not advance.
    if !step.is_finite() || step <= 0.0 || first + step == first {
        return Vec::new();
    }
    let count = (((max - first) / step + 1e-9).floor().max(0.0) as usize).min(target * 4);
    let mut out: Vec<f64> = (0..=count)
        .map(|k| first + step * k as f64)
        .filter(|v| *v <= max + step * 1e-9)
        // snap -0.0 and float drift
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect();
    out.dedup();
    out
}

/// Decimal places needed to print ticks spaced `step` apart.
pub fn tick_precision(ticks: &[f64]) -> usize {
    if ticks.len() < 2 { return 2; }
    let step = (ticks[1] - ticks[0]).abs();
    if step <= 0.0 { return 2; }
    (-step.log10().floor()).max(0.0) as usize
}

/// Every n-th row index so that at most `max_labels` x labels are drawn.
pub fn label_stride(rows: usize, max_labels: usize) -> usize {
    if rows == 0 || max_labels == 0 { return 1; }
    rows.div_ceil(max_labels).max(1)
}
