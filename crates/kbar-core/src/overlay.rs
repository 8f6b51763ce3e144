// File: crates/kbar-core/src/overlay.rs
// Summary: Overlay plot descriptors (extra series drawn on or beside the candles).

use skia_safe as skia;

use crate::error::{PlotError, PlotResult};
use crate::series::Series;

/// Loosely typed input accepted by `Overlay::new`.
///
/// Only the array-like shapes can be plotted; the others exist so that
/// callers holding arbitrary values get a type-mismatch error instead of a
/// compile-time dead end.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotData {
    Series(Series),
    Values(Vec<f64>),
    Columns(Vec<Series>),
    Text(String),
    Scalar(f64),
}

impl PlotData {
    pub fn kind(&self) -> &'static str {
        match self {
            PlotData::Series(_) => "series",
            PlotData::Values(_) => "array",
            PlotData::Columns(_) => "columns",
            PlotData::Text(_) => "string",
            PlotData::Scalar(_) => "scalar",
        }
    }
}

impl From<Series> for PlotData {
    fn from(s: Series) -> Self { PlotData::Series(s) }
}

impl From<&Series> for PlotData {
    fn from(s: &Series) -> Self { PlotData::Series(s.clone()) }
}

impl From<Vec<f64>> for PlotData {
    fn from(v: Vec<f64>) -> Self { PlotData::Values(v) }
}

impl From<&[f64]> for PlotData {
    fn from(v: &[f64]) -> Self { PlotData::Values(v.to_vec()) }
}

impl From<Vec<Series>> for PlotData {
    fn from(v: Vec<Series>) -> Self { PlotData::Columns(v) }
}

impl From<&str> for PlotData {
    fn from(s: &str) -> Self { PlotData::Text(s.to_string()) }
}

impl From<String> for PlotData {
    fn from(s: String) -> Self { PlotData::Text(s) }
}

impl From<f64> for PlotData {
    fn from(v: f64) -> Self { PlotData::Scalar(v) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverlayKind {
    #[default]
    Line,
    Scatter,
    Bar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Accepts the short matplotlib spellings (`-`, `--`, `:`, `-.`) and names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "-" | "solid" => Some(LineStyle::Solid),
            "--" | "dashed" => Some(LineStyle::Dashed),
            ":" | "dotted" => Some(LineStyle::Dotted),
            "-." | "dashdot" => Some(LineStyle::DashDot),
            _ => None,
        }
    }

    /// Dash intervals in pixels for a given stroke width; `None` for solid.
    pub fn intervals(&self, width: f32) -> Option<Vec<f32>> {
        let w = width.max(1.0);
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(vec![4.0 * w, 2.0 * w]),
            LineStyle::Dotted => Some(vec![w, 1.5 * w]),
            LineStyle::DashDot => Some(vec![4.0 * w, 1.5 * w, w, 1.5 * w]),
        }
    }
}

/// Styling options for an overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayOptions {
    pub kind: OverlayKind,
    pub color: Option<skia::Color>,
    pub width: f32,
    pub line_style: LineStyle,
    /// 0 = main price panel, 1 = volume panel, 2.. = extra panels.
    pub panel: usize,
    pub alpha: f32,
    pub marker_size: f32,
    pub ylabel: Option<String>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            kind: OverlayKind::Line,
            color: None,
            width: 1.5,
            line_style: LineStyle::Solid,
            panel: 0,
            alpha: 1.0,
            marker_size: 4.0,
            ylabel: None,
        }
    }
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: OverlayKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn color(mut self, color: skia::Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn panel(mut self, panel: usize) -> Self {
        self.panel = panel;
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn marker_size(mut self, size: f32) -> Self {
        self.marker_size = size;
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }
}

/// Validated overlay: one or more equally long columns plus styling.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    columns: Vec<Series>,
    options: OverlayOptions,
}

impl Overlay {
    pub fn new(data: impl Into<PlotData>, options: OverlayOptions) -> PlotResult<Self> {
        let columns = match data.into() {
            PlotData::Series(s) => vec![s],
            PlotData::Values(v) => vec![Series::from(v)],
            PlotData::Columns(cols) if !cols.is_empty() => cols,
            other => return Err(PlotError::InvalidPlotData { found: other.kind() }),
        };
        let expected = columns[0].len();
        if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
            return Err(PlotError::ColumnLength { column: "overlay", expected, actual: bad.len() });
        }
        Ok(Self { columns, options })
    }

    /// Number of rows (length of each column).
    pub fn len(&self) -> usize {
        self.columns.first().map(Series::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.columns
            .iter()
            .filter_map(Series::finite_range)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
    }
}
