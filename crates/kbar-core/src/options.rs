// File: crates/kbar-core/src/options.rs
// Summary: Caller-facing plot options and the request bundle consumed by `plot`.

use std::path::PathBuf;

use skia_safe::textlayout::FontCollection;

use crate::overlay::Overlay;
use crate::style::ChartStyle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Candle,
}

/// Options a caller forwards to `plot`. Unset fields use the renderer defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotOptions {
    pub volume: bool,
    /// Moving-average windows over the close column.
    pub mav: Vec<usize>,
    pub title: Option<String>,
    pub ylabel: Option<String>,
    pub ylabel_lower: Option<String>,
    pub figscale: Option<f32>,
    /// Width:height ratio; normalised to an 8 inch wide figure.
    pub figratio: Option<(f32, f32)>,
    /// Explicit size in inches; wins over `figratio`.
    pub figsize: Option<(f32, f32)>,
    pub tight_layout: bool,
    /// Rotation of the x tick labels in degrees.
    pub xrotation: Option<f32>,
    pub returnfig: bool,
    pub savefig: Option<PathBuf>,
    /// chrono format string for x tick labels.
    pub datetime_format: Option<String>,
    /// Relative panel heights, main panel first.
    pub panel_ratios: Option<Vec<f32>>,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(mut self, on: bool) -> Self {
        self.volume = on;
        self
    }

    pub fn mav(mut self, windows: impl IntoIterator<Item = usize>) -> Self {
        self.mav = windows.into_iter().collect();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn ylabel_lower(mut self, label: impl Into<String>) -> Self {
        self.ylabel_lower = Some(label.into());
        self
    }

    pub fn figscale(mut self, scale: f32) -> Self {
        self.figscale = Some(scale);
        self
    }

    pub fn figratio(mut self, w: f32, h: f32) -> Self {
        self.figratio = Some((w, h));
        self
    }

    pub fn figsize(mut self, w: f32, h: f32) -> Self {
        self.figsize = Some((w, h));
        self
    }

    pub fn tight_layout(mut self, on: bool) -> Self {
        self.tight_layout = on;
        self
    }

    pub fn xrotation(mut self, degrees: f32) -> Self {
        self.xrotation = Some(degrees);
        self
    }

    pub fn returnfig(mut self, on: bool) -> Self {
        self.returnfig = on;
        self
    }

    pub fn savefig(mut self, path: impl Into<PathBuf>) -> Self {
        self.savefig = Some(path.into());
        self
    }

    pub fn datetime_format(mut self, fmt: impl Into<String>) -> Self {
        self.datetime_format = Some(fmt.into());
        self
    }

    pub fn panel_ratios(mut self, ratios: impl IntoIterator<Item = f32>) -> Self {
        self.panel_ratios = Some(ratios.into_iter().collect());
        self
    }
}

/// Everything `plot` needs besides the frame.
pub struct PlotRequest<'a> {
    pub chart_type: ChartType,
    pub style: &'a ChartStyle,
    pub overlays: &'a [Overlay],
    pub options: &'a PlotOptions,
    /// Font source for text; `None` uses the system font manager only.
    pub fonts: Option<FontCollection>,
}
