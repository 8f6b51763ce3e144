// File: crates/kbar-core/src/error.rs
// Summary: Error type shared by frame construction, overlay building and rendering.

use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    /// Overlay data must be a series, a value array or a set of columns.
    #[error("invalid plot data: expected a series, array or columns, got {found}")]
    InvalidPlotData { found: &'static str },

    #[error("column `{column}` has {actual} rows, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("no data to plot")]
    EmptyData,

    #[error("volume panel requested but the frame has no volume column")]
    MissingVolume,

    #[error("overlay #{overlay} has {actual} rows but the frame has {expected}")]
    OverlayLength {
        overlay: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid datetime format `{format}`")]
    InvalidDateFormat { format: String },

    #[error("invalid figure size: {width}x{height} px")]
    InvalidFigure { width: i32, height: i32 },

    #[error("failed to create raster surface")]
    Surface,

    #[error("png encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
