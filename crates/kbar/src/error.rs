// File: crates/kbar/src/error.rs
// Summary: Error types for font resolution, configuration and the chart facade.

use std::path::PathBuf;

use kbar_core::PlotError;
use thiserror::Error;

pub type KBarResult<T> = Result<T, KBarError>;

/// Facade errors. Charting failures pass through unchanged.
#[derive(Debug, Error)]
pub enum KBarError {
    #[error(transparent)]
    Plot(#[from] PlotError),
}

/// Why a font install/download/registration step failed.
///
/// These never escape the facade; they are logged and carried inside
/// `FontResolution::Failed`.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("empty command line for {purpose}")]
    EmptyCommand { purpose: &'static str },

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("font download requires the `fetch` feature")]
    FetchDisabled,

    #[error("font file {} is missing", path.display())]
    MissingFile { path: PathBuf },

    #[error("no usable typeface in {}", path.display())]
    NoTypeface { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid resolver config: {0}")]
    Toml(#[from] toml::de::Error),
}
