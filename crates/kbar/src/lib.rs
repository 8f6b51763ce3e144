// File: crates/kbar/src/lib.rs
// Summary: CJK-aware candlestick charts; font resolver, host detection and the `KBar` facade.

pub mod config;
pub mod error;
pub mod host;
pub mod install;
pub mod kbar;
pub mod registry;
pub mod resolver;
pub mod telemetry;

pub use config::ResolverConfig;
pub use error::{ConfigError, FontError, KBarError, KBarResult};
pub use host::HostEnvironment;
pub use install::{FontInstaller, SystemInstaller};
pub use kbar::{KBar, TextConfig};
pub use registry::{FontRegistry, SkiaFontRegistry, StaticFontRegistry};
pub use resolver::{check_font, detect_font, FontResolution, FontResolver, InstallMethod};

pub use kbar_core::{
    date_range, Figure, LineStyle, OhlcvFrame, OverlayKind, OverlayOptions, PanelRole, PlotData, PlotError,
    PlotOptions, Series,
};
