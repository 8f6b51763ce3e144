// File: crates/kbar-core/src/lib.rs
// Summary: Charting core entry point; exports the OHLCV frame, overlay/style builders and `plot`.

pub mod error;
pub mod figure;
pub mod frame;
pub mod layout;
pub mod options;
pub mod overlay;
pub mod render;
pub mod scale;
pub mod series;
pub mod style;
pub mod text;

pub use error::{PlotError, PlotResult};
pub use figure::{Axes, Figure, PanelRole};
pub use frame::{date_range, Candle, OhlcvFrame};
pub use options::{ChartType, PlotOptions, PlotRequest};
pub use overlay::{LineStyle, Overlay, OverlayKind, OverlayOptions, PlotData};
pub use render::plot;
pub use series::Series;
pub use style::{parse_color, ChartStyle, ChartStyleBuilder, MarketColors, UpDown};
pub use text::TextShaper;

pub use skia_safe::textlayout::FontCollection;
pub use skia_safe::Color;
