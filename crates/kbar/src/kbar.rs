// File: crates/kbar/src/kbar.rs
// Summary: Candlestick chart facade: borrows an OHLCV frame, collects overlays, renders with CJK-aware fonts.

use kbar_core::{
    plot, ChartStyle, ChartType, Figure, MarketColors, OhlcvFrame, Overlay, OverlayOptions, PlotData,
    PlotOptions, PlotRequest,
};
use tracing::{info, warn};

use crate::error::KBarResult;
use crate::resolver::FontResolver;

/// Text settings derived from the construction-time font.
#[derive(Clone, Debug, PartialEq)]
pub struct TextConfig {
    /// Chosen font first, then the base sans-serif list minus excluded families.
    pub sans_serif: Vec<String>,
    pub unicode_minus: bool,
}

impl TextConfig {
    pub fn for_font(font: &str, base: &[String], excluded: &[String]) -> Self {
        let mut sans_serif = vec![font.to_string()];
        sans_serif.extend(base.iter().filter(|f| !excluded.contains(f) && f.as_str() != font).cloned());
        Self { sans_serif, unicode_minus: false }
    }
}

pub struct KBar<'a> {
    frame: &'a OhlcvFrame,
    overlays: Vec<Overlay>,
    font: Option<String>,
    text: Option<TextConfig>,
    resolver: FontResolver,
}

impl<'a> KBar<'a> {
    /// Detects (and if needed installs) a CJK font on the running host.
    pub fn new(frame: &'a OhlcvFrame) -> Self {
        Self::with_font(frame, None)
    }

    pub fn with_font(frame: &'a OhlcvFrame, font: Option<&str>) -> Self {
        Self::with_resolver(frame, font, FontResolver::system())
    }

    /// `font` wins over detection; detection runs when it is `None` or empty.
    pub fn with_resolver(frame: &'a OhlcvFrame, font: Option<&str>, mut resolver: FontResolver) -> Self {
        let font = match font.filter(|f| !f.is_empty()) {
            Some(f) => Some(f.to_string()),
            None => resolver.detect().into_family(),
        };
        let text = match &font {
            Some(f) => {
                let cfg = resolver.config();
                let text = TextConfig::for_font(f, &cfg.base_sans_serif, &cfg.excluded_families);
                info!(font = %f, sans_serif = ?text.sans_serif, "text config set");
                Some(text)
            }
            None => {
                warn!("no CJK font resolved, Chinese text may not display");
                None
            }
        };
        Self { frame, overlays: Vec::new(), font, text, resolver }
    }

    pub fn frame(&self) -> &'a OhlcvFrame {
        self.frame
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    pub fn text_config(&self) -> Option<&TextConfig> {
        self.text.as_ref()
    }

    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }

    /// Appends an overlay. Text or scalar data is a type mismatch and leaves the list untouched.
    pub fn add_overlay(&mut self, data: impl Into<PlotData>, options: OverlayOptions) -> KBarResult<()> {
        let overlay = Overlay::new(data, options)?;
        self.overlays.push(overlay);
        Ok(())
    }

    /// Style `plot` renders with: red-up/green-down candles, `check_font`
    /// candidates first, then the remaining construction-time families.
    pub fn chart_style(&self) -> ChartStyle {
        let mut families = self.resolver.check_font(self.font.as_deref());
        if let Some(text) = &self.text {
            for f in &text.sans_serif {
                if !families.contains(f) {
                    families.push(f.clone());
                }
            }
        }
        ChartStyle::builder()
            .market_colors(MarketColors::red_up_green_down())
            .font_families(families)
            .unicode_minus(false)
            .build()
    }

    /// Renders candles plus the collected overlays. `Some(figure)` iff `options.returnfig`.
    ///
    /// `embedding` is kept for callers that distinguish inline display; rendering ignores it.
    pub fn plot(&self, embedding: bool, options: PlotOptions) -> KBarResult<Option<Figure>> {
        let style = self.chart_style();
        info!(
            embedding,
            rows = self.frame.len(),
            overlays = self.overlays.len(),
            fonts = ?&style.font_families[..style.font_families.len().min(3)],
            "plotting candlestick chart"
        );
        let request = PlotRequest {
            chart_type: ChartType::Candle,
            style: &style,
            overlays: &self.overlays,
            options: &options,
            fonts: Some(self.resolver.font_collection()),
        };
        Ok(plot(self.frame, request)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_config_prepends_font_and_drops_excluded() {
        let base: Vec<String> = ["DejaVu Sans", "SimHei", "Arial"].iter().map(|s| s.to_string()).collect();
        let cfg = TextConfig::for_font("Noto Sans CJK TC", &base, &["SimHei".to_string()]);
        assert_eq!(cfg.sans_serif, vec!["Noto Sans CJK TC", "DejaVu Sans", "Arial"]);
        assert!(!cfg.unicode_minus);
    }
}
