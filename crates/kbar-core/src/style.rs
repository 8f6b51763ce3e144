// File: crates/kbar-core/src/style.rs
// Summary: Market colors and chart style (font families, minus glyph, base palette).

use skia_safe as skia;

/// Colors for rising and falling rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpDown {
    pub up: skia::Color,
    pub down: skia::Color,
}

impl UpDown {
    pub const fn new(up: skia::Color, down: skia::Color) -> Self {
        Self { up, down }
    }

    pub fn pick(&self, up: bool) -> skia::Color {
        if up { self.up } else { self.down }
    }
}

/// Per-element market colors: candle body, body edge, wick and volume bars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarketColors {
    pub candle: UpDown,
    pub edge: UpDown,
    pub wick: UpDown,
    pub volume: UpDown,
}

impl MarketColors {
    /// Palette of the `default` base style: hollow-looking white/black bodies,
    /// black outlines, blue volume.
    pub fn base() -> Self {
        let black = skia::Color::BLACK;
        let blue = skia::Color::from_rgb(0x1f, 0x77, 0xb4);
        Self {
            candle: UpDown::new(skia::Color::WHITE, black),
            edge: UpDown::new(black, black),
            wick: UpDown::new(black, black),
            volume: UpDown::new(blue, blue),
        }
    }

    /// Override the candle colors; with `inherit` the edge, wick and volume
    /// colors follow the candle colors too.
    pub fn new(up: skia::Color, down: skia::Color, inherit: bool) -> Self {
        let candle = UpDown::new(up, down);
        if inherit {
            Self { candle, edge: candle, wick: candle, volume: candle }
        } else {
            Self { candle, ..Self::base() }
        }
    }

    /// Red for up, green for down (Chinese market convention).
    pub fn red_up_green_down() -> Self {
        Self::new(skia::Color::from_rgb(0xff, 0x00, 0x00), skia::Color::from_rgb(0x00, 0x80, 0x00), true)
    }
}

impl Default for MarketColors {
    fn default() -> Self {
        Self::base()
    }
}

/// Fully resolved style handed to `plot`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartStyle {
    pub market_colors: MarketColors,
    /// Ordered font family preference list; the text shaper falls through it.
    pub font_families: Vec<String>,
    /// Render negative numbers with U+2212 instead of ASCII '-'.
    pub unicode_minus: bool,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub text: skia::Color,
    pub mav_colors: Vec<skia::Color>,
}

impl ChartStyle {
    pub fn builder() -> ChartStyleBuilder {
        ChartStyleBuilder::default()
    }

    /// Apply the configured minus glyph to an already formatted number.
    pub fn format_minus(&self, s: &str) -> String {
        if self.unicode_minus { s.replace('-', "\u{2212}") } else { s.to_string() }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            market_colors: MarketColors::base(),
            font_families: vec!["DejaVu Sans".to_string(), "sans-serif".to_string()],
            unicode_minus: true,
            background: skia::Color::WHITE,
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            text: skia::Color::from_argb(255, 20, 20, 30),
            mav_colors: vec![
                skia::Color::from_rgb(0x40, 0xe0, 0xd0),
                skia::Color::from_rgb(0xee, 0x82, 0xee),
                skia::Color::from_rgb(0xff, 0xa5, 0x00),
                skia::Color::from_rgb(0x64, 0x95, 0xed),
                skia::Color::from_rgb(0x8b, 0x45, 0x13),
            ],
        }
    }
}

/// Builder over the `default` base style.
#[derive(Clone, Debug, Default)]
pub struct ChartStyleBuilder {
    style: ChartStyle,
}

impl ChartStyleBuilder {
    pub fn market_colors(mut self, colors: MarketColors) -> Self {
        self.style.market_colors = colors;
        self
    }

    pub fn font_families<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style.font_families = families.into_iter().map(Into::into).collect();
        self
    }

    pub fn unicode_minus(mut self, on: bool) -> Self {
        self.style.unicode_minus = on;
        self
    }

    pub fn background(mut self, color: skia::Color) -> Self {
        self.style.background = color;
        self
    }

    pub fn build(self) -> ChartStyle {
        self.style
    }
}

/// Parse a color name or `#rrggbb` / `#rrggbbaa` hex string.
pub fn parse_color(s: &str) -> Option<skia::Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return match hex.len() {
            6 => Some(skia::Color::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        };
    }
    let rgb = match s.to_ascii_lowercase().as_str() {
        "k" | "black" => (0x00, 0x00, 0x00),
        "w" | "white" => (0xff, 0xff, 0xff),
        "r" | "red" => (0xff, 0x00, 0x00),
        "g" | "green" => (0x00, 0x80, 0x00),
        "b" | "blue" => (0x00, 0x00, 0xff),
        "c" | "cyan" => (0x00, 0xbf, 0xbf),
        "m" | "magenta" => (0xbf, 0x00, 0xbf),
        "y" | "yellow" => (0xbf, 0xbf, 0x00),
        "orange" => (0xff, 0xa5, 0x00),
        "purple" => (0x80, 0x00, 0x80),
        "gray" | "grey" => (0x80, 0x80, 0x80),
        "lime" => (0x00, 0xff, 0x00),
        "navy" => (0x00, 0x00, 0x80),
        _ => return None,
    };
    Some(skia::Color::from_rgb(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherit_propagates_candle_colors() {
        let mc = MarketColors::red_up_green_down();
        assert_eq!(mc.wick, mc.candle);
        assert_eq!(mc.volume.pick(true), skia::Color::from_rgb(255, 0, 0));
        assert_eq!(mc.volume.pick(false), skia::Color::from_rgb(0, 128, 0));
    }

    #[test]
    fn without_inherit_keeps_base_edges() {
        let mc = MarketColors::new(skia::Color::RED, skia::Color::GREEN, false);
        assert_eq!(mc.edge, MarketColors::base().edge);
        assert_eq!(mc.candle.up, skia::Color::RED);
    }

    #[test]
    fn minus_glyph_follows_style() {
        let ascii = ChartStyle::builder().unicode_minus(false).build();
        assert_eq!(ascii.format_minus("-1.5"), "-1.5");
        let fancy = ChartStyle::default();
        assert_eq!(fancy.format_minus("-1.5"), "\u{2212}1.5");
    }

    #[test]
    fn parses_names_and_hex() {
        assert_eq!(parse_color("blue"), Some(skia::Color::from_rgb(0, 0, 255)));
        assert_eq!(parse_color("#1f77b4"), Some(skia::Color::from_rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(parse_color("#ff000080"), Some(skia::Color::from_argb(0x80, 0xff, 0, 0)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }
}
