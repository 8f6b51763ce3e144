// File: crates/kbar-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout with a caller-ordered font family chain.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Horizontal anchor of a drawn label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Center,
    Right,
}

pub struct TextShaper {
    fonts: FontCollection,
    families: Vec<String>,
}

impl TextShaper {
    /// Shaper over the system font manager only.
    pub fn system(families: &[String]) -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self::with_collection(fc, families)
    }

    /// Shaper over a prepared collection (e.g. one that also holds fonts
    /// registered at runtime).
    pub fn with_collection(fonts: FontCollection, families: &[String]) -> Self {
        Self { fonts, families: families.to_vec() }
    }

    fn make_style(&self, size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&self.families);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, self.fonts.clone());
        builder.push_style(&self.make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw `text` so that its baseline sits at `y` and `x` is the anchor point.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, anchor: Anchor) {
        let p = self.layout(text, size, color);
        let w = p.longest_line();
        let dx = match anchor {
            Anchor::Center => w * 0.5,
            Anchor::Right => w,
        };
        // Paragraph draws from top-left; shift by an approximate ascent.
        p.paint(canvas, (x - dx, y - size * 0.8));
    }

    /// Draw `text` rotated by `degrees` (counter-clockwise) about (`x`, `y`),
    /// which `anchor` places on the label; used for date ticks and y labels.
    pub fn draw_rotated(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, degrees: f32, anchor: Anchor) {
        canvas.save();
        canvas.translate((x, y));
        canvas.rotate(-degrees, None);
        self.draw(canvas, text, 0.0, 0.0, size, color, anchor);
        canvas.restore();
    }
}
