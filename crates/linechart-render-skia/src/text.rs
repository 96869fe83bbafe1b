// File: crates/linechart-render-skia/src/text.rs
// Summary: Label text shaping with Skia textlayout; anchors text boxes the way label geometry asks.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use linechart_core::{TextAnchor, VerticalAnchor};

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, family: Option<&str>) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        match family {
            Some(f) => { ts.set_font_families(&[f, "sans-serif"]); }
            None => { ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]); }
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, family: Option<&str>) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color, family));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw `text` so that `(x, y)` sits at the requested anchors of its box.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_anchored(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        family: Option<&str>,
        anchor: (TextAnchor, VerticalAnchor),
    ) {
        if text.is_empty() {
            return;
        }
        let mut p = self.layout(text, size, color, family);
        let w = p.longest_line();
        let h = p.height();
        let left = match anchor.0 {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - w * 0.5,
            TextAnchor::End => x - w,
        };
        // Paragraph paints from its top-left corner
        let top = match anchor.1 {
            VerticalAnchor::Start => y,
            VerticalAnchor::Middle => y - h * 0.5,
            VerticalAnchor::End => y - h,
        };
        p.paint(canvas, (left, top));
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}
