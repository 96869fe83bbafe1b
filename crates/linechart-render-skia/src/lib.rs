// File: crates/linechart-render-skia/src/lib.rs
// Summary: Skia renderer for ChartGeometry: CPU raster surface -> PNG bytes, file, or RGBA8 buffer.

use anyhow::{Context, Result};
use skia_safe as skia;

use linechart_core::dataset::linspace;
use linechart_core::{ChartGeometry, LabelGeometry, PlotRect, Style};

pub mod text;

pub use text::TextShaper;

pub struct RenderOptions {
    pub background: skia::Color,
    /// Grid colour; `None` skips the grid.
    pub grid: Option<skia::Color>,
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: Some(skia::Color::from_argb(255, 230, 230, 235)),
            draw_labels: true,
        }
    }
}

pub struct SkiaRenderer {
    pub options: RenderOptions,
    shaper: TextShaper,
}

impl SkiaRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options, shaper: TextShaper::new() }
    }

    fn draw(&self, geometry: &ChartGeometry) -> Result<skia::Surface> {
        let (w, h) = surface_size(geometry);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();

        // a non-standalone chart is composed into someone else's surface: no background or grid
        if geometry.standalone {
            canvas.clear(self.options.background);
            if let Some(grid) = self.options.grid {
                draw_grid(canvas, &geometry.plot, grid);
            }
        } else {
            canvas.clear(skia::Color::TRANSPARENT);
        }

        draw_line(canvas, geometry);
        for element in &geometry.elements {
            draw_marker(canvas, element.px as f32, element.py as f32, &element.style);
        }
        if self.options.draw_labels {
            let labels = geometry.elements.iter().filter_map(|e| e.label.as_ref()).chain(geometry.series_label.as_ref());
            for label in labels {
                self.draw_label(canvas, label);
            }
        }
        tracing::trace!(elements = geometry.elements.len(), "rasterized chart");
        Ok(surface)
    }

    fn draw_label(&self, canvas: &skia::Canvas, label: &LabelGeometry) {
        let color = paint_color(&label.style, label.style.fill.as_deref()).unwrap_or(skia::Color::BLACK);
        let size = label.style.font_size.unwrap_or(14.0) as f32;
        self.shaper.draw_anchored(
            canvas,
            &label.text,
            label.px as f32,
            label.py as f32,
            size,
            color,
            label.style.font_family.as_deref(),
            (label.text_anchor, label.vertical_anchor),
        );
    }

    /// Render to PNG bytes in memory.
    pub fn render_png_bytes(&self, geometry: &ChartGeometry) -> Result<Vec<u8>> {
        let mut surface = self.draw(geometry)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(&self, geometry: &ChartGeometry, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_png_bytes(geometry)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Render to an unpremultiplied RGBA8 buffer: `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self, geometry: &ChartGeometry) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.draw(geometry)?;
        let (w, h) = surface_size(geometry);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading back {w}x{h} pixels failed");
        }
        Ok((pixels, w as u32, h as u32, stride))
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new(RenderOptions::default()) }
}

fn surface_size(geometry: &ChartGeometry) -> (i32, i32) {
    let dim = |v: f64| (v.ceil() as i32).max(1);
    (dim(geometry.width), dim(geometry.height))
}

// ---- helpers ----------------------------------------------------------------

/// `#rgb`, `#rrggbb`, `#rrggbbaa` and a few names. `none`/`transparent` give `None`.
pub fn parse_color(s: &str) -> Option<skia::Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok().map(|v| v * 17);
        return match hex.len() {
            3 => Some(skia::Color::from_argb(255, nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        };
    }
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(skia::Color::BLACK),
        "white" => Some(skia::Color::WHITE),
        "red" => Some(skia::Color::from_argb(255, 255, 0, 0)),
        "green" => Some(skia::Color::from_argb(255, 0, 128, 0)),
        "blue" => Some(skia::Color::from_argb(255, 0, 0, 255)),
        "orange" => Some(skia::Color::from_argb(255, 255, 165, 0)),
        "gray" | "grey" => Some(skia::Color::from_argb(255, 128, 128, 128)),
        _ => None,
    }
}

/// Resolve a style colour, applying `opacity`. `None` when nothing should be painted.
fn paint_color(style: &Style, color: Option<&str>) -> Option<skia::Color> {
    let name = color?;
    if matches!(name.trim(), "none" | "transparent") {
        return None;
    }
    let Some(c) = parse_color(name) else {
        tracing::warn!(color = name, "unrecognized colour, skipping paint");
        return None;
    };
    let opacity = style.opacity.unwrap_or(1.0).clamp(0.0, 1.0);
    Some(c.with_a((c.a() as f64 * opacity).round() as u8))
}

fn draw_grid(canvas: &skia::Canvas, plot: &PlotRect, color: skia::Color) {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    // verticals
    for x in linspace(plot.left, plot.right, 10) {
        canvas.draw_line((x as f32, t), (x as f32, b), &paint);
    }
    // horizontals
    for y in linspace(plot.top, plot.bottom, 6) {
        canvas.draw_line((l, y as f32), (r, y as f32), &paint);
    }
}

fn draw_line(canvas: &skia::Canvas, geometry: &ChartGeometry) {
    let line = &geometry.line;
    let Some(color) = paint_color(&line.style, line.style.stroke.as_deref()) else { return };

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(line.style.stroke_width.unwrap_or(2.0) as f32);
    stroke.set_color(color);
    if let Some(dashes) = line.style.stroke_dasharray.as_deref().and_then(parse_dasharray) {
        stroke.set_path_effect(skia::PathEffect::dash(&dashes, 0.0));
    }
    if line.interpolation != "linear" {
        tracing::debug!(interpolation = %line.interpolation, "curve family not supported, drawing straight segments");
    }

    // each segment is its own stroke so gaps stay open
    for points in &line.segments {
        let Some(&(x0, y0)) = points.first() else { continue };
        let mut path = skia::Path::new();
        path.move_to((x0 as f32, y0 as f32));
        for &(x, y) in points.iter().skip(1) {
            path.line_to((x as f32, y as f32));
        }
        canvas.draw_path(&path, &stroke);
    }
}

fn draw_marker(canvas: &skia::Canvas, px: f32, py: f32, style: &Style) {
    let radius = style.size.unwrap_or(3.0) as f32;
    if radius <= 0.0 {
        return;
    }
    if let Some(fill) = paint_color(style, style.fill.as_deref()) {
        let mut body = skia::Paint::default();
        body.set_anti_alias(true);
        body.set_style(skia::paint::Style::Fill);
        body.set_color(fill);
        canvas.draw_circle((px, py), radius, &body);
    }
    if let Some(stroke_color) = paint_color(style, style.stroke.as_deref()) {
        let mut ring = skia::Paint::default();
        ring.set_anti_alias(true);
        ring.set_style(skia::paint::Style::Stroke);
        ring.set_stroke_width(style.stroke_width.unwrap_or(1.0) as f32);
        ring.set_color(stroke_color);
        canvas.draw_circle((px, py), radius, &ring);
    }
}

fn parse_dasharray(s: &str) -> Option<Vec<f32>> {
    let dashes: Vec<f32> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f32>().ok())
        .collect::<Option<_>>()?;
    // Skia wants an even count; SVG repeats odd lists
    match dashes.len() {
        0 => None,
        n if n % 2 == 1 => Some(dashes.iter().chain(dashes.iter()).copied().collect()),
        _ => Some(dashes),
    }
}
