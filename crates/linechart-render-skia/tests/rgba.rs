// File: crates/linechart-render-skia/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use linechart_core::{render_props, ChartProps, ElementState};
use linechart_render_skia::{parse_color, RenderOptions, SkiaRenderer};
use serde_json::json;

fn diagonal(standalone: bool) -> linechart_core::ChartGeometry {
    let props = ChartProps::new()
        .with_data(vec![json!({"x": 0, "y": 0}), json!({"x": 4, "y": 4})])
        .with_size(200.0, 120.0)
        .with_standalone(standalone);
    render_props(&props, &ElementState::new()).expect("pipeline")
}

#[test]
fn render_rgba8_buffer() {
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() }; // avoid font variance
    let renderer = SkiaRenderer::new(opts);
    let (px, w, h, stride) = renderer.render_to_rgba8(&diagonal(true)).expect("rgba render");
    assert_eq!((w, h), (200, 120));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Check background alpha in top-left pixel (RGBA)
    let a = px[3];
    assert_eq!(a, 255);
}

#[test]
fn embedded_chart_has_transparent_background() {
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
    let (px, _, _, _) = SkiaRenderer::new(opts).render_to_rgba8(&diagonal(false)).expect("rgba render");
    assert_eq!(px[3], 0, "corner outside the plot should stay transparent");
}

#[test]
fn line_pixels_use_stroke_colour() {
    let opts = RenderOptions { draw_labels: false, grid: None, ..RenderOptions::default() };
    let geometry = diagonal(true);
    let (px, w, _, stride) = SkiaRenderer::new(opts).render_to_rgba8(&geometry).expect("rgba render");
    assert_eq!(w, 200);

    // middle of the diagonal, where no marker sits
    let (x0, y0) = geometry.line.segments[0][0];
    let (x1, y1) = geometry.line.segments[0][1];
    let (mx, my) = (((x0 + x1) / 2.0) as usize, ((y0 + y1) / 2.0) as usize);
    let darkest = (my - 1..=my + 1)
        .flat_map(|y| (mx - 1..=mx + 1).map(move |x| y * stride + x * 4))
        .map(|at| px[at])
        .min()
        .expect("neighbourhood");
    assert!(darkest < 128, "default stroke is dark grey, got red channel {darkest}");
}

#[test]
fn colour_parsing() {
    assert_eq!(parse_color("#fff"), parse_color("#ffffff"));
    assert_eq!(parse_color("#25252580").map(|c| c.a()), Some(0x80));
    assert!(parse_color("none").is_none());
    assert!(parse_color("#12").is_none());
    assert!(parse_color("black").is_some());
}
