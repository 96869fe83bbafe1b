// File: crates/linechart-demo/src/main.rs
// Summary: Demo loads a CSV (or a built-in sample with gaps) and renders line charts to PNGs.
// Usage: linechart-demo [data.csv [x_column [y_column]]]
//   Logging follows RUST_LOG (e.g. RUST_LOG=linechart_core=debug).

use anyhow::{Context, Result};
use linechart_core::{Accessor, ChartEvent, ChartProps, ElementKind, ElementPatch, LineChart, StepDriver, Style};
use linechart_render_skia::SkiaRenderer;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let (data, stem) = match args.next() {
        Some(raw) => {
            let path = PathBuf::from(raw);
            let rows = load_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("chart").to_string();
            (rows, stem)
        }
        None => (sample_rows(), "sample".to_string()),
    };
    if data.is_empty() {
        anyhow::bail!("no rows loaded; check headers/delimiter.");
    }
    let x_key = args.next().unwrap_or_else(|| "x".to_string());
    let y_key = args.next().unwrap_or_else(|| "y".to_string());
    tracing::info!(rows = data.len(), x = %x_key, y = %y_key, "loaded data");

    let renderer = SkiaRenderer::default();
    let props = ChartProps::new()
        .with_data(data.clone())
        .with_x(Accessor::parse(&x_key)?)
        .with_y(Accessor::parse(&y_key)?)
        .with_size(640.0, 360.0)
        .with_series_label(y_key.clone())
        .on(ElementKind::Markers, "click", |_, _, _, _| {
            Some(ElementPatch::style(Style::default().fill("#d62728").size(6.0)))
        });
    let mut chart = LineChart::new(props);

    // 1) Plain render + geometry dump
    let geometry = chart.render()?;
    let out = out_name(&stem, "line");
    renderer.render_to_png(&geometry, &out)?;
    let out_json = out.with_extension("json");
    std::fs::write(&out_json, serde_json::to_string_pretty(&geometry)?)
        .with_context(|| format!("writing {}", out_json.display()))?;
    tracing::info!(png = %out.display(), json = %out_json.display(), "wrote chart");

    // 2) Highlight the first marker through the event path
    if let Some(first) = geometry.elements.first() {
        chart.dispatch(ElementKind::Markers, Some(first.index), &ChartEvent::at("click", first.px, first.py))?;
        let out_hl = out_name(&stem, "highlight");
        renderer.render_to_png(&chart.render()?, &out_hl)?;
        tracing::info!(png = %out_hl.display(), "wrote highlighted chart");
    }

    // 3) Animate to a copy with the y values doubled and the last row dropped
    let mut next_rows: Vec<Value> = data.iter().map(|row| scale_field(row, &y_key, 2.0)).collect();
    next_rows.pop();
    let next = chart.props().clone().with_data(next_rows);
    let mut frame_no = 0usize;
    let mut written = Vec::new();
    chart.animate_to(next, &mut StepDriver::new(6), |frame| {
        let path = out_name(&stem, &format!("frame{frame_no:02}"));
        frame_no += 1;
        written.push(renderer.render_to_png(&frame, &path).map(|_| path));
    })?;
    for path in written {
        let path = path?;
        tracing::debug!(png = %path.display(), "wrote frame");
    }
    tracing::info!(frames = frame_no, "wrote animation frames");

    Ok(())
}

/// Produce output file name like target/out/line_<stem>_<suffix>.png
fn out_name(stem: &str, suffix: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("line_{stem}_{suffix}.png"));
    out
}

/// Load a headed CSV into one JSON object per row. Numeric cells become numbers; empty cells become null (gaps).
fn load_csv(path: &Path) -> Result<Vec<Value>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, cell)| (h.clone(), cell_value(cell)))
            .collect();
        out.push(Value::Object(row));
    }
    Ok(out)
}

fn cell_value(cell: &str) -> Value {
    let cell = cell.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => json!(v),
        _ => Value::String(cell.to_string()),
    }
}

fn scale_field(row: &Value, key: &str, factor: f64) -> Value {
    let mut row = row.clone();
    if let Some(v) = row.get(key).and_then(Value::as_f64) {
        row[key] = json!(v * factor);
    }
    row
}

/// A small series with one gap.
fn sample_rows() -> Vec<Value> {
    [Some(1.0), Some(3.0), Some(2.0), None, Some(4.0), Some(3.5), Some(5.0)]
        .iter()
        .enumerate()
        .map(|(i, y)| json!({ "x": i, "y": y, "label": format!("p{i}") }))
        .collect()
}
