use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use linechart_core::{render_props, segment, ChartProps, ElementState};
use serde_json::{json, Value};

fn gen_rows(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            // simple waveform with drift, one gap every 97 points
            let y = (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001);
            let y = if i % 97 == 0 { Value::Null } else { json!(y) };
            json!({ "x": i, "y": y })
        })
        .collect()
}

fn bench_render_props(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_props");
    for &n in &[1_000usize, 10_000usize, 50_000usize] {
        let props = ChartProps::new().with_data(gen_rows(n)).with_size(800.0, 500.0);
        let state = ElementState::new();
        group.bench_function(format!("xy_{n}"), |b| {
            b.iter(|| -> linechart_core::Result<()> {
                let geometry = render_props(&props, &state)?;
                black_box(geometry);
                Ok(())
            });
        });
    }
    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    for &n in &[10_000usize, 100_000usize] {
        let points = ChartProps::new().with_data(gen_rows(n)).dataset();
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            b.iter_batched(
                || pts.clone(),
                |d| { black_box(segment(&d, None).len()); },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_props, bench_segment);
criterion_main!(benches);
