// File: crates/linechart-core/tests/domain.rs
// Purpose: Domain calculation priority (overrides, categories, extent) and degenerate-domain handling.

use linechart_core::domain::{categories, domain};
use linechart_core::{Axis, CategoryProp, ChartProps, Domain, DomainProp, ScaleKind, ScaleProp};
use serde_json::json;

fn props(data: serde_json::Value) -> ChartProps {
    let rows = data.as_array().cloned().unwrap_or_default();
    ChartProps::new().with_data(rows)
}

#[test]
fn extent_of_data() {
    let p = props(json!([{"x": 3, "y": 1}, {"x": 1, "y": 2}, {"x": 2, "y": -4}]));
    let data = p.dataset();
    assert_eq!(domain(Axis::X, &p, &data), Domain::new(1.0, 3.0));
    assert_eq!(domain(Axis::Y, &p, &data), Domain::new(-4.0, 2.0));
}

#[test]
fn gaps_do_not_contribute_to_y() {
    let p = props(json!([{"x": 0, "y": 1}, {"x": 1, "y": null}, {"x": 2, "y": 5}]));
    let data = p.dataset();
    assert_eq!(domain(Axis::Y, &p, &data), Domain::new(1.0, 5.0));
    assert_eq!(domain(Axis::X, &p, &data), Domain::new(0.0, 2.0));
}

#[test]
fn explicit_overrides_win() {
    let p = props(json!([{"x": 0, "y": 1}, {"x": 10, "y": 2}]))
        .with_domain(DomainProp::PerAxis { x: None, y: Some(Domain::new(0.0, 100.0)) });
    let data = p.dataset();
    assert_eq!(domain(Axis::Y, &p, &data), Domain::new(0.0, 100.0));
    assert_eq!(domain(Axis::X, &p, &data), Domain::new(0.0, 10.0), "x falls through to the data extent");

    let both = p.clone().with_domain(DomainProp::Both(Domain::new(-1.0, 1.0)));
    assert_eq!(domain(Axis::X, &both, &data), Domain::new(-1.0, 1.0));
    assert_eq!(domain(Axis::Y, &both, &data), Domain::new(-1.0, 1.0));
}

#[test]
fn flat_domain_is_widened_symmetrically() {
    let p = props(json!([{"x": 1, "y": 200}, {"x": 2, "y": 200}]));
    let d = domain(Axis::Y, &p, &p.dataset());
    assert!(d.min < 200.0 && d.max > 200.0);
    assert!((d.min + d.max - 400.0).abs() < 1e-9);
    assert!((d.span() - 4.0).abs() < 1e-9, "1% of the value each side");

    let zero = props(json!([{"x": 1, "y": 0}]));
    let d = domain(Axis::Y, &zero, &zero.dataset());
    assert!(d.min < 0.0 && d.max > 0.0);
}

#[test]
fn flat_domain_at_the_f64_limits_stays_finite() {
    let top = Domain::new(f64::MAX, f64::MAX).expanded();
    assert!(top.min.is_finite() && top.max.is_finite());
    assert!(top.min < top.max);
    assert_eq!(top.max, f64::MAX);

    let bottom = Domain::new(f64::MIN, f64::MIN).expanded();
    assert!(bottom.min.is_finite() && bottom.max.is_finite());
    assert!(bottom.min < bottom.max);
    assert_eq!(bottom.min, f64::MIN);
}

#[test]
fn empty_data_uses_unit_domain() {
    let p = ChartProps::new().with_data(vec![]);
    assert_eq!(domain(Axis::X, &p, &p.dataset()), Domain::new(0.0, 1.0));
    let all_gaps = props(json!([{"x": 1, "y": null}]));
    assert_eq!(domain(Axis::Y, &all_gaps, &all_gaps.dataset()), Domain::new(0.0, 1.0));
}

#[test]
fn explicit_categories_span_their_ranks() {
    let p = props(json!([{"x": "b", "y": 1}])).with_categories(CategoryProp::Shared(vec!["a".into(), "b".into(), "c".into()]));
    let data = p.dataset();
    let cats = categories(Axis::X, &p, &data).expect("categorical x");
    assert_eq!(cats.labels(), ["a", "b", "c"]);
    assert_eq!(domain(Axis::X, &p, &data), Domain::new(0.0, 2.0));
    assert!(categories(Axis::Y, &p, &data).is_none(), "a bare list applies to x only");
}

#[test]
fn text_values_harvest_categories_in_first_seen_order() {
    let p = props(json!([{"x": "q2", "y": 1}, {"x": "q1", "y": 2}, {"x": "q2", "y": 3}]));
    let cats = categories(Axis::X, &p, &p.dataset()).expect("categorical x");
    assert_eq!(cats.labels(), ["q2", "q1"]);
    assert_eq!(domain(Axis::X, &p, &p.dataset()), Domain::new(0.0, 1.0));
}

#[test]
fn categorical_scale_kind_harvests_numbers_too() {
    let p = props(json!([{"x": 10, "y": 1}, {"x": 20, "y": 2}]))
        .with_scale(ScaleProp::PerAxis { x: ScaleKind::Categorical, y: ScaleKind::Linear });
    let cats = categories(Axis::X, &p, &p.dataset()).expect("categorical x");
    assert_eq!(cats.labels(), ["10", "20"]);
}

#[test]
fn domain_deserializes_from_pair_in_either_order() {
    let d: Domain = serde_json::from_value(json!([5.0, 1.0])).expect("pair");
    assert_eq!(d, Domain::new(1.0, 5.0));
    let per_axis: DomainProp = serde_json::from_value(json!({"y": [0, 10]})).expect("per axis");
    assert_eq!(per_axis.for_axis(Axis::Y), Some(Domain::new(0.0, 10.0)));
    assert_eq!(per_axis.for_axis(Axis::X), None);
}
