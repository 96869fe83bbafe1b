// File: crates/linechart-core/tests/dataset.rs
// Purpose: Dataset builder: raw-point resolution, gap marking, fallbacks and synthetic sampling.

use linechart_core::dataset::{build, linspace};
use linechart_core::{Accessor, AxisValue, Domain};
use serde_json::json;

#[test]
fn raw_points_keep_input_order_and_mark_gaps() {
    let raw = vec![json!({"x": 3, "y": 1}), json!({"x": 1, "y": null}), json!({"x": 2})];
    let pts = build(Some(&raw), &Accessor::key("x"), &Accessor::key("y"), 50, None);
    assert_eq!(pts.len(), 3);
    assert_eq!(pts.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(pts[0].x, AxisValue::Number(3.0));
    assert!(!pts[0].is_gap());
    assert!(pts[1].is_gap());
    assert!(pts[2].is_gap(), "missing y field is a gap");
    assert_eq!(pts[1].datum, raw[1]);
}

#[test]
fn unresolved_x_falls_back_to_index() {
    let raw = vec![json!({"y": 4}), json!({"y": 5})];
    let pts = build(Some(&raw), &Accessor::key("x"), &Accessor::key("y"), 50, None);
    assert_eq!(pts[1].x, AxisValue::Number(1.0));
}

#[test]
fn label_field_is_preserved() {
    let raw = vec![json!({"x": 0, "y": 1, "label": "first"}), json!({"x": 1, "y": 2, "label": 7})];
    let pts = build(Some(&raw), &Accessor::key("x"), &Accessor::key("y"), 50, None);
    assert_eq!(pts[0].label.as_deref(), Some("first"));
    assert_eq!(pts[1].label.as_deref(), Some("7"));
}

#[test]
fn text_values_parse_as_timestamps_or_stay_categories() {
    let day = AxisValue::from("2024-01-02");
    assert_eq!(day.as_f64(), Some(1_704_153_600_000.0));
    assert!(!day.is_category());
    let cat = AxisValue::from("apples");
    assert!(cat.is_category());
    assert_eq!(AxisValue::from_json(&json!(true)), Some(AxisValue::Number(1.0)));
    assert_eq!(AxisValue::from_json(&json!([1])), None);
}

#[test]
fn synthesizes_samples_over_x_domain() {
    let y = Accessor::function(|d, _, _| json!(d["x"].as_f64().unwrap_or(0.0) * 2.0));
    let pts = build(None, &Accessor::key("x"), &y, 5, Some(Domain::new(0.0, 4.0)));
    let xs: Vec<_> = pts.iter().map(|p| p.x.as_f64().unwrap()).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(pts[3].y, Some(AxisValue::Number(6.0)));
}

#[test]
fn synthetic_without_function_is_identity_curve() {
    let pts = build(None, &Accessor::key("x"), &Accessor::key("y"), 3, None);
    assert_eq!(pts.len(), 3);
    for p in &pts {
        assert_eq!(Some(p.x.clone()), p.y);
    }
    assert_eq!(pts[2].x, AxisValue::Number(1.0));
}

#[test]
fn linspace_edges() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(2.0, 9.0, 1), vec![2.0]);
    assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
}

#[test]
fn to_json_reencodes_for_default_accessors() {
    let raw = vec![json!({"a": {"v": 3}, "b": 9, "extra": true})];
    let pts = build(Some(&raw), &Accessor::parse("a.v").unwrap(), &Accessor::key("b"), 50, None);
    let out = pts[0].to_json();
    assert_eq!(out["x"], json!(3.0));
    assert_eq!(out["y"], json!(9.0));
    assert_eq!(out["extra"], json!(true));
}
