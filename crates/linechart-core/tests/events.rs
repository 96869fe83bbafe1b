// File: crates/linechart-core/tests/events.rs
// Purpose: Event scoping per element kind/index and the element-state reducer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use linechart_core::events::scope;
use linechart_core::{
    render_props, ChartEvent, ChartProps, ElementKind, ElementPatch, ElementProps, ElementState, LineChart, Style,
};
use serde_json::json;

fn rows() -> Vec<serde_json::Value> {
    (0..4).map(|i| json!({"x": i, "y": i * i})).collect()
}

#[test]
fn handler_receives_scoped_element() {
    let props = ChartProps::new().with_data(rows()).on(ElementKind::Markers, "onClick", |_, el, index, kind| {
        let ElementProps::Element(e) = el else { return None };
        assert_eq!(Some(e.index), index);
        assert_eq!(kind, ElementKind::Markers);
        Some(ElementPatch::text(format!("clicked {}", e.y)))
    });
    let geometry = render_props(&props, &ElementState::new()).unwrap();
    let bound = scope(props.events.for_kind(ElementKind::Markers), ElementKind::Markers, &geometry);
    assert_eq!(bound.names().collect::<Vec<_>>(), vec!["onClick"]);

    let patch = bound.invoke(Some(3), &ChartEvent::new("onClick")).expect("patch");
    assert_eq!(patch.text.as_deref(), Some("clicked 9"));
    assert!(bound.invoke(Some(3), &ChartEvent::new("onMouseOver")).is_none(), "unknown event name");
    assert!(bound.invoke(Some(42), &ChartEvent::new("onClick")).is_none(), "no element at index");
    assert!(bound.invoke(None, &ChartEvent::new("onClick")).is_none(), "indexed kind needs an index");
}

#[test]
fn parent_and_data_handlers_get_no_index() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let props = ChartProps::new()
        .with_data(rows())
        .on(ElementKind::Parent, "onClick", move |_, el, index, _| {
            assert!(matches!(el, ElementProps::Parent(_)));
            assert_eq!(index, None);
            counter.fetch_add(1, Ordering::SeqCst);
            None
        })
        .on(ElementKind::Data, "onClick", |_, el, index, _| {
            let ElementProps::Line(line) = el else { return None };
            assert_eq!(index, None);
            assert_eq!(line.segments.len(), 1);
            Some(ElementPatch::style(Style::default().stroke_width(4.0)))
        });
    let mut chart = LineChart::new(props);
    assert_eq!(chart.dispatch(ElementKind::Parent, Some(1), &ChartEvent::new("onClick")).unwrap(), None);
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert!(chart.state().is_empty(), "a handler returning nothing leaves state alone");

    chart.dispatch(ElementKind::Data, None, &ChartEvent::new("onClick")).unwrap();
    assert_eq!(chart.render().unwrap().line.style.stroke_width, Some(4.0));
}

#[test]
fn reducer_merges_successive_patches() {
    let mut state = ElementState::new();
    state.apply(ElementKind::Markers, Some(1), ElementPatch::style(Style::default().fill("red").size(8.0)));
    state.apply(ElementKind::Markers, Some(1), ElementPatch::style(Style::default().fill("green")));
    let patch = state.get(ElementKind::Markers, Some(1)).unwrap();
    assert_eq!(patch.style.fill.as_deref(), Some("green"));
    assert_eq!(patch.style.size, Some(8.0));
    assert!(state.get(ElementKind::Markers, Some(2)).is_none());
    assert!(state.get(ElementKind::Labels, Some(1)).is_none(), "kinds are keyed separately");
    assert_eq!(state.len(), 1);
}

#[test]
fn state_survives_rerender_but_not_remount() {
    let props = ChartProps::new().with_data(rows()).on(ElementKind::Markers, "onMouseOver", |_, _, _, _| {
        Some(ElementPatch::style(Style::default().fill("orange")))
    });
    let mut chart = LineChart::new(props.clone());
    chart.dispatch(ElementKind::Markers, Some(0), &ChartEvent::at("onMouseOver", 50.0, 250.0)).unwrap();

    chart.set_props(props.with_series_label("s"));
    let g = chart.render().unwrap();
    assert_eq!(g.element(0).unwrap().style.fill.as_deref(), Some("orange"));

    chart.remount();
    let g = chart.render().unwrap();
    assert_eq!(g.element(0).unwrap().style.fill.as_deref(), Some("#252525"));
}

#[test]
fn dispatch_without_handlers_is_a_no_op() {
    let mut chart = LineChart::new(ChartProps::new().with_data(rows()));
    let patch = chart.dispatch(ElementKind::Labels, Some(0), &ChartEvent::new("onClick")).unwrap();
    assert!(patch.is_none());
    assert!(chart.state().is_empty());
}
