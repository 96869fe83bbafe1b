// File: crates/linechart-core/tests/animation.rs
// Purpose: Transition state machine: phases, entering/exiting points, whitelisted interpolation.

use linechart_core::{
    render_props, AnimateConfig, AnimationBridge, AnimationDriver, ChartProps, Domain, DomainProp, ElementState,
    LineChart, StepDriver, TransitionPhase, TweenProp, TweenWhitelist,
};
use serde_json::{json, Value};

fn rows(ys: &[f64]) -> Vec<Value> {
    ys.iter().enumerate().map(|(i, y)| json!({"x": i, "y": y})).collect()
}

fn ys(props: &ChartProps) -> Vec<Option<f64>> {
    props.dataset().iter().map(|p| p.y.as_ref().and_then(|y| y.as_f64())).collect()
}

#[test]
fn steady_only_when_nothing_enters_or_exits() {
    let from = ChartProps::new().with_data(rows(&[0.0, 0.0]));
    let to = ChartProps::new().with_data(rows(&[10.0, 20.0]));
    let mut t = AnimationBridge::tween(&TweenWhitelist::line(), &from, &to, AnimateConfig::default());
    assert!(t.entering().is_empty() && t.exiting().is_empty());
    assert_eq!(t.phase(), TransitionPhase::Idle);
    assert_eq!(t.advance(), TransitionPhase::Steady);
    assert_eq!(ys(&t.frame(0.5)), vec![Some(5.0), Some(10.0)]);
    assert_eq!(ys(&t.frame(1.0)), vec![Some(10.0), Some(20.0)]);
    assert_eq!(t.advance(), TransitionPhase::Removed);
    assert!(t.is_done());
}

#[test]
fn entering_points_start_as_gaps() {
    let from = ChartProps::new().with_data(rows(&[1.0]));
    let to = ChartProps::new().with_data(rows(&[1.0, 2.0, 3.0]));
    let mut t = AnimationBridge::tween(&TweenWhitelist::line(), &from, &to, AnimateConfig::default());
    assert_eq!(t.entering().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(t.advance(), TransitionPhase::Entering);
    assert_eq!(ys(&t.frame(0.0)), vec![Some(1.0), None, None]);
    assert_eq!(ys(&t.frame(1.0)), vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(t.advance(), TransitionPhase::Steady);
}

#[test]
fn exiting_points_become_gaps_then_disappear() {
    let from = ChartProps::new().with_data(rows(&[1.0, 2.0, 3.0]));
    let to = ChartProps::new().with_data(rows(&[1.0]));
    let mut t = AnimationBridge::tween(&TweenWhitelist::line(), &from, &to, AnimateConfig::default());
    assert_eq!(t.advance(), TransitionPhase::Steady);
    assert_eq!(ys(&t.frame(0.5)).len(), 3, "departing points hold during steady");
    assert_eq!(t.advance(), TransitionPhase::Exiting);
    assert_eq!(ys(&t.frame(1.0)), vec![Some(1.0), None, None]);
    assert_eq!(t.advance(), TransitionPhase::Removed);
    assert_eq!(ys(&t.frame(1.0)), vec![Some(1.0)]);
}

#[test]
fn whitelist_limits_what_interpolates() {
    let from = ChartProps::new().with_data(rows(&[0.0])).with_size(100.0, 100.0);
    let to = ChartProps::new().with_data(rows(&[10.0])).with_size(200.0, 300.0);
    let only_width = TweenWhitelist::none().with(TweenProp::Width).with(TweenProp::Data);
    let mut t = AnimationBridge::tween(&only_width, &from, &to, AnimateConfig::default());
    t.advance();
    let mid = t.frame(0.5);
    assert_eq!(mid.width, 150.0);
    assert_eq!(mid.height, 300.0, "height is not whitelisted and snaps to the target");
    assert_eq!(ys(&mid), vec![Some(10.0)], "y is not whitelisted");

    let names = TweenWhitelist::from_names(["width", "y"]).unwrap();
    assert!(names.allows(TweenProp::Y) && !names.allows(TweenProp::X));
    assert!(TweenWhitelist::from_names(["colour"]).is_err());
}

#[test]
fn domain_interpolates_only_when_both_sides_set() {
    let from = ChartProps::new().with_domain(DomainProp::Both(Domain::new(0.0, 10.0)));
    let to = ChartProps::new().with_domain(DomainProp::Both(Domain::new(0.0, 20.0)));
    let mut t = AnimationBridge::tween(&TweenWhitelist::line(), &from, &to, AnimateConfig::default());
    t.advance();
    let mid = t.frame(0.5).domain.unwrap();
    assert_eq!(mid, DomainProp::Both(Domain::new(0.0, 15.0)));
}

#[test]
fn frames_never_restart_animation_and_render_cleanly() {
    let from = ChartProps::new().with_data(rows(&[1.0, 2.0])).with_animate(AnimateConfig { duration_ms: 100, frames: 4 });
    let to = from.clone().with_data(rows(&[3.0, 4.0, 5.0]));
    let mut t = AnimationBridge::tween(&TweenWhitelist::line(), &from, &to, AnimateConfig::default());
    let mut frames = Vec::new();
    StepDriver::new(4).run(&mut t, &mut |f| frames.push(f));
    // entering (2) + steady (4) + removed (1)
    assert_eq!(frames.len(), 7);
    for f in &frames {
        assert!(f.animate.is_none());
        render_props(f, &ElementState::new()).expect("frame renders");
    }
    assert_eq!(ys(frames.last().unwrap()), vec![Some(3.0), Some(4.0), Some(5.0)]);
}

#[test]
fn chart_animate_to_ends_on_target_props() {
    let mut chart = LineChart::new(ChartProps::new().with_data(rows(&[0.0, 1.0])));
    let target = ChartProps::new().with_data(rows(&[5.0, 6.0])).with_series_label("done");
    let mut seen = Vec::new();
    chart.animate_to(target, &mut StepDriver::new(3), |g| seen.push(g)).unwrap();
    // steady (3) + removed (1)
    assert_eq!(seen.len(), 4);
    assert_eq!(chart.props().series_label.as_deref(), Some("done"));
    let last = seen.last().unwrap();
    assert_eq!(last.domain.y, Domain::new(5.0, 6.0));
}

#[test]
fn invalid_target_is_rejected_before_animating() {
    let mut chart = LineChart::new(ChartProps::new());
    let bad = ChartProps::new().with_samples(0);
    let mut frames = 0;
    assert!(chart.animate_to(bad, &mut StepDriver::new(2), |_| frames += 1).is_err());
    assert_eq!(frames, 0);
}
