// File: crates/linechart-core/src/animation.rs
// Summary: Tween whitelist and transition state machine producing interpolated props per frame.
// Notes:
// - Frames carry normalized points re-encoded as `{x, y, label}` objects, so the pipeline
//   re-reads them with the default accessors regardless of the caller's original accessors.
//   Frame points stay ordered by input index and indices are contiguous, so element state
//   and label lists keep addressing the same points.
// - Every frame has `animate` cleared; feeding a frame back into a render never starts
//   another transition.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::Deserialize;

use crate::accessor::Accessor;
use crate::config::ChartProps;
use crate::dataset::{AxisValue, NormalizedPoint};
use crate::error::{ChartError, Result};

/// Props a transition may interpolate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TweenProp {
    Data,
    Domain,
    Height,
    Padding,
    Samples,
    Style,
    Width,
    X,
    Y,
}

impl TweenProp {
    pub const ALL: [TweenProp; 9] = [
        Self::Data, Self::Domain, Self::Height, Self::Padding, Self::Samples,
        Self::Style, Self::Width, Self::X, Self::Y,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Domain => "domain",
            Self::Height => "height",
            Self::Padding => "padding",
            Self::Samples => "samples",
            Self::Style => "style",
            Self::Width => "width",
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl FromStr for TweenProp {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ChartError::config(format!("{s:?} is not a tweenable prop")))
    }
}

/// Which props the transition state machine is allowed to mutate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TweenWhitelist(BTreeSet<TweenProp>);

impl TweenWhitelist {
    /// The full set used by line charts.
    pub fn line() -> Self { Self(TweenProp::ALL.into_iter().collect()) }
    pub fn none() -> Self { Self::default() }
    pub fn with(mut self, prop: TweenProp) -> Self { self.0.insert(prop); self }
    pub fn without(mut self, prop: TweenProp) -> Self { self.0.remove(&prop); self }
    pub fn allows(&self, prop: TweenProp) -> bool { self.0.contains(&prop) }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        names.into_iter().map(str::parse).collect::<Result<BTreeSet<_>>>().map(Self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimateConfig {
    pub duration_ms: u64,
    /// Interpolated frames in the steady phase.
    pub frames: usize,
}

impl Default for AnimateConfig {
    fn default() -> Self { Self { duration_ms: 500, frames: 10 } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransitionPhase {
    Idle,
    /// New points are inserted as gaps, then receive their target y.
    Entering,
    /// Shared points and whitelisted props interpolate.
    Steady,
    /// Departing points are forced to gaps.
    Exiting,
    /// Departing points are gone; props equal the target.
    Removed,
}

/// One transition from `current` to `next`. Advanced by an [`AnimationDriver`].
#[derive(Clone, Debug)]
pub struct Transition {
    whitelist: TweenWhitelist,
    config: AnimateConfig,
    from: ChartProps,
    to: ChartProps,
    start: BTreeMap<usize, NormalizedPoint>,
    end: BTreeMap<usize, NormalizedPoint>,
    entering: BTreeSet<usize>,
    exiting: BTreeSet<usize>,
    phase: TransitionPhase,
}

pub struct AnimationBridge;

impl AnimationBridge {
    /// Plan a transition. Points are matched by input index.
    pub fn tween(whitelist: &TweenWhitelist, current: &ChartProps, next: &ChartProps, config: AnimateConfig) -> Transition {
        let start: BTreeMap<_, _> = current.dataset().into_iter().map(|p| (p.index, p)).collect();
        let end: BTreeMap<_, _> = next.dataset().into_iter().map(|p| (p.index, p)).collect();
        let (entering, exiting) = if whitelist.allows(TweenProp::Data) {
            (
                end.keys().filter(|i| !start.contains_key(i)).copied().collect(),
                start.keys().filter(|i| !end.contains_key(i)).copied().collect(),
            )
        } else {
            (BTreeSet::new(), BTreeSet::new())
        };
        tracing::debug!(entering = ?entering, exiting = ?exiting, "transition planned");
        Transition {
            whitelist: whitelist.clone(),
            config,
            from: current.clone(),
            to: next.clone(),
            start,
            end,
            entering,
            exiting,
            phase: TransitionPhase::Idle,
        }
    }
}

impl Transition {
    pub fn phase(&self) -> TransitionPhase { self.phase }
    pub fn config(&self) -> AnimateConfig { self.config }
    pub fn entering(&self) -> &BTreeSet<usize> { &self.entering }
    pub fn exiting(&self) -> &BTreeSet<usize> { &self.exiting }
    pub fn is_done(&self) -> bool { self.phase == TransitionPhase::Removed }

    /// Move to the next phase, skipping Entering/Exiting when no point enters/exits.
    pub fn advance(&mut self) -> TransitionPhase {
        use TransitionPhase::*;
        self.phase = match self.phase {
            Idle if !self.entering.is_empty() => Entering,
            Idle | Entering => Steady,
            Steady if !self.exiting.is_empty() => Exiting,
            Steady | Exiting | Removed => Removed,
        };
        self.phase
    }

    /// Props for progress `t` in `[0, 1]` within the current phase.
    pub fn frame(&self, t: f64) -> ChartProps {
        let t = t.clamp(0.0, 1.0);
        let points = match self.phase {
            TransitionPhase::Idle => self.start.values().cloned().collect(),
            TransitionPhase::Entering => self.entering_points(t),
            TransitionPhase::Steady => self.steady_points(t),
            TransitionPhase::Exiting => self.exiting_points(),
            TransitionPhase::Removed => self.end.values().cloned().collect(),
        };
        let progress = match self.phase {
            TransitionPhase::Idle | TransitionPhase::Entering => 0.0,
            TransitionPhase::Steady => t,
            TransitionPhase::Exiting | TransitionPhase::Removed => 1.0,
        };
        self.props_with(points, progress)
    }

    /// Shared points at their start values; entering points as gaps until `t` reaches 1.
    fn entering_points(&self, t: f64) -> Vec<NormalizedPoint> {
        let mut points: Vec<_> = self.start.values().cloned().collect();
        for i in &self.entering {
            if let Some(p) = self.end.get(i) {
                let mut p = p.clone();
                if t < 1.0 {
                    p.y = None; // enter: before
                }
                points.push(p);
            }
        }
        points.sort_by_key(|p| p.index);
        points
    }

    /// Shared points interpolate; entering points sit at their targets; exiting points hold.
    fn steady_points(&self, t: f64) -> Vec<NormalizedPoint> {
        let mut points = Vec::with_capacity(self.start.len().max(self.end.len()));
        for (i, end) in &self.end {
            match self.start.get(i) {
                Some(start) => points.push(self.lerp_point(start, end, t)),
                None => points.push(end.clone()),
            }
        }
        points.extend(self.exiting.iter().filter_map(|i| self.start.get(i)).cloned());
        points.sort_by_key(|p| p.index);
        points
    }

    /// Target points plus departing points forced to gaps.
    fn exiting_points(&self) -> Vec<NormalizedPoint> {
        let mut points: Vec<_> = self.end.values().cloned().collect();
        points.extend(self.exiting.iter().filter_map(|i| self.start.get(i)).map(|p| NormalizedPoint { y: None, ..p.clone() }));
        points.sort_by_key(|p| p.index);
        points
    }

    fn lerp_point(&self, start: &NormalizedPoint, end: &NormalizedPoint, t: f64) -> NormalizedPoint {
        let x = match self.whitelist.allows(TweenProp::X) {
            true => lerp_axis(&start.x, &end.x, t),
            false => end.x.clone(),
        };
        let y = match (&start.y, &end.y) {
            (Some(a), Some(b)) if self.whitelist.allows(TweenProp::Y) => Some(lerp_axis(a, b, t)),
            // a point turning into (or out of) a gap is a gap until the target is reached
            (Some(_), None) | (None, Some(_)) if t < 1.0 => None,
            _ => end.y.clone(),
        };
        NormalizedPoint { x, y, ..end.clone() }
    }

    fn props_with(&self, points: Vec<NormalizedPoint>, t: f64) -> ChartProps {
        let w = &self.whitelist;
        let (from, to) = (&self.from, &self.to);
        let lerp = |a: f64, b: f64| a + (b - a) * t;

        let mut props = to.clone();
        props.data = Some(points.iter().map(NormalizedPoint::to_json).collect());
        props.x = Accessor::key("x");
        props.y = Accessor::key("y");
        props.animate = None;
        if w.allows(TweenProp::Width) {
            props.width = lerp(from.width, to.width);
        }
        if w.allows(TweenProp::Height) {
            props.height = lerp(from.height, to.height);
        }
        if w.allows(TweenProp::Padding) {
            props.padding = from.padding.lerp(&to.padding, t);
        }
        if w.allows(TweenProp::Samples) {
            props.samples = lerp(from.samples as f64, to.samples as f64).round().max(1.0) as usize;
        }
        if w.allows(TweenProp::Style) {
            props.style = from.style.lerp(&to.style, t);
        }
        if w.allows(TweenProp::Domain) {
            if let (Some(a), Some(b)) = (&from.domain, &to.domain) {
                props.domain = Some(a.lerp(b, t));
            }
        }
        props
    }
}

/// Numbers interpolate; text snaps to the target.
fn lerp_axis(a: &AxisValue, b: &AxisValue, t: f64) -> AxisValue {
    match (a, b) {
        (AxisValue::Number(a), AxisValue::Number(b)) => AxisValue::Number(a + (b - a) * t),
        _ => b.clone(),
    }
}

/// External scheduler that owns the transition's timing.
pub trait AnimationDriver {
    /// Drive `transition` to completion, emitting the props of every frame.
    fn run(&mut self, transition: &mut Transition, frame: &mut dyn FnMut(ChartProps));
}

/// Synchronous driver: one frame per hook in Entering/Exiting, `steps` frames in Steady.
#[derive(Clone, Copy, Debug)]
pub struct StepDriver {
    pub steps: usize,
}

impl StepDriver {
    pub fn new(steps: usize) -> Self { Self { steps: steps.max(1) } }
}

impl AnimationDriver for StepDriver {
    fn run(&mut self, transition: &mut Transition, frame: &mut dyn FnMut(ChartProps)) {
        while !transition.is_done() {
            match transition.advance() {
                TransitionPhase::Entering => {
                    frame(transition.frame(0.0));
                    frame(transition.frame(1.0));
                }
                TransitionPhase::Steady => {
                    for i in 1..=self.steps {
                        frame(transition.frame(i as f64 / self.steps as f64));
                    }
                }
                TransitionPhase::Exiting | TransitionPhase::Removed => frame(transition.frame(1.0)),
                TransitionPhase::Idle => {}
            }
        }
    }
}
