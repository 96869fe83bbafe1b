// File: crates/linechart-core/src/chart.rs
// Summary: LineChart orchestrator: props + element state -> ChartGeometry; event dispatch; animated transitions.

use serde::Serialize;

use crate::animation::{AnimationBridge, AnimationDriver, TweenWhitelist};
use crate::config::ChartProps;
use crate::domain::{self, Axis, Domain};
use crate::error::Result;
use crate::events::{scope, ChartEvent, ElementKind, ElementPatch, ElementState};
use crate::layout::{self, ElementGeometry, LabelGeometry, LabelOptions, LineGeometry};
use crate::scale::{Scale, ScaleKind, Scales};
use crate::segment::segment;
use crate::types::PlotRect;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Domains {
    pub x: Domain,
    pub y: Domain,
}

/// Everything the rendering collaborator needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub standalone: bool,
    pub plot: PlotRect,
    pub domain: Domains,
    pub line: LineGeometry,
    pub elements: Vec<ElementGeometry>,
    pub series_label: Option<LabelGeometry>,
}

impl ChartGeometry {
    pub fn element(&self, index: usize) -> Option<&ElementGeometry> {
        self.elements.iter().find(|e| e.index == index)
    }
}

fn build_scale(axis: Axis, props: &ChartProps, data: &[crate::dataset::NormalizedPoint], plot: &PlotRect) -> Result<Scale> {
    let categories = domain::categories(axis, props, data);
    let kind = match categories {
        Some(_) => ScaleKind::Categorical,
        None => props.scale.for_axis(axis),
    };
    let range = match axis {
        Axis::X => plot.x_range(),
        Axis::Y => plot.y_range(),
    };
    Scale::build(kind, domain::domain(axis, props, data), range, categories)
}

/// Run the full pipeline for one set of props. Pure: identical inputs give identical geometry.
pub fn render_props(props: &ChartProps, state: &ElementState) -> Result<ChartGeometry> {
    props.validate()?;
    let data = props.dataset();
    let plot = PlotRect::new(props.width, props.height, &props.padding);
    let scales = Scales {
        x: build_scale(Axis::X, props, &data, &plot)?,
        y: build_scale(Axis::Y, props, &data, &plot)?,
    };

    let segments = segment(&data, scales.x.categories());
    let line = layout::line_path(&segments, &scales, &props.style, &props.interpolation, state);
    let labels = LabelOptions { spec: props.labels.as_ref(), always_show: props.always_show_labels };
    let elements = layout::layout(&data, &scales, &props.style, labels, state);
    let series_label = props
        .series_label
        .as_deref()
        .and_then(|text| layout::series_label(&segments, &scales, text, &props.style));

    tracing::debug!(
        points = data.len(),
        segments = segments.len(),
        elements = elements.len(),
        "rendered line chart"
    );
    Ok(ChartGeometry {
        width: props.width,
        height: props.height,
        standalone: props.standalone,
        plot,
        domain: Domains { x: scales.x.domain(), y: scales.y.domain() },
        line,
        elements,
        series_label,
    })
}

/// Top-level chart instance: owns its props and the element state that outlives renders.
#[derive(Clone, Debug, Default)]
pub struct LineChart {
    props: ChartProps,
    state: ElementState,
}

impl LineChart {
    pub fn new(props: ChartProps) -> Self {
        Self { props, state: ElementState::new() }
    }

    pub fn props(&self) -> &ChartProps { &self.props }
    pub fn state(&self) -> &ElementState { &self.state }

    /// Replace props; element state is kept (a re-render, not a remount).
    pub fn set_props(&mut self, props: ChartProps) { self.props = props; }

    /// Drop all element state, as a fresh mount would.
    pub fn remount(&mut self) { self.state.clear(); }

    #[tracing::instrument(skip_all)]
    pub fn render(&self) -> Result<ChartGeometry> {
        render_props(&self.props, &self.state)
    }

    /// Fire `event` on one element and store the handler's result. The next render picks it up.
    #[tracing::instrument(skip_all, fields(kind = ?kind, index = ?index, event = %event.name))]
    pub fn dispatch(&mut self, kind: ElementKind, index: Option<usize>, event: &ChartEvent) -> Result<Option<ElementPatch>> {
        let geometry = self.render()?;
        let bound = scope(self.props.events.for_kind(kind), kind, &geometry);
        let patch = bound.invoke(index, event);
        if let Some(patch) = &patch {
            self.state.apply(kind, index, patch.clone());
            tracing::debug!(entries = self.state.len(), "element state updated");
        }
        Ok(patch)
    }

    /// Transition to `next`, rendering every frame the driver emits; ends with `next` as the props.
    pub fn animate_to<D, F>(&mut self, next: ChartProps, driver: &mut D, mut on_frame: F) -> Result<()>
    where
        D: AnimationDriver,
        F: FnMut(ChartGeometry),
    {
        next.validate()?;
        let config = next.animate.or(self.props.animate).unwrap_or_default();
        let mut transition = AnimationBridge::tween(&TweenWhitelist::line(), &self.props, &next, config);
        let mut failed = None;
        driver.run(&mut transition, &mut |frame| {
            if failed.is_some() {
                return;
            }
            match render_props(&frame, &self.state) {
                Ok(geometry) => on_frame(geometry),
                Err(err) => failed = Some(err),
            }
        });
        if let Some(err) = failed {
            return Err(err);
        }
        self.props = next;
        Ok(())
    }
}
