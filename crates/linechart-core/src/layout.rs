// File: crates/linechart-core/src/layout.rs
// Summary: Screen-space geometry for the line path, per-point markers/labels, and the trailing series label.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::dataset::{AxisValue, NormalizedPoint};
use crate::events::{ElementKind, ElementState};
use crate::scale::Scales;
use crate::segment::Segment;
use crate::style::{default_data_style, default_label_style, default_marker_style, ChartStyle, Style};

/// Label text computed from a point and its input index.
pub type LabelFn = Arc<dyn Fn(&NormalizedPoint, usize) -> Option<String> + Send + Sync>;

/// Where per-point label text comes from when the point carries no `label` field.
#[derive(Clone)]
pub enum LabelSpec {
    Function(LabelFn),
    /// Indexed by the point's input index.
    List(Vec<String>),
}

impl LabelSpec {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&NormalizedPoint, usize) -> Option<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    fn text_for(&self, point: &NormalizedPoint) -> Option<String> {
        match self {
            Self::Function(f) => f(point, point.index),
            Self::List(list) => list.get(point.index).cloned(),
        }
    }
}

impl fmt::Debug for LabelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LabelOptions<'a> {
    pub spec: Option<&'a LabelSpec>,
    /// Attach a (possibly empty) label to every marker.
    pub always_show: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelGeometry {
    pub text: String,
    pub px: f64,
    pub py: f64,
    /// `fill` is the text colour; labels never carry the line's stroke treatment.
    pub style: Style,
    pub text_anchor: TextAnchor,
    pub vertical_anchor: VerticalAnchor,
}

/// Marker (and optional label) for one non-gap point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementGeometry {
    /// Input index of the point; key for events and element state.
    pub index: usize,
    pub x: AxisValue,
    pub y: AxisValue,
    pub px: f64,
    pub py: f64,
    pub style: Style,
    pub label: Option<LabelGeometry>,
    pub datum: Value,
}

/// One polyline per segment, in pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineGeometry {
    pub segments: Vec<Vec<(f64, f64)>>,
    pub style: Style,
    /// Curve family name, passed through to the drawing collaborator.
    pub interpolation: String,
}

fn label_base_style(style: &ChartStyle) -> Style {
    let mut base = default_label_style().merge(&style.labels);
    if style.labels.fill.is_none() {
        base.fill = default_data_style().merge(&style.data).stroke;
    }
    base
}

/// Markers and labels for every point with a y value, in input order.
///
/// Style precedence, later wins: built-in defaults, caller style, computed fields,
/// then the element-state override stored for that index.
pub fn layout(
    data: &[NormalizedPoint],
    scales: &Scales,
    style: &ChartStyle,
    labels: LabelOptions<'_>,
    state: &ElementState,
) -> Vec<ElementGeometry> {
    let marker_base = default_marker_style().merge(&style.markers);
    let label_base = label_base_style(style);

    data.iter()
        .filter_map(|point| {
            let y = point.y.as_ref()?;
            let (Some(px), Some(py)) = (scales.x.map_value(&point.x), scales.y.map_value(y)) else {
                tracing::trace!(index = point.index, "point outside scale, skipped");
                return None;
            };

            let marker_patch = state.get(ElementKind::Markers, Some(point.index));
            let marker_style = match marker_patch {
                Some(patch) => marker_base.merge(&patch.style),
                None => marker_base.clone(),
            };

            let label_patch = state.get(ElementKind::Labels, Some(point.index));
            let text = label_patch
                .and_then(|p| p.text.clone())
                .or_else(|| point.label.clone())
                .or_else(|| labels.spec.and_then(|s| s.text_for(point)))
                .or_else(|| labels.always_show.then(String::new));
            let label = text.map(|text| {
                let label_style = match label_patch {
                    Some(patch) => label_base.merge(&patch.style),
                    None => label_base.clone(),
                };
                let offset = label_style.padding.unwrap_or(0.0);
                LabelGeometry {
                    text,
                    px,
                    py: py - offset,
                    style: label_style,
                    text_anchor: TextAnchor::Middle,
                    vertical_anchor: VerticalAnchor::End,
                }
            });

            Some(ElementGeometry {
                index: point.index,
                x: point.x.clone(),
                y: y.clone(),
                px,
                py,
                style: marker_style,
                label,
                datum: point.datum.clone(),
            })
        })
        .collect()
}

/// Line path for the segments. The data style override is stored without an index.
pub fn line_path(
    segments: &[Segment<'_>],
    scales: &Scales,
    style: &ChartStyle,
    interpolation: &str,
    state: &ElementState,
) -> LineGeometry {
    let mut line_style = default_data_style().merge(&style.data);
    if let Some(patch) = state.get(ElementKind::Data, None) {
        line_style = line_style.merge(&patch.style);
    }
    let segments = segments
        .iter()
        .map(|seg| {
            seg.iter()
                .filter_map(|p| {
                    let y = p.y.as_ref()?;
                    Some((scales.x.map_value(&p.x)?, scales.y.map_value(y)?))
                })
                .collect::<Vec<_>>()
        })
        .filter(|pts| !pts.is_empty())
        .collect();
    LineGeometry { segments, style: line_style, interpolation: interpolation.to_string() }
}

/// Trailing label placed right of the last point of the last segment.
pub fn series_label(
    segments: &[Segment<'_>],
    scales: &Scales,
    text: &str,
    style: &ChartStyle,
) -> Option<LabelGeometry> {
    let last = segments.last()?.last()?;
    let px = scales.x.map_value(&last.x)?;
    let py = scales.y.map_value(last.y.as_ref()?)?;
    let label_style = label_base_style(style);
    let offset = label_style.padding.unwrap_or(0.0);
    Some(LabelGeometry {
        text: text.to_string(),
        px: px + offset,
        py,
        style: label_style,
        text_anchor: TextAnchor::Start,
        vertical_anchor: VerticalAnchor::Middle,
    })
}
