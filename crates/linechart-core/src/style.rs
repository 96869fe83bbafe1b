// File: crates/linechart-core/src/style.rs
// Summary: Typed style records, per-element-kind style props, and the ordered merge they use.

use serde::{Deserialize, Serialize};

/// Partial visual style. Every field is optional so records can be layered with [`Style::merge`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Marker radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Label offset from its anchor point, in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

impl Style {
    pub fn fill(mut self, v: impl Into<String>) -> Self { self.fill = Some(v.into()); self }
    pub fn stroke(mut self, v: impl Into<String>) -> Self { self.stroke = Some(v.into()); self }
    pub fn stroke_width(mut self, v: f64) -> Self { self.stroke_width = Some(v); self }
    pub fn opacity(mut self, v: f64) -> Self { self.opacity = Some(v); self }
    pub fn size(mut self, v: f64) -> Self { self.size = Some(v); self }
    pub fn font_size(mut self, v: f64) -> Self { self.font_size = Some(v); self }
    pub fn padding(mut self, v: f64) -> Self { self.padding = Some(v); self }

    pub fn is_empty(&self) -> bool { *self == Self::default() }

    /// Layer `over` on top of `self`: every field set in `over` wins.
    pub fn merge(&self, over: &Style) -> Style {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }
        Style {
            fill: pick(&self.fill, &over.fill),
            stroke: pick(&self.stroke, &over.stroke),
            stroke_width: pick(&self.stroke_width, &over.stroke_width),
            stroke_dasharray: pick(&self.stroke_dasharray, &over.stroke_dasharray),
            opacity: pick(&self.opacity, &over.opacity),
            size: pick(&self.size, &over.size),
            font_size: pick(&self.font_size, &over.font_size),
            font_family: pick(&self.font_family, &over.font_family),
            padding: pick(&self.padding, &over.padding),
        }
    }

    /// Merge a stack of layers, lowest precedence first.
    pub fn layered<'a>(layers: impl IntoIterator<Item = &'a Style>) -> Style {
        layers.into_iter().fold(Style::default(), |acc, s| acc.merge(s))
    }

    /// Numeric fields interpolate when set on both sides; everything else takes `other`.
    pub fn lerp(&self, other: &Style, t: f64) -> Style {
        let num = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            (_, b) => b,
        };
        Style {
            stroke_width: num(self.stroke_width, other.stroke_width),
            opacity: num(self.opacity, other.opacity),
            size: num(self.size, other.size),
            font_size: num(self.font_size, other.font_size),
            padding: num(self.padding, other.padding),
            ..other.clone()
        }
    }
}

/// Caller-supplied style props per element kind.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub parent: Style,
    pub data: Style,
    pub markers: Style,
    pub labels: Style,
}

impl ChartStyle {
    pub fn lerp(&self, other: &ChartStyle, t: f64) -> ChartStyle {
        ChartStyle {
            parent: self.parent.lerp(&other.parent, t),
            data: self.data.lerp(&other.data, t),
            markers: self.markers.lerp(&other.markers, t),
            labels: self.labels.lerp(&other.labels, t),
        }
    }
}

/// Built-in line style, the lowest layer of the merge.
pub fn default_data_style() -> Style {
    Style::default().fill("none").stroke("#252525").stroke_width(2.0).opacity(1.0)
}

/// Built-in marker style.
pub fn default_marker_style() -> Style {
    Style::default().fill("#252525").size(3.0).opacity(1.0)
}

/// Built-in label style. No fill: labels fall back to the line stroke colour.
pub fn default_label_style() -> Style {
    Style {
        font_family: Some("sans-serif".into()),
        ..Style::default().font_size(14.0).padding(5.0)
    }
}
