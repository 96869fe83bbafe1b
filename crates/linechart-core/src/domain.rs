// File: crates/linechart-core/src/domain.rs
// Summary: Per-axis domain computation (explicit overrides, categorical label sets, data extent).

use serde::{Deserialize, Serialize};

use crate::config::ChartProps;
use crate::dataset::{AxisValue, NormalizedPoint};
use crate::scale::ScaleKind;
use crate::types::{FLAT_DOMAIN_FRACTION, FLAT_DOMAIN_MIN_HALF_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Value interval an axis represents. Contract: `min <= max`.
/// Deserializes from a `[min, max]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Bounds in either order; they are swapped when needed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }
    pub fn span(&self) -> f64 { self.max - self.min }
    pub fn is_flat(&self) -> bool { self.span() <= 0.0 }

    /// Extent of the finite values, `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(d) => Some(Self { min: d.min.min(v), max: d.max.max(v) }),
            })
    }

    /// Widen a zero-width domain symmetrically so a scale has non-zero extent.
    pub fn expanded(self) -> Self {
        if !self.is_flat() {
            return self;
        }
        let half = (self.min.abs() * FLAT_DOMAIN_FRACTION).max(FLAT_DOMAIN_MIN_HALF_WIDTH);
        let (min, max) = (self.min - half, self.max + half);
        // at the edge of f64, keep the bound and widen the other way instead
        match (min.is_finite(), max.is_finite()) {
            (true, false) => Self { min: self.min - 2.0 * half, max: self.max },
            (false, true) => Self { min: self.min, max: self.max + 2.0 * half },
            _ => Self { min, max },
        }
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(self.min + (other.min - self.min) * t, self.max + (other.max - self.max) * t)
    }
}

impl Default for Domain {
    fn default() -> Self { Self { min: 0.0, max: 1.0 } }
}

impl From<[f64; 2]> for Domain {
    fn from([a, b]: [f64; 2]) -> Self { Self::new(a, b) }
}

/// Domain override from props: one interval for both axes, or per-axis entries.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DomainProp {
    Both(Domain),
    PerAxis {
        #[serde(default)]
        x: Option<Domain>,
        #[serde(default)]
        y: Option<Domain>,
    },
}

impl DomainProp {
    /// Per-axis entries take precedence over the combined form (they cannot coexist in one value).
    pub fn for_axis(&self, axis: Axis) -> Option<Domain> {
        match (self, axis) {
            (Self::PerAxis { x, .. }, Axis::X) => *x,
            (Self::PerAxis { y, .. }, Axis::Y) => *y,
            (Self::Both(d), _) => Some(*d),
        }
    }

    pub(crate) fn lerp(&self, other: &Self, t: f64) -> Self {
        let pick = |a: Option<Domain>, b: Option<Domain>| match (a, b) {
            (Some(a), Some(b)) => Some(a.lerp(&b, t)),
            (_, b) => b,
        };
        match (self, other) {
            (Self::Both(a), Self::Both(b)) => Self::Both(a.lerp(b, t)),
            (a, b) => Self::PerAxis {
                x: pick(a.for_axis(Axis::X), b.for_axis(Axis::X)),
                y: pick(a.for_axis(Axis::Y), b.for_axis(Axis::Y)),
            },
        }
    }
}

/// Explicit category list: a bare list applies to x.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryProp {
    Shared(Vec<String>),
    PerAxis {
        #[serde(default)]
        x: Option<Vec<String>>,
        #[serde(default)]
        y: Option<Vec<String>>,
    },
}

impl CategoryProp {
    pub fn for_axis(&self, axis: Axis) -> Option<&[String]> {
        match (self, axis) {
            (Self::Shared(list), Axis::X) => Some(list),
            (Self::Shared(_), Axis::Y) => None,
            (Self::PerAxis { x, .. }, Axis::X) => x.as_deref(),
            (Self::PerAxis { y, .. }, Axis::Y) => y.as_deref(),
        }
    }
}

/// De-duplicated category labels in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Categories {
    labels: Vec<String>,
}

impl Categories {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::default();
        for label in labels {
            out.push(label.into());
        }
        out
    }

    /// Harvest from data values; numbers contribute their display form.
    pub fn harvest<'a>(values: impl IntoIterator<Item = &'a AxisValue>) -> Self {
        Self::from_labels(values.into_iter().map(ToString::to_string))
    }

    fn push(&mut self, label: String) {
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
    pub fn labels(&self) -> &[String] { &self.labels }

    /// Ordinal rank of a value, matched by display form.
    pub fn rank(&self, value: &AxisValue) -> Option<usize> {
        let key = value.to_string();
        self.labels.iter().position(|l| *l == key)
    }
}

fn axis_values(axis: Axis, data: &[NormalizedPoint]) -> impl Iterator<Item = &AxisValue> + '_ {
    data.iter().filter_map(move |p| match axis {
        Axis::X => Some(&p.x),
        // gaps never contribute to the y extent
        Axis::Y => p.y.as_ref(),
    })
}

/// Category list when `axis` is categorical: explicit categories, a categorical scale kind,
/// or any axis value with no numeric reading.
pub fn categories(axis: Axis, props: &ChartProps, data: &[NormalizedPoint]) -> Option<Categories> {
    if let Some(list) = props.categories.as_ref().and_then(|c| c.for_axis(axis)) {
        return Some(Categories::from_labels(list.iter().cloned()));
    }
    let categorical = props.scale.for_axis(axis) == ScaleKind::Categorical
        || axis_values(axis, data).any(AxisValue::is_category);
    categorical.then(|| Categories::harvest(axis_values(axis, data)))
}

/// Domain for one axis. Priority: per-axis override, combined override, categories, data extent.
pub fn domain(axis: Axis, props: &ChartProps, data: &[NormalizedPoint]) -> Domain {
    if let Some(d) = props.domain.as_ref().and_then(|d| d.for_axis(axis)) {
        return d.expanded();
    }
    if let Some(cats) = categories(axis, props, data) {
        // [0, 0] for a single category is fine: the categorical scale pads half a step each side
        return match cats.len() {
            0 => Domain::default(),
            n => Domain::new(0.0, (n - 1) as f64),
        };
    }
    Domain::from_values(axis_values(axis, data).filter_map(AxisValue::as_f64))
        .map(Domain::expanded)
        .unwrap_or_default()
}
