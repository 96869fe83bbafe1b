// File: crates/linechart-core/src/scale.rs
// Summary: Domain -> pixel range transforms (linear, log10, sqrt, time, categorical).

use std::str::FromStr;

use serde::Serialize;

use crate::dataset::AxisValue;
use crate::domain::{Axis, Categories, Domain};
use crate::error::{ChartError, DomainError, Result};
use crate::types::LOG_EPSILON;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Sqrt,
    /// Linear over epoch milliseconds.
    Time,
    Categorical,
}

impl ScaleKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Time => "time",
            Self::Categorical => "categorical",
        }
    }
}

impl FromStr for ScaleKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            "sqrt" => Ok(Self::Sqrt),
            "time" => Ok(Self::Time),
            "categorical" => Ok(Self::Categorical),
            other => Err(ChartError::config(format!("unsupported scale kind {other:?}"))),
        }
    }
}

/// Scale kind from props: one kind for both axes or per-axis kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleProp {
    Shared(ScaleKind),
    PerAxis { x: ScaleKind, y: ScaleKind },
}

impl ScaleProp {
    pub fn for_axis(&self, axis: Axis) -> ScaleKind {
        match (self, axis) {
            (Self::Shared(k), _) => *k,
            (Self::PerAxis { x, .. }, Axis::X) => *x,
            (Self::PerAxis { y, .. }, Axis::Y) => *y,
        }
    }
}

impl Default for ScaleProp {
    fn default() -> Self { Self::Shared(ScaleKind::Linear) }
}

/// Built mapping from one axis domain to a pixel range. Stateless once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: Domain,
    range: (f64, f64),
    categories: Option<Categories>,
    // transformed endpoints, cached (log10 / signed sqrt / half-step padded rank)
    t_min: f64,
    t_max: f64,
}

impl Scale {
    /// Build a scale. Categorical kinds need a category list. A log domain with non-positive
    /// bounds is clamped to `LOG_EPSILON` instead of failing.
    pub fn build(kind: ScaleKind, domain: Domain, range: (f64, f64), categories: Option<Categories>) -> Result<Self> {
        let (domain, t_min, t_max) = match kind {
            ScaleKind::Linear | ScaleKind::Time => (domain, domain.min, domain.max),
            ScaleKind::Sqrt => (domain, signed_sqrt(domain.min), signed_sqrt(domain.max)),
            ScaleKind::Log => {
                let d = check_log_domain(domain).unwrap_or_else(|err| {
                    tracing::warn!(%err, "clamping log scale domain");
                    clamp_log_domain(domain)
                });
                (d, d.min.log10(), d.max.log10())
            }
            ScaleKind::Categorical => {
                if categories.is_none() {
                    return Err(ChartError::config("categorical scale requires a category list"));
                }
                (domain, domain.min - 0.5, domain.max + 0.5)
            }
        };
        Ok(Self { kind, domain, range, categories, t_min, t_max })
    }

    pub fn kind(&self) -> ScaleKind { self.kind }
    pub fn domain(&self) -> Domain { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }
    pub fn categories(&self) -> Option<&Categories> { self.categories.as_ref() }

    fn transform(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Log => v.max(LOG_EPSILON).log10(),
            ScaleKind::Sqrt => signed_sqrt(v),
            _ => v,
        }
    }

    fn untransform(&self, t: f64) -> f64 {
        match self.kind {
            ScaleKind::Log => 10f64.powf(t),
            ScaleKind::Sqrt => t.signum() * t * t,
            _ => t,
        }
    }

    /// Map a numeric domain value (category rank for categorical scales) to pixels.
    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let span = self.t_max - self.t_min;
        // only a domain built flat by hand lands here; it collapses to the range centre
        if span == 0.0 {
            return (self.range.0 + self.range.1) * 0.5;
        }
        let frac = (self.transform(v) - self.t_min) / span;
        self.range.0 + frac * (self.range.1 - self.range.0)
    }

    /// Map an axis value. `None` for values this scale cannot place (unknown category, non-numeric text).
    pub fn map_value(&self, v: &AxisValue) -> Option<f64> {
        match &self.categories {
            Some(cats) => cats.rank(v).map(|r| self.map(r as f64)),
            None => v.as_f64().map(|n| self.map(n)),
        }
    }

    /// Pixel back to domain units (category rank for categorical scales).
    pub fn invert(&self, px: f64) -> f64 {
        let extent = self.range.1 - self.range.0;
        let frac = if extent == 0.0 { 0.0 } else { (px - self.range.0) / extent };
        self.untransform(self.t_min + frac * (self.t_max - self.t_min))
    }
}

/// The x and y scales of one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Scales {
    pub x: Scale,
    pub y: Scale,
}

fn signed_sqrt(v: f64) -> f64 { v.signum() * v.abs().sqrt() }

fn check_log_domain(d: Domain) -> std::result::Result<Domain, DomainError> {
    if d.min <= 0.0 || d.max <= 0.0 {
        return Err(DomainError { kind: "log", min: d.min, max: d.max, reason: "bounds must be strictly positive" });
    }
    Ok(d)
}

fn clamp_log_domain(d: Domain) -> Domain {
    let min = if d.min <= LOG_EPSILON { LOG_EPSILON } else { d.min };
    let max = if d.max <= min { min * 10.0 } else { d.max };
    Domain { min, max }
}
