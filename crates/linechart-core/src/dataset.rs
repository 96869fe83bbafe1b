// File: crates/linechart-core/src/dataset.rs
// Summary: Normalized points and the dataset builder (raw points or synthetic samples -> NormalizedPoint list).

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::accessor::Accessor;
use crate::domain::Domain;

/// A resolved axis value: numeric, or text (category name or timestamp string).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Text(String),
}

impl AxisValue {
    /// Scalars only; null, arrays and objects have no axis reading.
    pub fn from_json(v: &Value) -> Option<Self> {
        match v {
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Number(if *b { 1.0 } else { 0.0 })),
            _ => None,
        }
    }

    /// Numeric reading. Text parses as an RFC 3339 timestamp or `YYYY-MM-DD` date (epoch millis).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => parse_timestamp(s),
        }
    }

    /// True for text with no numeric reading; such values make an axis categorical.
    pub fn is_category(&self) -> bool {
        matches!(self, Self::Text(_)) && self.as_f64().is_none()
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(n) => json!(n),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self { Self::Number(v) }
}

impl From<&str> for AxisValue {
    fn from(v: &str) -> Self { Self::Text(v.to_string()) }
}

fn parse_timestamp(s: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis() as f64)
}

/// One raw point after accessor resolution. `y == None` marks a gap.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub x: AxisValue,
    pub y: Option<AxisValue>,
    pub label: Option<String>,
    /// Position in the input sequence; stable element key for events and state.
    pub index: usize,
    /// The original point, untouched.
    pub datum: Value,
}

impl NormalizedPoint {
    pub fn is_gap(&self) -> bool { self.y.is_none() }

    /// Re-encode as an object point readable with the default `"x"`/`"y"` accessors.
    /// Original object fields are kept; `x`, `y` and `label` are overwritten.
    pub fn to_json(&self) -> Value {
        let mut obj = match &self.datum {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        obj.insert("x".into(), self.x.to_json());
        obj.insert("y".into(), self.y.as_ref().map_or(Value::Null, AxisValue::to_json));
        match &self.label {
            Some(label) => obj.insert("label".into(), Value::String(label.clone())),
            None => obj.remove("label"),
        };
        Value::Object(obj)
    }
}

/// Resolve every raw point, or synthesize `samples` points over `x_domain` (default `[0, 1]`)
/// when `raw` is absent. Output order equals input order.
pub fn build(
    raw: Option<&[Value]>,
    x: &Accessor,
    y: &Accessor,
    samples: usize,
    x_domain: Option<Domain>,
) -> Vec<NormalizedPoint> {
    let points = match raw {
        Some(data) => from_raw(data, x, y),
        None => synthesize(y, samples, x_domain.unwrap_or_default()),
    };
    tracing::trace!(
        points = points.len(),
        gaps = points.iter().filter(|p| p.is_gap()).count(),
        synthetic = raw.is_none(),
        "dataset built"
    );
    points
}

fn from_raw(data: &[Value], x: &Accessor, y: &Accessor) -> Vec<NormalizedPoint> {
    data.iter()
        .enumerate()
        .map(|(index, datum)| {
            let x = x
                .resolve(datum, index, data)
                .as_ref()
                .and_then(AxisValue::from_json)
                .unwrap_or(AxisValue::Number(index as f64));
            let y = y.resolve(datum, index, data).as_ref().and_then(AxisValue::from_json);
            NormalizedPoint { x, y, label: label_of(datum), index, datum: datum.clone() }
        })
        .collect()
}

/// `steps` evenly spaced values from `start` to `end` inclusive; a single step yields `start`.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n as f64 - 1.0);
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

fn synthesize(y: &Accessor, samples: usize, domain: Domain) -> Vec<NormalizedPoint> {
    let xs = linspace(domain.min, domain.max, samples.max(1));
    let raw: Vec<Value> = xs.iter().map(|x| json!({ "x": x })).collect();

    xs.iter()
        .zip(&raw)
        .enumerate()
        .map(|(index, (&xv, datum))| {
            // a non-function y spec has nothing to evaluate: the sampled curve is y = x
            let y = if y.is_function() {
                y.resolve(datum, index, &raw).as_ref().and_then(AxisValue::from_json)
            } else {
                Some(AxisValue::Number(xv))
            };
            NormalizedPoint { x: AxisValue::Number(xv), y, label: None, index, datum: datum.clone() }
        })
        .collect()
}

fn label_of(datum: &Value) -> Option<String> {
    match datum.get("label")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
