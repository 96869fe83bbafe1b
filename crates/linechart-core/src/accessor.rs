// File: crates/linechart-core/src/accessor.rs
// Summary: Declarative accessors that pull one axis value out of an arbitrarily shaped data point.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ChartError, Result};

/// User function invoked as `(point, index, full_data)`.
pub type AccessorFn = Arc<dyn Fn(&Value, usize, &[Value]) -> Value + Send + Sync>;

/// One step of a nested lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// How one axis value is extracted from a raw point.
#[derive(Clone)]
pub enum Accessor {
    Function(AccessorFn),
    /// Positional lookup into an array point.
    Index(usize),
    /// Nested lookup through objects and arrays.
    Path(Vec<PathSegment>),
    /// The point itself.
    Identity,
}

impl Accessor {
    /// Single object key, no path parsing (`"a.b"` stays one key).
    pub fn key(key: impl Into<String>) -> Self {
        Self::Path(vec![PathSegment::Key(key.into())])
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Value, usize, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Parse dotted/bracketed path syntax: `a.b`, `points[2].y`, `meta['k.with.dots']`.
    pub fn parse(path: &str) -> Result<Self> {
        parse_path(path).map(Self::Path)
    }

    /// Path given as explicit segments; every element is one key (numeric keys also index arrays).
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Path(segments.into_iter().map(|s| PathSegment::Key(s.into())).collect())
    }

    /// Build from a configuration value: null, non-negative integer, string, or array of strings.
    pub fn from_json(spec: &Value) -> Result<Self> {
        match spec {
            Value::Null => Ok(Self::Identity),
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(Self::Index)
                .ok_or_else(|| ChartError::config(format!("malformed accessor spec: index {n} is not a non-negative integer"))),
            Value::String(s) => Self::parse(s),
            Value::Array(items) => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => keys.push(s.clone()),
                        other => return Err(ChartError::config(format!("malformed accessor spec: path segment {other} is not a string"))),
                    }
                }
                if keys.is_empty() {
                    return Err(ChartError::config("malformed accessor spec: empty path"));
                }
                Ok(Self::from_segments(keys))
            }
            other => Err(ChartError::config(format!("malformed accessor spec: {other}"))),
        }
    }

    pub fn is_function(&self) -> bool { matches!(self, Self::Function(_)) }

    /// Resolve against one point. `None` means the value is missing (an accessor miss, not an error).
    pub fn resolve(&self, point: &Value, index: usize, data: &[Value]) -> Option<Value> {
        match self {
            Self::Function(f) => Some(f(point, index, data)),
            Self::Index(i) => lookup(point, std::slice::from_ref(&PathSegment::Index(*i))).cloned(),
            Self::Path(path) => lookup(point, path).cloned(),
            Self::Identity => Some(point.clone()),
        }
    }
}

impl Default for Accessor {
    fn default() -> Self { Self::Identity }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Identity => f.write_str("Identity"),
        }
    }
}

impl PartialEq for Accessor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Function(a), Self::Function(b)) => Arc::ptr_eq(a, b),
            (Self::Index(a), Self::Index(b)) => a == b,
            (Self::Path(a), Self::Path(b)) => a == b,
            (Self::Identity, Self::Identity) => true,
            _ => false,
        }
    }
}

fn lookup<'v>(point: &'v Value, path: &[PathSegment]) -> Option<&'v Value> {
    path.iter().try_fold(point, |cur, seg| match (seg, cur) {
        (PathSegment::Key(k), Value::Object(map)) => map.get(k),
        (PathSegment::Key(k), Value::Array(items)) => k.parse::<usize>().ok().and_then(|i| items.get(i)),
        (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
        (PathSegment::Index(i), Value::Object(map)) => map.get(&i.to_string()),
        _ => None,
    })
}

fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let malformed = |why: &str| ChartError::config(format!("malformed accessor path {path:?}: {why}"));
    let mut segments = Vec::new();
    let mut key = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut key)));
                }
            }
            '[' => {
                if !key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut key)));
                }
                let quote = match chars.peek() {
                    Some(&q) if q == '\'' || q == '"' => {
                        chars.next();
                        Some(q)
                    }
                    _ => None,
                };
                let mut inner = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match quote {
                        Some(q) if c == q => {
                            if chars.next() != Some(']') {
                                return Err(malformed("expected ']' after quoted key"));
                            }
                            closed = true;
                            break;
                        }
                        None if c == ']' => {
                            closed = true;
                            break;
                        }
                        _ => inner.push(c),
                    }
                }
                if !closed {
                    return Err(malformed("unterminated '['"));
                }
                let seg = match quote {
                    Some(_) => PathSegment::Key(inner),
                    None => match inner.trim().parse::<usize>() {
                        Ok(i) => PathSegment::Index(i),
                        Err(_) => PathSegment::Key(inner),
                    },
                };
                segments.push(seg);
            }
            c => key.push(c),
        }
    }
    if !key.is_empty() {
        segments.push(PathSegment::Key(key));
    }
    if segments.is_empty() {
        return Err(malformed("empty path"));
    }
    Ok(segments)
}
