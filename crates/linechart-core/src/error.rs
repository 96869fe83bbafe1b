// File: crates/linechart-core/src/error.rs
// Summary: Error taxonomy for the pipeline (configuration failures vs. locally recovered domain issues).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors that abort a render. Everything else is recovered with a documented default.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Unsupported scale kind, malformed accessor spec or an invalid numeric option.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Configuration JSON could not be parsed.
    #[error("invalid configuration json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChartError {
    pub fn config(msg: impl Into<String>) -> Self { Self::Configuration(msg.into()) }
}

/// Degenerate or invalid domain for a scale kind (e.g. non-positive bounds on a log scale).
/// Never returned from a render: the scale builder clamps and logs instead.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid {kind} domain [{min}, {max}]: {reason}")]
pub struct DomainError {
    pub kind: &'static str,
    pub min: f64,
    pub max: f64,
    pub reason: &'static str,
}
