// File: crates/linechart-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, tunable epsilons, plot rect).

use serde::{Deserialize, Serialize};

/// Default chart width in pixels.
pub const WIDTH: f64 = 450.0;
/// Default chart height in pixels.
pub const HEIGHT: f64 = 300.0;
/// Default padding on every side, in pixels.
pub const PADDING: f64 = 50.0;
/// Default number of synthetic samples when no data is supplied.
pub const SAMPLES: usize = 50;
/// Default curve family handed to the drawing collaborator.
pub const INTERPOLATION: &str = "linear";

/// Half-width of an expanded zero-width domain, as a fraction of the value.
/// 1% keeps a flat series centered without visibly stretching real ranges.
pub const FLAT_DOMAIN_FRACTION: f64 = 0.01;
/// Lower bound for the half-width above (applies when the flat value is 0).
pub const FLAT_DOMAIN_MIN_HALF_WIDTH: f64 = 1e-9;
/// Smallest value a log scale accepts; non-positive inputs are clamped to it.
pub const LOG_EPSILON: f64 = 1e-12;

/// Screen padding, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self { top, bottom, left, right }
    }
    /// Same padding on every side.
    pub const fn uniform(v: f64) -> Self { Self::new(v, v, v, v) }
    /// Total horizontal padding (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical padding (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }

    pub(crate) fn clamped(self) -> Self {
        Self::new(self.top.max(0.0), self.bottom.max(0.0), self.left.max(0.0), self.right.max(0.0))
    }

    pub(crate) fn lerp(&self, other: &Self, t: f64) -> Self {
        let l = |a: f64, b: f64| a + (b - a) * t;
        Self::new(l(self.top, other.top), l(self.bottom, other.bottom), l(self.left, other.left), l(self.right, other.right))
    }
}

impl Default for Padding {
    fn default() -> Self { Self::uniform(PADDING) }
}

/// Plot area in pixels: the chart box minus padding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    pub fn new(width: f64, height: f64, padding: &Padding) -> Self {
        let padding = padding.clamped();
        let left = padding.left;
        let top = padding.top;
        // a padding wider than the box collapses the plot to a line instead of inverting it
        let right = (width - padding.right).max(left);
        let bottom = (height - padding.bottom).max(top);
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
    /// Pixel range for the x axis, left to right.
    pub fn x_range(&self) -> (f64, f64) { (self.left, self.right) }
    /// Pixel range for the y axis; inverted because data y grows upward.
    pub fn y_range(&self) -> (f64, f64) { (self.bottom, self.top) }
}
