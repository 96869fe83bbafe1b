// File: crates/linechart-core/src/config.rs
// Summary: Chart props (the configuration surface) and the JSON-deserializable subset.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::accessor::Accessor;
use crate::animation::AnimateConfig;
use crate::dataset::{self, NormalizedPoint};
use crate::domain::{Axis, CategoryProp, DomainProp};
use crate::error::{ChartError, Result};
use crate::events::{ChartEvent, ElementKind, ElementPatch, ElementProps, EventHandlers};
use crate::layout::LabelSpec;
use crate::scale::{ScaleKind, ScaleProp};
use crate::style::ChartStyle;
use crate::types::{Padding, HEIGHT, INTERPOLATION, SAMPLES, WIDTH};

/// Everything a render depends on besides element state.
#[derive(Clone, Debug)]
pub struct ChartProps {
    /// Raw points; `None` samples the y accessor instead.
    pub data: Option<Vec<Value>>,
    pub x: Accessor,
    pub y: Accessor,
    pub domain: Option<DomainProp>,
    pub scale: ScaleProp,
    pub categories: Option<CategoryProp>,
    pub interpolation: String,
    pub samples: usize,
    pub padding: Padding,
    pub width: f64,
    pub height: f64,
    pub events: EventHandlers,
    pub labels: Option<LabelSpec>,
    pub always_show_labels: bool,
    pub series_label: Option<String>,
    pub style: ChartStyle,
    /// Whether the chart owns the root drawing surface.
    pub standalone: bool,
    pub animate: Option<AnimateConfig>,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            data: None,
            x: Accessor::key("x"),
            y: Accessor::key("y"),
            domain: None,
            scale: ScaleProp::default(),
            categories: None,
            interpolation: INTERPOLATION.to_string(),
            samples: SAMPLES,
            padding: Padding::default(),
            width: WIDTH,
            height: HEIGHT,
            events: EventHandlers::default(),
            labels: None,
            always_show_labels: false,
            series_label: None,
            style: ChartStyle::default(),
            standalone: true,
            animate: None,
        }
    }
}

impl ChartProps {
    pub fn new() -> Self { Self::default() }

    pub fn with_data(mut self, data: Vec<Value>) -> Self { self.data = Some(data); self }
    pub fn with_x(mut self, x: Accessor) -> Self { self.x = x; self }
    pub fn with_y(mut self, y: Accessor) -> Self { self.y = y; self }
    pub fn with_domain(mut self, domain: DomainProp) -> Self { self.domain = Some(domain); self }
    pub fn with_scale(mut self, scale: ScaleProp) -> Self { self.scale = scale; self }
    pub fn with_categories(mut self, categories: CategoryProp) -> Self { self.categories = Some(categories); self }
    pub fn with_interpolation(mut self, name: impl Into<String>) -> Self { self.interpolation = name.into(); self }
    pub fn with_samples(mut self, samples: usize) -> Self { self.samples = samples; self }
    pub fn with_padding(mut self, padding: Padding) -> Self { self.padding = padding; self }
    pub fn with_size(mut self, width: f64, height: f64) -> Self { self.width = width; self.height = height; self }
    pub fn with_labels(mut self, labels: LabelSpec) -> Self { self.labels = Some(labels); self }
    pub fn with_always_show_labels(mut self, on: bool) -> Self { self.always_show_labels = on; self }
    pub fn with_series_label(mut self, text: impl Into<String>) -> Self { self.series_label = Some(text.into()); self }
    pub fn with_style(mut self, style: ChartStyle) -> Self { self.style = style; self }
    pub fn with_standalone(mut self, standalone: bool) -> Self { self.standalone = standalone; self }
    pub fn with_animate(mut self, animate: AnimateConfig) -> Self { self.animate = Some(animate); self }

    /// Register an event handler for one element kind.
    pub fn on<F>(mut self, kind: ElementKind, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ChartEvent, ElementProps<'_>, Option<usize>, ElementKind) -> Option<ElementPatch> + Send + Sync + 'static,
    {
        self.events = self.events.on(kind, name, handler);
        self
    }

    /// Reject options no render could use.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width >= 0.0) || !(self.height.is_finite() && self.height >= 0.0) {
            return Err(ChartError::config(format!("width/height must be non-negative, got {}x{}", self.width, self.height)));
        }
        if self.samples == 0 {
            return Err(ChartError::config("samples must be a positive integer"));
        }
        let p = &self.padding;
        if [p.top, p.bottom, p.left, p.right].iter().any(|v| !v.is_finite()) {
            return Err(ChartError::config("padding must be finite"));
        }
        Ok(())
    }

    /// Run the dataset builder over these props.
    pub fn dataset(&self) -> Vec<NormalizedPoint> {
        let x_domain = self.domain.as_ref().and_then(|d| d.for_axis(Axis::X));
        dataset::build(self.data.as_deref(), &self.x, &self.y, self.samples, x_domain)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ChartConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Convert and validate a deserialized configuration.
    pub fn from_config(config: ChartConfig) -> Result<Self> {
        let defaults = Self::default();
        let accessor = |spec: Option<Value>, default: Accessor| spec.as_ref().map_or(Ok(default), Accessor::from_json);
        let scale = match config.scale {
            None => ScaleProp::default(),
            Some(ScaleConfig::Name(name)) => ScaleProp::Shared(name.parse()?),
            Some(ScaleConfig::PerAxis { x, y }) => {
                let parse = |s: Option<String>| s.map_or(Ok(ScaleKind::Linear), |s| s.parse());
                ScaleProp::PerAxis { x: parse(x)?, y: parse(y)? }
            }
        };
        let padding = match config.padding {
            None => defaults.padding,
            Some(PaddingConfig::Uniform(v)) => Padding::uniform(v),
            Some(PaddingConfig::Sides(p)) => p,
        };
        if config.samples == Some(0) {
            return Err(ChartError::config("samples must be a positive integer"));
        }
        let props = Self {
            data: config.data,
            x: accessor(config.x, defaults.x.clone())?,
            y: accessor(config.y, defaults.y.clone())?,
            domain: config.domain,
            scale,
            categories: config.categories,
            interpolation: config.interpolation.unwrap_or(defaults.interpolation),
            samples: config.samples.unwrap_or(SAMPLES),
            padding,
            width: config.width.unwrap_or(WIDTH),
            height: config.height.unwrap_or(HEIGHT),
            events: EventHandlers::default(),
            labels: config.labels.map(LabelSpec::List),
            always_show_labels: config.always_show_labels,
            series_label: config.series_label,
            style: config.style,
            standalone: config.standalone.unwrap_or(true),
            animate: config.animate,
        };
        props.validate()?;
        Ok(props)
    }
}

/// JSON form of the configuration surface. Functions and event handlers are added
/// on [`ChartProps`] after conversion.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub data: Option<Vec<Value>>,
    /// Present-but-null means identity; absent means the default `"x"` key.
    #[serde(deserialize_with = "present")]
    pub x: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub y: Option<Value>,
    pub domain: Option<DomainProp>,
    pub scale: Option<ScaleConfig>,
    pub categories: Option<CategoryProp>,
    pub interpolation: Option<String>,
    pub samples: Option<usize>,
    pub padding: Option<PaddingConfig>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub labels: Option<Vec<String>>,
    pub always_show_labels: bool,
    pub series_label: Option<String>,
    pub style: ChartStyle,
    pub standalone: Option<bool>,
    pub animate: Option<AnimateConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScaleConfig {
    Name(String),
    PerAxis {
        #[serde(default)]
        x: Option<String>,
        #[serde(default)]
        y: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PaddingConfig {
    Uniform(f64),
    Sides(Padding),
}

fn present<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}
