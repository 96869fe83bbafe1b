// File: crates/linechart-core/src/lib.rs
// Summary: Core library entry point; exports the line chart data-to-geometry pipeline.

pub mod accessor;
pub mod animation;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod events;
pub mod layout;
pub mod scale;
pub mod segment;
pub mod style;
pub mod types;

pub use accessor::{Accessor, PathSegment};
pub use animation::{AnimateConfig, AnimationBridge, AnimationDriver, StepDriver, Transition, TransitionPhase, TweenProp, TweenWhitelist};
pub use chart::{render_props, ChartGeometry, Domains, LineChart};
pub use config::{ChartConfig, ChartProps};
pub use dataset::{AxisValue, NormalizedPoint};
pub use domain::{Axis, Categories, CategoryProp, Domain, DomainProp};
pub use error::{ChartError, DomainError, Result};
pub use events::{ChartEvent, ElementKind, ElementPatch, ElementProps, ElementState, EventHandlers};
pub use layout::{ElementGeometry, LabelGeometry, LabelSpec, LineGeometry, TextAnchor, VerticalAnchor};
pub use scale::{Scale, ScaleKind, ScaleProp, Scales};
pub use segment::{segment, Segment};
pub use style::{ChartStyle, Style};
pub use types::{Padding, PlotRect};
