// File: crates/linechart-core/src/events.rs
// Summary: Event scoping (handlers bound to an element kind/index) and the element-state reducer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chart::ChartGeometry;
use crate::layout::{ElementGeometry, LineGeometry};
use crate::style::Style;
use crate::types::PlotRect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// The chart container; never indexed.
    Parent,
    /// The line path; one element for the whole series.
    Data,
    Markers,
    Labels,
}

impl ElementKind {
    /// Whether elements of this kind are addressed per data index.
    pub fn is_indexed(&self) -> bool { matches!(self, Self::Markers | Self::Labels) }
}

/// Partial per-element override returned by a handler and kept in [`ElementState`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub style: Style,
    pub text: Option<String>,
}

impl ElementPatch {
    pub fn style(style: Style) -> Self { Self { style, text: None } }
    pub fn text(text: impl Into<String>) -> Self { Self { style: Style::default(), text: Some(text.into()) } }

    /// Layer `over` on top of `self`.
    pub fn merge(&self, over: &ElementPatch) -> ElementPatch {
        ElementPatch { style: self.style.merge(&over.style), text: over.text.clone().or_else(|| self.text.clone()) }
    }
}

/// Input event forwarded by the host (pointer/keyboard), in chart pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartEvent {
    pub name: String,
    pub px: f64,
    pub py: f64,
}

impl ChartEvent {
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), px: 0.0, py: 0.0 } }
    pub fn at(name: impl Into<String>, px: f64, py: f64) -> Self { Self { name: name.into(), px, py } }
}

/// What a handler sees of the element it fired on.
#[derive(Clone, Copy, Debug)]
pub enum ElementProps<'a> {
    Parent(&'a PlotRect),
    Line(&'a LineGeometry),
    Element(&'a ElementGeometry),
}

/// `(event, element props, index, kind) -> optional state patch`.
pub type Handler = Arc<dyn Fn(&ChartEvent, ElementProps<'_>, Option<usize>, ElementKind) -> Option<ElementPatch> + Send + Sync>;

/// Handlers of one element kind, keyed by event name (`"onClick"`, `"onMouseOver"`, ...).
pub type HandlerMap = BTreeMap<String, Handler>;

#[derive(Clone, Default)]
pub struct EventHandlers {
    maps: BTreeMap<ElementKind, HandlerMap>,
}

impl EventHandlers {
    pub fn on<F>(mut self, kind: ElementKind, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ChartEvent, ElementProps<'_>, Option<usize>, ElementKind) -> Option<ElementPatch> + Send + Sync + 'static,
    {
        self.maps.entry(kind).or_default().insert(name.into(), Arc::new(handler));
        self
    }

    pub fn for_kind(&self, kind: ElementKind) -> Option<&HandlerMap> { self.maps.get(&kind) }
    pub fn is_empty(&self) -> bool { self.maps.values().all(BTreeMap::is_empty) }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = f.debug_map();
        for (kind, handlers) in &self.maps {
            m.entry(kind, &handlers.keys().collect::<Vec<_>>());
        }
        m.finish()
    }
}

/// Handlers of one kind bound to the geometry of one render pass.
pub struct BoundHandlers<'a> {
    kind: ElementKind,
    handlers: Option<&'a HandlerMap>,
    geometry: &'a ChartGeometry,
}

/// Bind `handlers` to `kind` elements of `geometry`.
pub fn scope<'a>(handlers: Option<&'a HandlerMap>, kind: ElementKind, geometry: &'a ChartGeometry) -> BoundHandlers<'a> {
    BoundHandlers { kind, handlers, geometry }
}

impl<'a> BoundHandlers<'a> {
    pub fn kind(&self) -> ElementKind { self.kind }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    /// Run the handler for `event.name` on element `index`. Indexed kinds need an index that
    /// has an element in this render; non-indexed kinds ignore it. Results are returned unchecked.
    pub fn invoke(&self, index: Option<usize>, event: &ChartEvent) -> Option<ElementPatch> {
        let handler = self.handlers?.get(&event.name)?;
        let (props, index) = match self.kind {
            ElementKind::Parent => (ElementProps::Parent(&self.geometry.plot), None),
            ElementKind::Data => (ElementProps::Line(&self.geometry.line), None),
            ElementKind::Markers | ElementKind::Labels => {
                let i = index?;
                let element = self.geometry.elements.iter().find(|e| e.index == i)?;
                (ElementProps::Element(element), Some(i))
            }
        };
        handler(event, props, index, self.kind)
    }
}

/// Per-element overrides contributed by event handlers. Outlives single renders;
/// changed only through [`ElementState::apply`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementState {
    entries: BTreeMap<(ElementKind, Option<usize>), ElementPatch>,
}

impl ElementState {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, kind: ElementKind, index: Option<usize>) -> Option<&ElementPatch> {
        self.entries.get(&(kind, key_index(kind, index)))
    }

    /// Reducer step: merge `patch` over whatever is stored for the element.
    pub fn apply(&mut self, kind: ElementKind, index: Option<usize>, patch: ElementPatch) {
        let slot = self.entries.entry((kind, key_index(kind, index))).or_default();
        *slot = slot.merge(&patch);
    }

    pub fn clear(&mut self) { self.entries.clear(); }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

fn key_index(kind: ElementKind, index: Option<usize>) -> Option<usize> {
    if kind.is_indexed() { index } else { None }
}
