// File: crates/linechart-core/src/segment.rs
// Summary: Gap-aware segmentation: x-sorted points split into maximal runs without missing y.

use std::cmp::Ordering;

use crate::dataset::{AxisValue, NormalizedPoint};
use crate::domain::Categories;

/// Maximal run of gap-free points, ascending by x. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment<'a> {
    pub points: Vec<&'a NormalizedPoint>,
}

impl<'a> Segment<'a> {
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn first(&self) -> Option<&'a NormalizedPoint> { self.points.first().copied() }
    pub fn last(&self) -> Option<&'a NormalizedPoint> { self.points.last().copied() }
    pub fn iter(&self) -> impl Iterator<Item = &'a NormalizedPoint> + '_ { self.points.iter().copied() }
}

/// Stable-sort by x, then split at every gap. Gap points are dropped, as are empty runs.
///
/// `categories` is the order the x scale places values in, when it is categorical. Without it,
/// text x that has no numeric reading sorts by first-seen order, after all numeric x.
pub fn segment<'a>(data: &'a [NormalizedPoint], categories: Option<&Categories>) -> Vec<Segment<'a>> {
    let order = match categories {
        Some(cats) => XOrder::Ranked(cats),
        None => XOrder::Mixed(Categories::harvest(data.iter().map(|p| &p.x).filter(|x| x.is_category()))),
    };
    let mut ordered: Vec<&NormalizedPoint> = data.iter().collect();
    ordered.sort_by(|a, b| order.compare(&a.x, &b.x));

    let mut segments = Vec::new();
    let mut run = Vec::new();
    for point in ordered {
        if point.is_gap() {
            if !run.is_empty() {
                segments.push(Segment { points: std::mem::take(&mut run) });
            }
        } else {
            run.push(point);
        }
    }
    if !run.is_empty() {
        segments.push(Segment { points: run });
    }
    tracing::trace!(points = data.len(), segments = segments.len(), "segmented");
    segments
}

enum XOrder<'c> {
    /// Every x by its category rank; unranked values go last.
    Ranked(&'c Categories),
    /// Numeric x first, then text in the harvested order.
    Mixed(Categories),
}

impl XOrder<'_> {
    fn sort_key(&self, x: &AxisValue) -> (u8, f64) {
        match self {
            XOrder::Ranked(cats) => match cats.rank(x) {
                Some(r) => (0, r as f64),
                None => (1, 0.0),
            },
            XOrder::Mixed(cats) => match x.as_f64() {
                Some(n) => (0, n),
                None => (1, cats.rank(x).map_or(f64::MAX, |r| r as f64)),
            },
        }
    }

    fn compare(&self, a: &AxisValue, b: &AxisValue) -> Ordering {
        let (ca, ka) = self.sort_key(a);
        let (cb, kb) = self.sort_key(b);
        ca.cmp(&cb).then(ka.total_cmp(&kb))
    }
}
