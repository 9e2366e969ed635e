use geo_types::{Coord, LineString};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::validator::{candidate_pairs, segments_of, IndexedSegment, NodingValidator};
use crate::algorithm::{compute_edge_distance, compute_intersection, SegmentIntersection};
use crate::error::Result;
use crate::graph::Edge;

// An intersection point found on one segment of one edge
#[derive(Clone, Copy, Debug)]
struct IntersectionEvent {
    edge: usize,
    segment: usize,
    distance: f64,
    point: Coord<f64>,
}

/// Splits a set of edges at all their mutual and self intersections.
///
/// Intersections are recorded in each edge's [`EdgeIntersectionList`] and the
/// edges are then split there, so the output keeps each input edge's label.
///
/// [`EdgeIntersectionList`]: crate::graph::EdgeIntersectionList
pub struct EdgeNoder {
    /// Run [`NodingValidator`] over the split edges before returning them.
    pub validate_output: bool,
}

impl Default for EdgeNoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeNoder {
    pub fn new() -> Self {
        Self { validate_output: true }
    }

    pub fn node(&self, mut edges: Vec<Edge>) -> Result<Vec<Edge>> {
        let events = find_intersections(&edges);
        debug!("recording {} intersection events on {} edges", events.len(), edges.len());

        for ev in events {
            edges[ev.edge].add_intersection(ev.point, ev.segment, ev.distance);
        }

        let mut split_edges = Vec::with_capacity(edges.len());
        for edge in &mut edges {
            edge.add_split_edges(&mut split_edges);
        }
        debug!("split {} edges into {}", edges.len(), split_edges.len());

        if self.validate_output {
            let lines: Vec<LineString<f64>> = split_edges.iter().map(Edge::line_string).collect();
            NodingValidator::new(&lines).check_valid()?;
        }
        Ok(split_edges)
    }
}

/// All intersection events between segments of `edges`, in a deterministic order.
fn find_intersections(edges: &[Edge]) -> Vec<IntersectionEvent> {
    let segments = segments_of(edges.iter().map(|e| e.pts.as_slice()));
    let pairs = candidate_pairs(&segments);

    let process_pair = |acc: &mut Vec<IntersectionEvent>, &(i, j): &(usize, usize)| {
        let a = &segments[i];
        let b = &segments[j];
        let li = compute_intersection(a.line.start, a.line.end, b.line.start, b.line.end);
        if !li.has_intersection() || is_trivial_intersection(edges, &li, a, b) {
            return;
        }
        for &point in &li.points {
            for s in [a, b] {
                acc.push(IntersectionEvent {
                    edge: s.string,
                    segment: s.segment,
                    distance: compute_edge_distance(point, s.line.start, s.line.end),
                    point,
                });
            }
        }
    };

    #[cfg(feature = "parallel")]
    let mut events: Vec<IntersectionEvent> = pairs
        .par_iter()
        .fold(Vec::new, |mut acc, pair| {
            process_pair(&mut acc, pair);
            acc
        })
        .reduce(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            a
        });

    #[cfg(not(feature = "parallel"))]
    let mut events: Vec<IntersectionEvent> = pairs.iter().fold(Vec::new(), |mut acc, pair| {
        process_pair(&mut acc, pair);
        acc
    });

    // The first event recorded for a ledger key wins, so fix the order.
    events.sort_unstable_by(|a, b| {
        a.edge
            .cmp(&b.edge)
            .then(a.segment.cmp(&b.segment))
            .then(a.distance.total_cmp(&b.distance))
            .then(a.point.x.total_cmp(&b.point.x))
            .then(a.point.y.total_cmp(&b.point.y))
    });
    events
}

/// A single shared vertex between consecutive segments of the same edge, or between
/// the first and last segment of a closed edge, is not a real intersection.
fn is_trivial_intersection(
    edges: &[Edge],
    li: &SegmentIntersection,
    a: &IndexedSegment,
    b: &IndexedSegment,
) -> bool {
    if a.string != b.string || li.intersection_count() != 1 {
        return false;
    }
    if a.segment.abs_diff(b.segment) == 1 {
        return true;
    }
    let edge = &edges[a.string];
    if edge.is_closed() {
        let max_seg = edge.num_points() - 2;
        let (lo, hi) = (a.segment.min(b.segment), a.segment.max(b.segment));
        return lo == 0 && hi == max_seg;
    }
    false
}
