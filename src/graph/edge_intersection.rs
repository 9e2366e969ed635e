use std::cmp::Ordering;
use std::collections::BTreeMap;

use geo_types::Coord;

use super::edge::Edge;
use super::label::Label;

/// A point at which an edge is crossed, touched or terminated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeIntersection {
    pub coordinate: Coord<f64>,
    /// Index of the segment of the parent edge containing the point.
    pub segment_index: usize,
    /// Distance along the segment. Only meaningful as a sort key.
    pub distance: f64,
}

impl EdgeIntersection {
    fn key(&self) -> IntersectionKey {
        IntersectionKey::new(self.segment_index, self.distance)
    }

    pub fn is_end_point(&self, max_segment_index: usize) -> bool {
        (self.segment_index == 0 && self.distance == 0.0) || self.segment_index == max_segment_index
    }
}

/// Orders intersections along an edge by `(segment_index, distance)`.
#[derive(Clone, Copy, Debug)]
struct IntersectionKey {
    segment_index: usize,
    distance: f64,
}

impl IntersectionKey {
    fn new(segment_index: usize, distance: f64) -> Self {
        // Adding zero folds -0.0 into 0.0 so both land on the same key.
        Self { segment_index, distance: distance + 0.0 }
    }
}

impl Ord for IntersectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| self.distance.total_cmp(&other.distance))
    }
}

impl PartialOrd for IntersectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for IntersectionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IntersectionKey {}

/// The ordered set of intersections of a single edge.
///
/// Callers must normalize before inserting: a point at distance 1.0 along segment
/// `i` has to be passed as distance 0.0 on segment `i + 1`, otherwise the same point
/// ends up recorded twice. [`Edge::add_intersection`] does this.
#[derive(Clone, Debug, Default)]
pub struct EdgeIntersectionList {
    nodes: BTreeMap<IntersectionKey, EdgeIntersection>,
}

impl EdgeIntersectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection, returning the already recorded one if the key exists.
    pub fn add(&mut self, coordinate: Coord<f64>, segment_index: usize, distance: f64) -> &EdgeIntersection {
        debug_assert!(
            distance.is_finite() && distance >= 0.0,
            "edge distance must be finite and non-negative, got {}",
            distance
        );
        let ei = EdgeIntersection { coordinate, segment_index, distance: distance + 0.0 };
        self.nodes.entry(ei.key()).or_insert(ei)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates in ascending `(segment_index, distance)` order.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> + '_ {
        self.nodes.values()
    }

    pub fn is_intersection(&self, pt: Coord<f64>) -> bool {
        self.nodes.values().any(|ei| ei.coordinate == pt)
    }

    /// Records the first and last point of the parent edge.
    pub fn add_endpoints(&mut self, pts: &[Coord<f64>]) {
        let Some(max_segment_index) = pts.len().checked_sub(1) else {
            return;
        };
        self.add(pts[0], 0, 0.0);
        self.add(pts[max_segment_index], max_segment_index, 0.0);
    }

    /// Splits the parent edge at every recorded intersection, pushing the pieces to `out`
    /// in order along the edge.
    pub fn add_split_edges(&mut self, pts: &[Coord<f64>], label: &Label, out: &mut Vec<Edge>) {
        self.add_endpoints(pts);

        let mut it = self.nodes.values();
        let Some(mut ei_prev) = it.next() else {
            return;
        };
        for ei in it {
            out.push(Self::create_split_edge(pts, label, ei_prev, ei));
            ei_prev = ei;
        }
    }

    /// Builds the sub-edge running from `ei0` to `ei1`.
    pub fn create_split_edge(pts: &[Coord<f64>], label: &Label, ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Edge {
        let last_seg_start = pts[ei1.segment_index];
        // 2D comparison; the segment start already provides the point.
        let use_int_pt1 = ei1.distance > 0.0
            || ei1.coordinate.x != last_seg_start.x
            || ei1.coordinate.y != last_seg_start.y;

        let mut split_pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        split_pts.push(ei0.coordinate);
        split_pts.extend_from_slice(&pts[ei0.segment_index + 1..=ei1.segment_index]);
        if use_int_pt1 {
            split_pts.push(ei1.coordinate);
        }

        Edge::new(split_pts, *label)
    }
}
