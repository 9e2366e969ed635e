use geo_types::{Coord, LineString};

use super::edge_intersection::{EdgeIntersection, EdgeIntersectionList};
use super::label::Label;
use crate::algorithm::{compute_edge_distance, SegmentIntersection};

/// A labelled polyline together with the intersections recorded on it.
#[derive(Clone, Debug)]
pub struct Edge {
    pub pts: Vec<Coord<f64>>,
    pub label: Label,
    pub intersections: EdgeIntersectionList,
    /// Set once a result ring has claimed one of this edge's directed edges.
    pub in_result: bool,
}

impl Edge {
    pub fn new(pts: Vec<Coord<f64>>, label: Label) -> Self {
        debug_assert!(pts.len() >= 2, "an edge needs at least two points");
        Self {
            pts,
            label,
            intersections: EdgeIntersectionList::new(),
            in_result: false,
        }
    }

    pub fn from_line_string(ls: LineString<f64>, label: Label) -> Self {
        Self::new(ls.0, label)
    }

    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    pub fn coordinate(&self, i: usize) -> Coord<f64> {
        self.pts[i]
    }

    pub fn max_segment_index(&self) -> usize {
        self.pts.len() - 1
    }

    pub fn is_closed(&self) -> bool {
        self.pts.first() == self.pts.last()
    }

    pub fn line_string(&self) -> LineString<f64> {
        LineString::new(self.pts.clone())
    }

    /// Records an intersection, moving a point sitting on the end of its segment onto
    /// the start of the next one so it keys identically to that vertex.
    pub fn add_intersection(&mut self, coordinate: Coord<f64>, segment_index: usize, distance: f64) -> &EdgeIntersection {
        let mut normalized_segment_index = segment_index;
        let mut dist = distance;

        let next_seg_index = segment_index + 1;
        if next_seg_index < self.pts.len() && coordinate == self.pts[next_seg_index] {
            normalized_segment_index = next_seg_index;
            dist = 0.0;
        }
        self.intersections.add(coordinate, normalized_segment_index, dist)
    }

    /// Records every point of `li`, which was computed against segment `segment_index`.
    pub fn add_intersections(&mut self, li: &SegmentIntersection, segment_index: usize) {
        let p0 = self.pts[segment_index];
        let p1 = self.pts[segment_index + 1];
        for &pt in &li.points {
            let dist = compute_edge_distance(pt, p0, p1);
            self.add_intersection(pt, segment_index, dist);
        }
    }

    /// Splits this edge at its recorded intersections.
    pub fn add_split_edges(&mut self, out: &mut Vec<Edge>) {
        self.intersections.add_split_edges(&self.pts, &self.label, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::compute_intersection;
    use crate::graph::label::Location;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn edge(pts: &[(f64, f64)]) -> Edge {
        Edge::new(
            pts.iter().map(|&(x, y)| c(x, y)).collect(),
            Label::area(0, Location::Boundary, Location::Exterior, Location::Interior),
        )
    }

    #[test]
    fn test_add_intersection_normalizes_segment_end() {
        let mut e = edge(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let ei = *e.add_intersection(c(10.0, 0.0), 0, 10.0);
        assert_eq!(ei.segment_index, 1);
        assert_eq!(ei.distance, 0.0);

        e.add_intersection(c(10.0, 0.0), 1, 0.0);
        assert_eq!(e.intersections.len(), 1);
    }

    #[test]
    fn test_add_intersections_from_crossing() {
        let mut e = edge(&[(0.0, 0.0), (2.0, 2.0)]);
        let li = compute_intersection(c(0.0, 0.0), c(2.0, 2.0), c(0.0, 2.0), c(2.0, 0.0));
        e.add_intersections(&li, 0);

        let mut out = Vec::new();
        e.add_split_edges(&mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pts.last(), Some(&c(1.0, 1.0)));
        assert_eq!(out[1].pts.first(), Some(&c(1.0, 1.0)));
        assert_eq!(out[1].pts.last(), Some(&c(2.0, 2.0)));
    }

    #[test]
    fn test_split_edges_copy_label() {
        let mut e = edge(&[(0.0, 0.0), (4.0, 0.0)]);
        e.add_intersection(c(2.0, 0.0), 0, 2.0);
        let mut out = Vec::new();
        e.add_split_edges(&mut out);
        out[0].label = out[0].label.flipped();
        assert_ne!(out[0].label, e.label);
        assert_eq!(out[1].label, e.label);
    }
}
