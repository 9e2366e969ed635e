//! Numeric primitives the topology code is built on.
//!
//! These are thin wrappers over `geo`'s robust predicates, shaped the way the
//! ledger, the validator and the ring builder consume them.

use geo::algorithm::intersects::Intersects;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo_types::{Coord, Line, LineString, Polygon, Rect};
use smallvec::SmallVec;

/// Result of intersecting two segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentIntersection {
    /// True if the intersection point is interior to both segments.
    pub is_proper: bool,
    /// Zero, one or two points (two for a collinear overlap).
    pub points: SmallVec<[Coord<f64>; 2]>,
}

impl SegmentIntersection {
    pub fn has_intersection(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn intersection_count(&self) -> usize {
        self.points.len()
    }

    /// True if some intersection point is not one of the segment endpoints `p0`, `p1`.
    pub fn has_interior_intersection(&self, p0: Coord<f64>, p1: Coord<f64>) -> bool {
        self.points.iter().any(|&pt| pt != p0 && pt != p1)
    }
}

/// Intersects segment `p00-p01` with segment `p10-p11`.
pub fn compute_intersection(
    p00: Coord<f64>,
    p01: Coord<f64>,
    p10: Coord<f64>,
    p11: Coord<f64>,
) -> SegmentIntersection {
    let mut result = SegmentIntersection::default();
    match line_intersection(Line::new(p00, p01), Line::new(p10, p11)) {
        None => {}
        Some(LineIntersection::SinglePoint { intersection, is_proper }) => {
            result.is_proper = is_proper;
            result.points.push(intersection);
        }
        Some(LineIntersection::Collinear { intersection: overlap }) => {
            result.points.push(overlap.start);
            if overlap.end != overlap.start {
                result.points.push(overlap.end);
            }
        }
    }
    result
}

/// Scale-independent distance of `p` along segment `p0-p1`.
///
/// Only usable for ordering points on the same segment. A point other than `p0`
/// always gets a non-zero distance.
pub fn compute_edge_distance(p: Coord<f64>, p0: Coord<f64>, p1: Coord<f64>) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if p == p0 {
        0.0
    } else if p == p1 {
        dx.max(dy)
    } else {
        let pdx = (p.x - p0.x).abs();
        let pdy = (p.y - p0.y).abs();
        let dist = if dx > dy { pdx } else { pdy };
        if dist == 0.0 {
            pdx.max(pdy)
        } else {
            dist
        }
    }
}

/// True if `p` lies inside or on the closed ring.
pub fn point_in_ring(p: Coord<f64>, ring: &LineString<f64>) -> bool {
    Polygon::new(ring.clone(), vec![]).intersects(&p)
}

/// True if `inner` lies within `outer` (boundaries may touch).
pub fn envelope_contains(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    inner.min().x >= outer.min().x
        && inner.max().x <= outer.max().x
        && inner.min().y >= outer.min().y
        && inner.max().y <= outer.max().y
}

pub fn envelope_contains_coord(envelope: &Rect<f64>, p: Coord<f64>) -> bool {
    p.x >= envelope.min().x
        && p.x <= envelope.max().x
        && p.y >= envelope.min().y
        && p.y <= envelope.max().y
}
