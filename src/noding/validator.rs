use geo_types::{Coord, Line, LineString};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rstar::{RTree, RTreeObject, AABB};

use crate::algorithm::compute_intersection;
use crate::error::{Result, TopologyError};

// Segment of a segment string, indexable by rstar
#[derive(Clone, Copy, Debug)]
pub(crate) struct IndexedSegment {
    pub line: Line<f64>,
    /// Index of the owning string
    pub string: usize,
    /// Index of the segment within its string
    pub segment: usize,
    /// Position in the flattened segment list
    pub id: usize,
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let p1 = self.line.start;
        let p2 = self.line.end;
        AABB::from_corners(
            [p1.x.min(p2.x), p1.y.min(p2.y)],
            [p1.x.max(p2.x), p1.y.max(p2.y)],
        )
    }
}

/// Flattens point sequences into indexed segments.
pub(crate) fn segments_of<'a, I>(strings: I) -> Vec<IndexedSegment>
where
    I: IntoIterator<Item = &'a [Coord<f64>]>,
{
    let mut segments = Vec::new();
    for (string, pts) in strings.into_iter().enumerate() {
        for (segment, w) in pts.windows(2).enumerate() {
            segments.push(IndexedSegment {
                line: Line::new(w[0], w[1]),
                string,
                segment,
                id: segments.len(),
            });
        }
    }
    segments
}

/// Unordered pairs of segments with intersecting envelopes, as positions into
/// `segments`, sorted. A segment is never paired with itself.
pub(crate) fn candidate_pairs(segments: &[IndexedSegment]) -> Vec<(usize, usize)> {
    let tree = RTree::bulk_load(segments.to_vec());
    let mut pairs: Vec<(usize, usize)> = tree
        .intersection_candidates_with_other_tree(&tree)
        .filter(|(a, b)| a.id < b.id)
        .map(|(a, b)| (a.id, b.id))
        .collect();
    pairs.sort_unstable();
    pairs
}

/// Checks that a set of segment strings is correctly noded.
///
/// Re-derives every intersection rather than trusting earlier bookkeeping, so it
/// is slow but independent of the noder it checks.
pub struct NodingValidator<'a> {
    seg_strings: &'a [LineString<f64>],
}

impl<'a> NodingValidator<'a> {
    pub fn new(seg_strings: &'a [LineString<f64>]) -> Self {
        Self { seg_strings }
    }

    /// Runs all checks, failing on the first violation.
    pub fn check_valid(&self) -> Result<()> {
        self.check_end_pt_vertex_intersections()?;
        self.check_interior_intersections()?;
        self.check_collapses()
    }

    /// An endpoint of any string may not coincide with an interior vertex of any string.
    pub fn check_end_pt_vertex_intersections(&self) -> Result<()> {
        for ss in self.seg_strings {
            let (Some(&first), Some(&last)) = (ss.0.first(), ss.0.last()) else {
                continue;
            };
            self.check_end_pt_vertex_intersection(first)?;
            self.check_end_pt_vertex_intersection(last)?;
        }
        Ok(())
    }

    fn check_end_pt_vertex_intersection(&self, test_pt: Coord<f64>) -> Result<()> {
        for ss in self.seg_strings {
            let pts = &ss.0;
            for j in 1..pts.len().saturating_sub(1) {
                if pts[j] == test_pt {
                    return Err(TopologyError::NonNodedEndpointIntersection {
                        index: j,
                        coordinate: test_pt,
                    });
                }
            }
        }
        Ok(())
    }

    /// No two segments may meet anywhere but at endpoints they share.
    pub fn check_interior_intersections(&self) -> Result<()> {
        let segments = segments_of(self.seg_strings.iter().map(|ls| ls.0.as_slice()));
        let pairs = candidate_pairs(&segments);
        debug!(
            "validating {} segments, {} candidate pairs",
            segments.len(),
            pairs.len()
        );

        let check = |&(i, j): &(usize, usize)| check_segment_pair(&segments[i], &segments[j]);

        #[cfg(feature = "parallel")]
        let violation = pairs.par_iter().find_map_first(check);
        #[cfg(not(feature = "parallel"))]
        let violation = pairs.iter().find_map(check);

        match violation {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// No string may fold back onto itself (`p0 == p2` for consecutive points).
    pub fn check_collapses(&self) -> Result<()> {
        for ss in self.seg_strings {
            for w in ss.0.windows(3) {
                if w[0] == w[2] {
                    return Err(TopologyError::DegenerateCollapse { points: [w[0], w[1], w[2]] });
                }
            }
        }
        Ok(())
    }
}

fn check_segment_pair(a: &IndexedSegment, b: &IndexedSegment) -> Option<TopologyError> {
    let (p00, p01) = (a.line.start, a.line.end);
    let (p10, p11) = (b.line.start, b.line.end);

    let li = compute_intersection(p00, p01, p10, p11);
    if li.has_intersection()
        && (li.is_proper || li.has_interior_intersection(p00, p01) || li.has_interior_intersection(p10, p11))
    {
        return Some(TopologyError::NonNodedCrossing {
            segment_a: a.line,
            segment_b: b.line,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ls(pts: &[(f64, f64)]) -> LineString<f64> {
        LineString::from(pts.to_vec())
    }

    #[test]
    fn test_collapse() {
        let strings = vec![ls(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])];
        let err = NodingValidator::new(&strings).check_valid().unwrap_err();
        assert!(matches!(err, TopologyError::DegenerateCollapse { .. }), "got {:?}", err);
    }

    #[test]
    fn test_crossing() {
        let strings = vec![ls(&[(0.0, 0.0), (2.0, 2.0)]), ls(&[(0.0, 2.0), (2.0, 0.0)])];
        let err = NodingValidator::new(&strings).check_valid().unwrap_err();
        assert_eq!(
            err,
            TopologyError::NonNodedCrossing {
                segment_a: Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 2.0 }),
                segment_b: Line::new(Coord { x: 0.0, y: 2.0 }, Coord { x: 2.0, y: 0.0 }),
            }
        );
    }

    #[test]
    fn test_shared_endpoint_is_valid() {
        let strings = vec![ls(&[(0.0, 0.0), (1.0, 1.0)]), ls(&[(1.0, 1.0), (2.0, 0.0)])];
        assert!(NodingValidator::new(&strings).check_valid().is_ok());
    }

    #[test]
    fn test_endpoint_on_interior_vertex() {
        let strings = vec![
            ls(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]),
            ls(&[(5.0, 0.0), (5.0, 5.0)]),
        ];
        let err = NodingValidator::new(&strings).check_valid().unwrap_err();
        assert_eq!(
            err,
            TopologyError::NonNodedEndpointIntersection { index: 1, coordinate: Coord { x: 5.0, y: 0.0 } }
        );
    }

    #[test]
    fn test_endpoint_touching_segment_interior() {
        // T-junction without a vertex on the bar
        let strings = vec![ls(&[(0.0, 0.0), (10.0, 0.0)]), ls(&[(5.0, 0.0), (5.0, 5.0)])];
        let err = NodingValidator::new(&strings).check_interior_intersections().unwrap_err();
        assert!(matches!(err, TopologyError::NonNodedCrossing { .. }));
    }

    #[test]
    fn test_collinear_overlap() {
        let strings = vec![ls(&[(0.0, 0.0), (10.0, 0.0)]), ls(&[(5.0, 0.0), (15.0, 0.0)])];
        assert!(NodingValidator::new(&strings).check_valid().is_err());
    }

    #[test]
    fn test_identical_segments_are_noded() {
        let strings = vec![ls(&[(0.0, 0.0), (10.0, 0.0)]), ls(&[(10.0, 0.0), (0.0, 0.0)])];
        assert!(NodingValidator::new(&strings).check_valid().is_ok());
    }

    #[test]
    fn test_closed_ring_is_valid() {
        let strings = vec![ls(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)])];
        assert!(NodingValidator::new(&strings).check_valid().is_ok());
    }

    #[test]
    fn test_self_crossing_string() {
        let strings = vec![ls(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)])];
        let err = NodingValidator::new(&strings).check_valid().unwrap_err();
        assert!(matches!(err, TopologyError::NonNodedCrossing { .. }));
    }

    #[test]
    fn test_candidate_pairs_are_unique() {
        let segments = segments_of([
            [Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 2.0 }].as_slice(),
            [Coord { x: 0.0, y: 2.0 }, Coord { x: 2.0, y: 0.0 }].as_slice(),
            [Coord { x: 5.0, y: 5.0 }, Coord { x: 6.0, y: 6.0 }].as_slice(),
        ]);
        assert_eq!(candidate_pairs(&segments), vec![(0, 1)]);
    }
}
