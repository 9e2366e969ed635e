use geo_types::{Coord, LineString, Polygon};
use log::{debug, warn};
use rstar::{RTree, RTreeObject, AABB};

use crate::algorithm::{envelope_contains, point_in_ring};
use crate::edge_ring::EdgeRing;
use crate::error::{Result, TopologyError};
use crate::graph::{DirEdgeId, PlanarGraph, RingId};

// Shell envelope indexable by rstar; `pos` is the position in the shell list.
struct IndexedShell {
    envelope: AABB<[f64; 2]>,
    pos: usize,
}

impl RTreeObject for IndexedShell {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Builds polygons from the in-result area edges of a linked planar graph.
///
/// Rings are kept in an arena owned by the builder; directed edges refer to them
/// through their `edge_ring` / `min_edge_ring` ids.
#[derive(Default)]
pub struct PolygonBuilder {
    rings: Vec<EdgeRing>,
    shells: Vec<RingId>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every directed edge of `graph`.
    pub fn add_graph(&mut self, graph: &mut PlanarGraph) -> Result<()> {
        let dir_edges: Vec<DirEdgeId> = (0..graph.directed_edges.len()).collect();
        self.add(graph, &dir_edges)
    }

    /// Links the graph, extracts rings from the in-result area edges among `dir_edges`
    /// and assigns every hole to a shell.
    pub fn add(&mut self, graph: &mut PlanarGraph, dir_edges: &[DirEdgeId]) -> Result<()> {
        graph.link_result_directed_edges()?;

        let max_rings = self.build_maximal_edge_rings(graph, dir_edges)?;
        let mut free_holes = Vec::new();
        let edge_rings = self.build_minimal_edge_rings(graph, &max_rings, &mut free_holes)?;
        self.sort_shells_and_holes(&edge_rings, &mut free_holes);
        self.place_free_holes(&free_holes)?;

        debug!(
            "built {} maximal rings, {} rings total, {} shells",
            max_rings.len(),
            self.rings.len(),
            self.shells.len()
        );
        Ok(())
    }

    fn build_maximal_edge_rings(&mut self, graph: &mut PlanarGraph, dir_edges: &[DirEdgeId]) -> Result<Vec<RingId>> {
        let mut max_rings = Vec::new();
        for &de_idx in dir_edges {
            let de = &graph.directed_edges[de_idx];
            if de.in_result && de.label.is_area() && de.edge_ring.is_none() {
                let id = self.rings.len();
                let ring = EdgeRing::build_maximal(graph, de_idx, id)?;
                self.rings.push(ring);
                max_rings.push(id);
            }
        }
        Ok(max_rings)
    }

    /// Splits self-touching maximal rings. Returns the rings that needed no split.
    fn build_minimal_edge_rings(
        &mut self,
        graph: &mut PlanarGraph,
        max_rings: &[RingId],
        free_holes: &mut Vec<RingId>,
    ) -> Result<Vec<RingId>> {
        let mut edge_rings = Vec::new();
        for &id in max_rings {
            let needs_split = self.rings[id].max_node_degree().is_some_and(|d| d > 2);
            if !needs_split {
                edge_rings.push(id);
                continue;
            }

            let max_ring = &self.rings[id];
            max_ring.link_directed_edges_for_minimal_edge_rings(graph, id)?;
            let first = self.rings.len();
            let min_rings = max_ring.build_minimal_rings(graph, first)?;
            let ids: Vec<RingId> = (first..first + min_rings.len()).collect();
            self.rings.extend(min_rings);

            match self.find_shell(&ids)? {
                Some(shell) => {
                    self.place_polygon_holes(shell, &ids)?;
                    self.shells.push(shell);
                }
                None => free_holes.extend_from_slice(&ids),
            }
        }
        Ok(edge_rings)
    }

    /// The single shell among a set of minimal rings, if any.
    fn find_shell(&self, ids: &[RingId]) -> Result<Option<RingId>> {
        let mut shell = None;
        for &id in ids {
            if self.rings[id].is_shell() {
                if shell.is_some() {
                    let coordinate = self.rings[id].coordinate(0);
                    warn!("found two shells in minimal edge ring set at {:?}", coordinate);
                    return Err(TopologyError::AmbiguousShellSet { coordinate });
                }
                shell = Some(id);
            }
        }
        Ok(shell)
    }

    // Holes split off the same maximal ring belong to its shell without a containment test.
    fn place_polygon_holes(&mut self, shell: RingId, ids: &[RingId]) -> Result<()> {
        for &id in ids {
            if self.rings[id].is_hole() {
                self.set_shell(id, shell)?;
            }
        }
        Ok(())
    }

    fn sort_shells_and_holes(&mut self, ids: &[RingId], free_holes: &mut Vec<RingId>) {
        for &id in ids {
            if self.rings[id].is_hole() {
                free_holes.push(id);
            } else {
                self.shells.push(id);
            }
        }
    }

    fn place_free_holes(&mut self, free_holes: &[RingId]) -> Result<()> {
        if free_holes.is_empty() {
            return Ok(());
        }

        let indexed: Vec<IndexedShell> = self
            .shells
            .iter()
            .enumerate()
            .map(|(pos, &id)| {
                let env = self.rings[id].envelope();
                IndexedShell {
                    envelope: AABB::from_corners([env.min().x, env.min().y], [env.max().x, env.max().y]),
                    pos,
                }
            })
            .collect();
        let tree = RTree::bulk_load(indexed);

        for &hole in free_holes {
            if self.rings[hole].shell().is_some() {
                continue;
            }
            let Some(shell) = self.find_edge_ring_containing(hole, &tree) else {
                let coordinate = self.rings[hole].coordinate(0);
                warn!("unable to assign hole to a shell at {:?}", coordinate);
                return Err(TopologyError::UnassignableHole { coordinate });
            };
            self.set_shell(hole, shell)?;
        }
        Ok(())
    }

    /// The innermost shell containing `hole`.
    ///
    /// Among the shells containing a hole vertex, nesting is approximated by envelope
    /// containment: a shell whose envelope lies within the current best replaces it.
    fn find_edge_ring_containing(&self, hole: RingId, tree: &RTree<IndexedShell>) -> Option<RingId> {
        let test_ring = &self.rings[hole];
        let test_env = test_ring.envelope();
        let query = AABB::from_corners([test_env.min().x, test_env.min().y], [test_env.max().x, test_env.max().y]);

        // Shell list order keeps the choice independent of the tree layout.
        let mut candidates: Vec<usize> = tree.locate_in_envelope_intersecting(&query).map(|s| s.pos).collect();
        candidates.sort_unstable();

        let mut min_shell: Option<RingId> = None;
        for pos in candidates {
            let shell_id = self.shells[pos];
            let try_ring = &self.rings[shell_id];
            let try_env = try_ring.envelope();

            // the hole envelope cannot equal the shell envelope
            if try_env == test_env || !envelope_contains(try_env, test_env) {
                continue;
            }

            let test_pt = pt_not_in_list(test_ring.linear_ring(), try_ring.linear_ring())
                .unwrap_or_else(|| test_ring.coordinate(0));
            if !point_in_ring(test_pt, try_ring.linear_ring()) {
                continue;
            }

            let is_inner = match min_shell {
                None => true,
                Some(min) => envelope_contains(self.rings[min].envelope(), try_env),
            };
            if is_inner {
                min_shell = Some(shell_id);
            }
        }
        min_shell
    }

    fn set_shell(&mut self, hole: RingId, shell: RingId) -> Result<()> {
        self.rings[hole].assign_shell(shell)?;
        self.rings[shell].push_hole(hole);
        Ok(())
    }

    /// One polygon per shell, carrying its holes.
    pub fn polygons(&self) -> Vec<Polygon<f64>> {
        self.shells
            .iter()
            .map(|&id| self.rings[id].to_polygon(&self.rings))
            .collect()
    }

    /// True if `p` lies in the area covered by the built polygons.
    pub fn contains_point(&self, p: Coord<f64>) -> bool {
        self.shells
            .iter()
            .any(|&id| self.rings[id].contains_point(p, &self.rings))
    }

    pub fn shells(&self) -> &[RingId] {
        &self.shells
    }

    pub fn ring(&self, id: RingId) -> &EdgeRing {
        &self.rings[id]
    }

    pub fn rings(&self) -> &[EdgeRing] {
        &self.rings
    }
}

/// First point of `test` that is not a vertex of `ring`.
fn pt_not_in_list(test: &LineString<f64>, ring: &LineString<f64>) -> Option<Coord<f64>> {
    test.0.iter().copied().find(|pt| !ring.0.contains(pt))
}

#[cfg(test)]
#[path = "polygon_builder_tests.rs"]
mod tests;
