use geo::algorithm::winding_order::Winding;
use geo::bounding_rect::BoundingRect;
use geo_types::{Coord, LineString, Polygon, Rect};

use crate::algorithm::{envelope_contains_coord, point_in_ring};
use crate::error::{Result, TopologyError};
use crate::graph::{DirEdgeId, Label, PlanarGraph, RingId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingKind {
    /// Follows `next`; may touch itself at nodes.
    Maximal { max_node_degree: usize },
    /// Follows `next_min`; every node on it has degree two within the ring.
    Minimal,
}

/// A closed traversal of directed edges.
///
/// Clockwise rings are shells, counter-clockwise rings are holes.
#[derive(Clone, Debug)]
pub struct EdgeRing {
    kind: RingKind,
    edges: Vec<DirEdgeId>,
    ring: LineString<f64>,
    envelope: Rect<f64>,
    is_hole: bool,
    label: Label,
    shell: Option<RingId>,
    holes: Vec<RingId>,
}

impl EdgeRing {
    /// Traces the maximal ring through `start` and claims its edges for the result.
    pub fn build_maximal(graph: &mut PlanarGraph, start: DirEdgeId, id: RingId) -> Result<Self> {
        let mut ring = Self::trace(graph, start, id, false)?;

        let max_degree = ring
            .edges
            .iter()
            .map(|&de_idx| graph.outgoing_degree(graph.directed_edges[de_idx].src, id))
            .max()
            .unwrap_or(0);
        ring.kind = RingKind::Maximal { max_node_degree: 2 * max_degree };

        for &de_idx in &ring.edges {
            let edge_idx = graph.directed_edges[de_idx].edge_idx;
            graph.edges[edge_idx].in_result = true;
        }
        Ok(ring)
    }

    pub fn build_minimal(graph: &mut PlanarGraph, start: DirEdgeId, id: RingId) -> Result<Self> {
        Self::trace(graph, start, id, true)
    }

    fn trace(graph: &mut PlanarGraph, start: DirEdgeId, id: RingId, minimal: bool) -> Result<Self> {
        let mut edges = Vec::new();
        let mut pts: Vec<Coord<f64>> = Vec::new();
        let mut label = Label::default();

        let mut de_idx = start;
        loop {
            let de = &mut graph.directed_edges[de_idx];
            let assigned = if minimal { &mut de.min_edge_ring } else { &mut de.edge_ring };
            if assigned.is_some() {
                let coordinate = graph.coordinate(de_idx);
                log::warn!("directed edge {} reached twice while tracing ring {}", de_idx, id);
                return Err(TopologyError::DirectedEdgeVisitedTwice { coordinate });
            }
            *assigned = Some(id);

            debug_assert!(de.label.is_area(), "ring edges must carry an area label");
            label.merge(&de.label);
            let next = if minimal { de.next_min } else { de.next };
            let forward = de.edge_direction;
            let edge_idx = de.edge_idx;

            add_points(&graph.edges[edge_idx].pts, forward, edges.is_empty(), &mut pts);
            edges.push(de_idx);

            let Some(next) = next else {
                return Err(TopologyError::MissingNextEdge {
                    coordinate: graph.nodes[graph.directed_edges[de_idx].dst].coordinate,
                });
            };
            de_idx = next;
            if de_idx == start {
                break;
            }
        }

        let ring = LineString::new(pts);
        let first = ring.0[0];
        let envelope = ring.bounding_rect().unwrap_or_else(|| Rect::new(first, first));
        let is_hole = ring.is_ccw();
        log::trace!(
            "traced {} ring {} with {} edges (hole: {})",
            if minimal { "minimal" } else { "maximal" },
            id,
            edges.len(),
            is_hole
        );

        Ok(Self {
            kind: RingKind::Minimal,
            edges,
            ring,
            envelope,
            is_hole,
            label,
            shell: None,
            holes: Vec::new(),
        })
    }

    /// Prepares `next_min` linkage at every node of this maximal ring.
    pub fn link_directed_edges_for_minimal_edge_rings(&self, graph: &mut PlanarGraph, id: RingId) -> Result<()> {
        for &de_idx in &self.edges {
            let node = graph.directed_edges[de_idx].src;
            graph.link_minimal_directed_edges(node, id)?;
        }
        Ok(())
    }

    /// Splits this maximal ring into minimal rings, numbered from `first_id`.
    pub fn build_minimal_rings(&self, graph: &mut PlanarGraph, first_id: RingId) -> Result<Vec<EdgeRing>> {
        let mut min_rings = Vec::new();
        for &de_idx in &self.edges {
            if graph.directed_edges[de_idx].min_edge_ring.is_none() {
                let id = first_id + min_rings.len();
                min_rings.push(Self::build_minimal(graph, de_idx, id)?);
            }
        }
        Ok(min_rings)
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    pub fn max_node_degree(&self) -> Option<usize> {
        match self.kind {
            RingKind::Maximal { max_node_degree } => Some(max_node_degree),
            RingKind::Minimal => None,
        }
    }

    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    pub fn is_shell(&self) -> bool {
        !self.is_hole
    }

    /// True if the ring's edges come from a single input geometry.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    pub fn edges(&self) -> &[DirEdgeId] {
        &self.edges
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn linear_ring(&self) -> &LineString<f64> {
        &self.ring
    }

    pub fn envelope(&self) -> &Rect<f64> {
        &self.envelope
    }

    pub fn coordinate(&self, i: usize) -> Coord<f64> {
        self.ring.0[i]
    }

    pub fn shell(&self) -> Option<RingId> {
        self.shell
    }

    pub fn holes(&self) -> &[RingId] {
        &self.holes
    }

    pub(crate) fn assign_shell(&mut self, shell: RingId) -> Result<()> {
        if self.shell.is_some() {
            return Err(TopologyError::HoleAlreadyAssigned { coordinate: self.coordinate(0) });
        }
        self.shell = Some(shell);
        Ok(())
    }

    pub(crate) fn push_hole(&mut self, hole: RingId) {
        self.holes.push(hole);
    }

    /// True if `p` is inside this ring and outside all of its holes.
    pub fn contains_point(&self, p: Coord<f64>, rings: &[EdgeRing]) -> bool {
        if !envelope_contains_coord(&self.envelope, p) {
            return false;
        }
        if !point_in_ring(p, &self.ring) {
            return false;
        }
        !self.holes.iter().any(|&h| rings[h].contains_point(p, rings))
    }

    pub fn to_polygon(&self, rings: &[EdgeRing]) -> Polygon<f64> {
        let interiors = self.holes.iter().map(|&h| rings[h].ring.clone()).collect();
        Polygon::new(self.ring.clone(), interiors)
    }
}

/// Appends the points of an edge in traversal order, skipping the shared first
/// point unless this is the first edge of the ring.
fn add_points(edge_pts: &[Coord<f64>], forward: bool, is_first_edge: bool, pts: &mut Vec<Coord<f64>>) {
    let skip = if is_first_edge { 0 } else { 1 };
    if forward {
        pts.extend(edge_pts.iter().skip(skip));
    } else {
        pts.extend(edge_pts.iter().rev().skip(skip));
    }
}
