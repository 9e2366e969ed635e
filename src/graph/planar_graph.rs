use geo_types::{Coord, LineString};
use std::collections::HashMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::edge::Edge;
use super::label::Label;
use crate::error::{Result, TopologyError};

// Type aliases for indices to ensure we don't mix them up
pub type NodeId = usize;
pub type EdgeId = usize;
pub type DirEdgeId = usize;
/// Index of an edge ring in the arena of the builder that created it.
pub type RingId = usize;

#[derive(Clone, Debug)]
pub struct Node {
    pub coordinate: Coord<f64>,
    /// Indices of outgoing DirectedEdges.
    /// Sorted by polar angle (CCW) once the graph is linked.
    pub outgoing_edges: Vec<DirEdgeId>,
}

#[derive(Clone, Debug)]
pub struct DirectedEdge {
    pub src: NodeId,
    pub dst: NodeId,
    /// Reference to the parent edge
    pub edge_idx: EdgeId,
    /// Index of the symmetric (reverse) edge
    pub sym_idx: DirEdgeId,
    /// Angle of the first segment leaving `src`
    pub angle: f64,
    /// Orientation in the parent edge (true: same direction, false: opposite)
    pub edge_direction: bool,
    /// Edge label as seen along this direction
    pub label: Label,
    pub in_result: bool,
    /// Next edge of the maximal ring this edge is linked into
    pub next: Option<DirEdgeId>,
    /// Next edge of the minimal ring this edge is linked into
    pub next_min: Option<DirEdgeId>,
    pub edge_ring: Option<RingId>,
    pub min_edge_ring: Option<RingId>,
}

pub struct PlanarGraph {
    /// All nodes in the graph. Index is `NodeId`.
    pub nodes: Vec<Node>,
    /// All edges (geometry and label owners). Index is `EdgeId`.
    pub edges: Vec<Edge>,
    /// Directed half-edges, two per edge. Index is `DirEdgeId`.
    pub directed_edges: Vec<DirectedEdge>,
    /// Lookup map to dedup nodes during construction.
    pub node_map: HashMap<NodeKey, NodeId>,
    stars_sorted: bool,
}

// Wrapper for Coord to be Hashable (since f64 is not Hash)
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct NodeKey(u64, u64);

impl From<Coord<f64>> for NodeKey {
    fn from(c: Coord<f64>) -> Self {
        // Exact match only; +0.0 folds -0.0 into 0.0.
        NodeKey((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
    }
}

impl Default for PlanarGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanarGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            directed_edges: Vec::new(),
            node_map: HashMap::new(),
            stars_sorted: true,
        }
    }

    pub fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        let key = NodeKey::from(coord);
        if let Some(&id) = self.node_map.get(&key) {
            return id;
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            coordinate: coord,
            outgoing_edges: Vec::new(),
        });
        self.node_map.insert(key, id);
        id
    }

    pub fn find_node(&self, coord: Coord<f64>) -> Option<NodeId> {
        self.node_map.get(&NodeKey::from(coord)).copied()
    }

    /// Adds an edge and its two directed edges. The edge is assumed to be noded.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let n = edge.pts.len();
        debug_assert!(n >= 2, "an edge needs at least two points");
        let p0 = edge.pts[0];
        let p1 = edge.pts[1];
        let q0 = edge.pts[n - 1];
        let q1 = edge.pts[n - 2];

        let u = self.add_node(p0);
        let v = self.add_node(q0);

        let edge_idx = self.edges.len();
        let de_u_v_idx = self.directed_edges.len();
        let de_v_u_idx = self.directed_edges.len() + 1;

        self.directed_edges.push(DirectedEdge {
            src: u,
            dst: v,
            edge_idx,
            sym_idx: de_v_u_idx,
            angle: (p1.y - p0.y).atan2(p1.x - p0.x),
            edge_direction: true,
            label: edge.label,
            in_result: false,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
        });

        self.directed_edges.push(DirectedEdge {
            src: v,
            dst: u,
            edge_idx,
            sym_idx: de_u_v_idx,
            angle: (q1.y - q0.y).atan2(q1.x - q0.x),
            edge_direction: false,
            label: edge.label.flipped(),
            in_result: false,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
        });

        self.edges.push(edge);
        self.nodes[u].outgoing_edges.push(de_u_v_idx);
        self.nodes[v].outgoing_edges.push(de_v_u_idx);
        self.stars_sorted = false;

        edge_idx
    }

    pub fn add_edges<I: IntoIterator<Item = Edge>>(&mut self, edges: I) {
        for edge in edges {
            self.add_edge(edge);
        }
    }

    pub fn add_line_string(&mut self, line: LineString<f64>, label: Label) -> EdgeId {
        self.add_edge(Edge::from_line_string(line, label))
    }

    /// The directed edge traversing `edge_idx` forwards (`true`) or backwards.
    pub fn directed_edge_of(&self, edge_idx: EdgeId, forward: bool) -> DirEdgeId {
        let de = 2 * edge_idx;
        if forward {
            de
        } else {
            de + 1
        }
    }

    pub fn set_in_result(&mut self, de_idx: DirEdgeId, in_result: bool) {
        self.directed_edges[de_idx].in_result = in_result;
    }

    pub fn coordinate(&self, de_idx: DirEdgeId) -> Coord<f64> {
        self.nodes[self.directed_edges[de_idx].src].coordinate
    }

    /// Sorts all outgoing edges of all nodes by angle.
    pub fn sort_edges(&mut self) {
        let directed_edges = &self.directed_edges;
        let sort_star = |node: &mut Node| {
            node.outgoing_edges.sort_by(|&a_idx, &b_idx| {
                let a = &directed_edges[a_idx];
                let b = &directed_edges[b_idx];
                a.angle.partial_cmp(&b.angle).unwrap_or(std::cmp::Ordering::Equal)
            });
        };

        #[cfg(feature = "parallel")]
        self.nodes.par_iter_mut().for_each(sort_star);
        #[cfg(not(feature = "parallel"))]
        self.nodes.iter_mut().for_each(sort_star);

        self.stars_sorted = true;
    }

    /// Outgoing edges at `node` where either direction is in the result, in CCW order.
    pub fn result_area_edges(&self, node: NodeId) -> Vec<DirEdgeId> {
        self.nodes[node]
            .outgoing_edges
            .iter()
            .copied()
            .filter(|&de_idx| {
                let de = &self.directed_edges[de_idx];
                de.in_result || self.directed_edges[de.sym_idx].in_result
            })
            .collect()
    }

    /// Wires `next` so that following it from any in-result area edge traces a result ring.
    ///
    /// At each node every in-result incoming edge is linked to the next in-result
    /// outgoing edge counter-clockwise from it.
    pub fn link_result_directed_edges(&mut self) -> Result<()> {
        if !self.stars_sorted {
            self.sort_edges();
        }
        for node in 0..self.nodes.len() {
            self.link_result_at(node)?;
        }
        Ok(())
    }

    fn link_result_at(&mut self, node: NodeId) -> Result<()> {
        let star = self.result_area_edges(node);

        let mut first_out: Option<DirEdgeId> = None;
        let mut incoming: Option<DirEdgeId> = None;

        for &next_out in &star {
            let next_in = self.directed_edges[next_out].sym_idx;
            if !self.directed_edges[next_out].label.is_area() {
                continue;
            }
            if first_out.is_none() && self.directed_edges[next_out].in_result {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if self.directed_edges[next_in].in_result {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if self.directed_edges[next_out].in_result {
                        self.directed_edges[inc].next = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let Some(out) = first_out else {
                return Err(TopologyError::UnlinkedIncomingEdge {
                    coordinate: self.nodes[node].coordinate,
                });
            };
            self.directed_edges[inc].next = Some(out);
        }
        Ok(())
    }

    /// Wires `next_min` at `node` for the edges belonging to maximal ring `ring`.
    ///
    /// Same pairing as the result linkage, but scanning clockwise so that every
    /// lobe of a self-touching ring closes on itself.
    pub fn link_minimal_directed_edges(&mut self, node: NodeId, ring: RingId) -> Result<()> {
        let star = self.result_area_edges(node);

        let mut first_out: Option<DirEdgeId> = None;
        let mut incoming: Option<DirEdgeId> = None;

        for &next_out in star.iter().rev() {
            let next_in = self.directed_edges[next_out].sym_idx;
            let out_on_ring = self.directed_edges[next_out].edge_ring == Some(ring);
            if first_out.is_none() && out_on_ring {
                first_out = Some(next_out);
            }
            match incoming {
                None => {
                    if self.directed_edges[next_in].edge_ring == Some(ring) {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if out_on_ring {
                        self.directed_edges[inc].next_min = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let Some(out) = first_out else {
                return Err(TopologyError::UnlinkedIncomingEdge {
                    coordinate: self.nodes[node].coordinate,
                });
            };
            self.directed_edges[inc].next_min = Some(out);
        }
        Ok(())
    }

    /// Number of outgoing edges at `node` assigned to maximal ring `ring`.
    pub fn outgoing_degree(&self, node: NodeId, ring: RingId) -> usize {
        self.nodes[node]
            .outgoing_edges
            .iter()
            .filter(|&&de_idx| self.directed_edges[de_idx].edge_ring == Some(ring))
            .count()
    }
}
