pub mod edge;
pub mod edge_intersection;
pub mod label;
pub mod planar_graph;


pub use edge::Edge;
pub use edge_intersection::{EdgeIntersection, EdgeIntersectionList};
pub use label::{Label, Location, Position, TopologyLocation};
pub use planar_graph::{DirEdgeId, DirectedEdge, EdgeId, Node, NodeId, PlanarGraph, RingId};
