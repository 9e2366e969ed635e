pub mod algorithm;
pub mod edge_ring;
pub mod error;
pub mod graph;
pub mod noding;
pub mod polygon_builder;
pub mod wasm;

pub use edge_ring::{EdgeRing, RingKind};
pub use error::{Result, TopologyError};
pub use graph::{Edge, EdgeIntersection, EdgeIntersectionList, Label, Location, PlanarGraph};
pub use noding::{EdgeNoder, NodingValidator};
pub use polygon_builder::PolygonBuilder;
