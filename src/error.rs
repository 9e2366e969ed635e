use geo_types::{Coord, Line};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("found endpt/interior pt intersection at index {index} :pt {coordinate:?}")]
    NonNodedEndpointIntersection { index: usize, coordinate: Coord<f64> },

    #[error("found non-noded intersection at {segment_a:?} and {segment_b:?}")]
    NonNodedCrossing { segment_a: Line<f64>, segment_b: Line<f64> },

    #[error("found non-noded collapse at {points:?}")]
    DegenerateCollapse { points: [Coord<f64>; 3] },

    #[error("found two shells in minimal edge ring set near {coordinate:?}")]
    AmbiguousShellSet { coordinate: Coord<f64> },

    #[error("unable to assign hole to a shell at {coordinate:?}")]
    UnassignableHole { coordinate: Coord<f64> },

    #[error("found null directed edge while building ring at {coordinate:?}")]
    MissingNextEdge { coordinate: Coord<f64> },

    #[error("directed edge visited twice during ring-building at {coordinate:?}")]
    DirectedEdgeVisitedTwice { coordinate: Coord<f64> },

    #[error("no outgoing directed edge found at {coordinate:?}")]
    UnlinkedIncomingEdge { coordinate: Coord<f64> },

    #[error("hole at {coordinate:?} is already assigned to a shell")]
    HoleAlreadyAssigned { coordinate: Coord<f64> },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
