//! Error types.

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("vertex does not exist: {0}")]
    VertexNotFound(VertexId),

    #[error("edge does not exist: {0}")]
    EdgeNotFound(EdgeId),

    #[error("an edge between {0} and {1} already exists")]
    DuplicateEdge(VertexId, VertexId),

    #[error("self-loop on {0} is not allowed")]
    SelfLoop(VertexId),

    #[error("position ({0}, {1}) is already occupied")]
    PositionOccupied(f64, f64),
}
