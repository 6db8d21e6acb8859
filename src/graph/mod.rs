//! Graph data structures and operations.
//!
//! This module provides the core graph structure using petgraph's StableGraph
//! for stable vertex/edge handles, with Structure of Arrays (SoA) layout for
//! positions and insertion-ordered incident lists for deterministic traversal.

mod edge;
mod engine;
mod vertex;

pub use edge::{EdgeId, Endpoints};
pub use engine::GraphEngine;
pub use vertex::{Position, VertexId};
