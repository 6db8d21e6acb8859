//! Coverage Graph
//!
//! A planar undirected graph of positioned vertices connected by
//! Euclidean-distance edges, built for emergency-coverage planning: given a
//! responder at a base vertex, determine the broadcast range required to
//! reach a target vertex, or find a feasible route given a fixed range.
//!
//! # Architecture
//!
//! - `graph`: Graph engine using petgraph's StableGraph, with stable vertex
//!   and edge handles, SoA position buffers, and insertion-ordered incident
//!   lists
//! - `spatial`: R-tree spatial indexing for occupancy and radius queries
//! - `coverage`: Range-constrained path search and minimax-range queries
//! - `error`: Error taxonomy shared across the crate
//!
//! # Threading
//!
//! All operations are synchronous, in-memory traversals with no internal
//! synchronization. Graph mutation and query execution are not safe to
//! interleave across threads; callers needing shared access must serialize
//! externally (e.g. behind a mutex).
//!
//! # Example
//!
//! ```
//! use coverage_graph::{CoveragePlanner, GraphEngine};
//!
//! let mut graph = GraphEngine::new();
//! let base = graph.insert_vertex(0.0, 0.0)?;
//! let relay = graph.insert_vertex(2.0, 6.0)?;
//! let target = graph.insert_vertex(4.0, 6.0)?;
//! graph.insert_edge(base, relay)?;
//! graph.insert_edge(relay, target)?;
//!
//! let planner = CoveragePlanner::new(&graph);
//! let range = planner.minimum_range(base, target).unwrap();
//! let route = planner.find_path(base, target, range).unwrap();
//! assert_eq!(route, vec![base, relay, target]);
//! # Ok::<(), coverage_graph::Error>(())
//! ```

pub mod coverage;
pub mod error;
pub mod graph;
pub mod spatial;

pub use coverage::CoveragePlanner;
pub use error::{Error, Result};
pub use graph::{EdgeId, Endpoints, GraphEngine, Position, VertexId};
pub use spatial::SpatialIndex;
