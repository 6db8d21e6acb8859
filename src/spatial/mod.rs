//! Spatial indexing for O(log n) position queries.
//!
//! This module provides an R-tree based spatial index used for occupancy
//! checks and coverage-disc queries on graph vertices.

mod rtree;

pub use rtree::SpatialIndex;
