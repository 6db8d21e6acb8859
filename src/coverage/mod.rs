//! Range-constrained reachability and minimax-range queries.
//!
//! This module answers the coverage-planning questions on top of the graph
//! engine: range-constrained path search, bottleneck (minimax) range
//! computation, and the straight-line emergency range.

mod planner;

pub use planner::CoveragePlanner;
