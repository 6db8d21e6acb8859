//! Coverage planning queries.
//!
//! Answers the two spatial-reachability questions of emergency-coverage
//! planning: given a responder at a base vertex, which route reaches a target
//! within a fixed broadcast radius, and what is the smallest radius for which
//! any such route exists.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use tracing::debug;

use crate::graph::{GraphEngine, VertexId};

/// Query planner over a graph engine.
///
/// Borrows the engine immutably; all queries read the topology and positions
/// as they are at call time.
pub struct CoveragePlanner<'g> {
    graph: &'g GraphEngine,
}

impl<'g> CoveragePlanner<'g> {
    /// Create a planner over the given engine.
    pub fn new(graph: &'g GraphEngine) -> Self {
        Self { graph }
    }

    /// The radius required for `v` to reach every vertex in straight-line
    /// distance, ignoring edges entirely.
    ///
    /// Degenerates to 0.0 when `v` is the only vertex. This is an upper
    /// bound on any feasible range, not a graph-aware answer. Returns `None`
    /// if `v` is not in the graph.
    pub fn emergency_range(&self, v: VertexId) -> Option<f64> {
        let origin = self.graph.position(v)?;
        let range = self
            .graph
            .vertices()
            .filter_map(|u| self.graph.position(u))
            .map(|p| origin.distance(p))
            .fold(0.0, f64::max);
        Some(range)
    }

    /// Find a path from `base` to `target` on which every vertex lies within
    /// `radius` of `base`.
    ///
    /// The constraint is always measured from the fixed base, never between
    /// consecutive vertices. Breadth-first search over path prefixes: the
    /// frontier grows one hop at a time, so the first path reaching the
    /// target has minimum hop count. Incident edges are expanded in
    /// insertion order, which makes the returned path deterministic.
    ///
    /// `base == target` yields the single-vertex path. A missing vertex or
    /// an exhausted frontier yields `None`, which is a valid domain answer
    /// ("no route"), not an error.
    pub fn find_path(&self, base: VertexId, target: VertexId, radius: f64) -> Option<Vec<VertexId>> {
        if !self.graph.contains_vertex(base) || !self.graph.contains_vertex(target) {
            return None;
        }
        let base_pos = self.graph.position(base)?;

        let mut frontier: VecDeque<Vec<VertexId>> = VecDeque::new();
        frontier.push_back(vec![base]);

        while let Some(path) = frontier.pop_front() {
            let Some(&cursor) = path.last() else {
                continue;
            };
            if cursor == target {
                debug!(base = %base, target = %target, hops = path.len() - 1, "path found");
                return Some(path);
            }

            for &edge in self.graph.incident_edges(cursor) {
                let Some(opposite) = self.graph.opposite(edge, cursor) else {
                    continue;
                };
                let Some(pos) = self.graph.position(opposite) else {
                    continue;
                };
                // Cycle avoidance is local to each prefix.
                if base_pos.distance(pos) <= radius && !path.contains(&opposite) {
                    let mut extended = path.clone();
                    extended.push(opposite);
                    frontier.push_back(extended);
                }
            }
        }

        debug!(base = %base, target = %target, radius, "no path within radius");
        None
    }

    /// The minimal radius such that some path from `base` to `target` lies
    /// entirely within that radius of `base` (bottleneck shortest path).
    ///
    /// Dijkstra-style greedy relaxation where the cost of extending a path
    /// to a vertex is `max(path_cost, distance(vertex, base))` instead of a
    /// sum. Vertex selection and relaxation scan in insertion order, so
    /// equal-cost ties resolve deterministically to the earliest-inserted
    /// vertex.
    ///
    /// Returns `Some(f64::INFINITY)` when the target is unreachable and
    /// `None` when either vertex is missing. The result agrees with the
    /// smallest radius for which [`find_path`](Self::find_path) succeeds.
    pub fn minimum_range(&self, base: VertexId, target: VertexId) -> Option<f64> {
        if !self.graph.contains_vertex(base) || !self.graph.contains_vertex(target) {
            return None;
        }
        let base_pos = self.graph.position(base)?;

        let mut cost: BTreeMap<VertexId, f64> = self
            .graph
            .vertices()
            .map(|v| (v, f64::INFINITY))
            .collect();
        cost.insert(base, 0.0);
        let mut visited: BTreeSet<VertexId> = BTreeSet::new();

        while visited.len() < cost.len() {
            // Unvisited vertex with minimum cost; first-inserted wins ties.
            let mut cursor = None;
            let mut best = f64::INFINITY;
            for (&v, &d) in &cost {
                if !visited.contains(&v) && (cursor.is_none() || d < best) {
                    cursor = Some(v);
                    best = d;
                }
            }
            let Some(cursor) = cursor else {
                break;
            };
            if best.is_infinite() {
                // Everything left is unreachable from base.
                break;
            }
            visited.insert(cursor);

            for &edge in self.graph.incident_edges(cursor) {
                let Some(opposite) = self.graph.opposite(edge, cursor) else {
                    continue;
                };
                if visited.contains(&opposite) {
                    continue;
                }
                let Some(pos) = self.graph.position(opposite) else {
                    continue;
                };
                let candidate = base_pos.distance(pos).max(best);
                if let Some(entry) = cost.get_mut(&opposite) {
                    if candidate < *entry {
                        *entry = candidate;
                    }
                }
            }
        }

        let range = cost.get(&target).copied();
        debug!(base = %base, target = %target, ?range, "minimum range computed");
        range
    }
}
