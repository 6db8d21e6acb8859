//! GraphEngine - Core graph data structure.
//!
//! The GraphEngine stores the graph topology using petgraph's StableGraph
//! and maintains SoA (Structure of Arrays) buffers for vertex positions,
//! insertion-ordered incident-edge lists for deterministic traversal, and a
//! spatial index for occupancy and coverage queries.

use std::collections::{BTreeMap, HashMap};

use petgraph::Undirected;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use tracing::debug;

use super::edge::{EdgeId, Endpoints};
use super::vertex::{Position, VertexId};
use crate::error::{Error, Result};
use crate::spatial::SpatialIndex;

/// The underlying topology storage. Vertices carry their stable id, edges
/// carry theirs, so endpoints can always be resolved back to handles.
type Topology = StableGraph<VertexId, EdgeId, Undirected>;

/// The core graph engine.
///
/// This struct manages:
/// - Undirected topology via petgraph
/// - Position buffers in SoA layout
/// - Incident-edge lists in insertion order (the traversal tie-break order)
/// - A spatial index for occupancy and radius queries
/// - ID mapping between stable ids and internal indices
///
/// The engine is not internally synchronized: mutation and query execution
/// must not be interleaved across threads. Callers needing shared access
/// must serialize externally, e.g. behind a lock.
pub struct GraphEngine {
    /// The underlying graph structure.
    graph: Topology,

    /// Map from stable VertexId to petgraph NodeIndex.
    ///
    /// Ordered by id. Ids are handed out monotonically and never reused, so
    /// iterating this map visits vertices in insertion order.
    vertices: BTreeMap<VertexId, NodeIndex>,

    /// Map from stable EdgeId to petgraph EdgeIndex.
    edges: HashMap<EdgeId, EdgeIndex>,

    /// Next vertex ID to assign.
    next_vertex_id: u32,

    /// Next edge ID to assign.
    next_edge_id: u32,

    /// X positions (SoA layout, indexed by NodeIndex).
    pos_x: Vec<f64>,

    /// Y positions (SoA layout, indexed by NodeIndex).
    pos_y: Vec<f64>,

    /// Incident edges per vertex, in insertion order.
    incident: HashMap<VertexId, Vec<EdgeId>>,

    /// Spatial index over vertex positions.
    spatial: SpatialIndex,
}

impl GraphEngine {
    /// Create a new empty graph engine.
    pub fn new() -> Self {
        Self {
            graph: Topology::default(),
            vertices: BTreeMap::new(),
            edges: HashMap::new(),
            next_vertex_id: 0,
            next_edge_id: 0,
            pos_x: Vec::new(),
            pos_y: Vec::new(),
            incident: HashMap::new(),
            spatial: SpatialIndex::new(),
        }
    }

    /// Create a graph engine with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: Topology::with_capacity(vertex_capacity, edge_capacity),
            vertices: BTreeMap::new(),
            edges: HashMap::with_capacity(edge_capacity),
            next_vertex_id: 0,
            next_edge_id: 0,
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            incident: HashMap::with_capacity(vertex_capacity),
            spatial: SpatialIndex::new(),
        }
    }

    // =========================================================================
    // Vertex Operations
    // =========================================================================

    /// Insert a vertex at the specified position.
    ///
    /// Positions are exclusive: inserting at coordinates already occupied by
    /// a live vertex fails with [`Error::PositionOccupied`]. The same policy
    /// applies to [`move_vertex`](Self::move_vertex).
    pub fn insert_vertex(&mut self, x: f64, y: f64) -> Result<VertexId> {
        if self.spatial.occupant(x, y).is_some() {
            return Err(Error::PositionOccupied(x, y));
        }

        let id = VertexId(self.next_vertex_id);
        self.next_vertex_id += 1;

        let index = self.graph.add_node(id);
        self.vertices.insert(id, index);

        // StableGraph reuses freed indices, so the slot may already exist.
        let i = index.index();
        if i == self.pos_x.len() {
            self.pos_x.push(x);
            self.pos_y.push(y);
        } else {
            self.pos_x[i] = x;
            self.pos_y[i] = y;
        }

        self.incident.insert(id, Vec::new());
        self.spatial.insert(id, x, y);

        debug!(vertex = %id, x, y, "vertex inserted");
        Ok(id)
    }

    /// Remove a vertex and tear down all its incident edges.
    ///
    /// Every incident edge is also removed from its opposite endpoint's
    /// incident list, so no remaining vertex references an edge touching the
    /// removed one.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        let index = self.vertices.remove(&v).ok_or(Error::VertexNotFound(v))?;

        let incident = self.incident.remove(&v).unwrap_or_default();
        for edge in incident {
            if let Some(opposite) = self.endpoints(edge).and_then(|ends| ends.opposite(v)) {
                if let Some(list) = self.incident.get_mut(&opposite) {
                    list.retain(|&e| e != edge);
                }
            }
            if let Some(edge_index) = self.edges.remove(&edge) {
                self.graph.remove_edge(edge_index);
            }
        }

        let i = index.index();
        self.spatial.remove(v, self.pos_x[i], self.pos_y[i]);
        self.pos_x[i] = 0.0;
        self.pos_y[i] = 0.0;
        self.graph.remove_node(index);

        debug!(vertex = %v, "vertex removed");
        Ok(())
    }

    /// Move a vertex to a new position.
    ///
    /// Fails with [`Error::PositionOccupied`] if any other vertex already
    /// sits at exactly `(x, y)`. Moving a vertex onto its own coordinates is
    /// a successful no-op. Incident edges are untouched.
    pub fn move_vertex(&mut self, v: VertexId, x: f64, y: f64) -> Result<()> {
        let &index = self.vertices.get(&v).ok_or(Error::VertexNotFound(v))?;

        if let Some(occupant) = self.spatial.occupant(x, y) {
            if occupant != v {
                return Err(Error::PositionOccupied(x, y));
            }
            return Ok(());
        }

        let i = index.index();
        self.spatial.remove(v, self.pos_x[i], self.pos_y[i]);
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.spatial.insert(v, x, y);

        debug!(vertex = %v, x, y, "vertex moved");
        Ok(())
    }

    /// Whether the vertex is currently in the graph.
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains_key(&v)
    }

    /// Get a vertex's position.
    pub fn position(&self, v: VertexId) -> Option<Position> {
        self.vertices.get(&v).map(|&index| {
            let i = index.index();
            Position::new(self.pos_x[i], self.pos_y[i])
        })
    }

    /// Euclidean distance between two vertices.
    ///
    /// Returns `None` if either vertex is not in the graph.
    pub fn distance(&self, u: VertexId, v: VertexId) -> Option<f64> {
        Some(self.position(u)?.distance(self.position(v)?))
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterate over all live vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// All vertices within `radius` of vertex `v` (boundary inclusive,
    /// including `v` itself). Returns `None` if `v` is not in the graph.
    pub fn vertices_within(&self, v: VertexId, radius: f64) -> Option<Vec<VertexId>> {
        let origin = self.position(v)?;
        Some(self.spatial.in_radius(origin.x, origin.y, radius))
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Insert an undirected edge between two vertices.
    ///
    /// The edge is registered on both endpoints' incident lists. Fails with
    /// [`Error::DuplicateEdge`] if an edge with the same unordered endpoint
    /// pair already exists, and with [`Error::SelfLoop`] for `u == v`.
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId> {
        if u == v {
            return Err(Error::SelfLoop(u));
        }
        let &u_index = self.vertices.get(&u).ok_or(Error::VertexNotFound(u))?;
        let &v_index = self.vertices.get(&v).ok_or(Error::VertexNotFound(v))?;

        // Symmetric registration means checking one endpoint's list suffices.
        for &edge in self.incident_edges(u) {
            if self
                .endpoints(edge)
                .is_some_and(|ends| ends.connects(u, v))
            {
                return Err(Error::DuplicateEdge(u, v));
            }
        }

        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;

        let index = self.graph.add_edge(u_index, v_index, id);
        self.edges.insert(id, index);
        self.incident.entry(u).or_default().push(id);
        self.incident.entry(v).or_default().push(id);

        debug!(edge = %id, u = %u, v = %v, "edge inserted");
        Ok(id)
    }

    /// Remove an edge from the graph and from both incident lists.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<()> {
        let ends = self.endpoints(e).ok_or(Error::EdgeNotFound(e))?;
        let index = self.edges.remove(&e).ok_or(Error::EdgeNotFound(e))?;
        self.graph.remove_edge(index);

        for endpoint in [ends.u, ends.v] {
            if let Some(list) = self.incident.get_mut(&endpoint) {
                list.retain(|&edge| edge != e);
            }
        }

        debug!(edge = %e, "edge removed");
        Ok(())
    }

    /// The unordered endpoint pair of an edge.
    pub fn endpoints(&self, e: EdgeId) -> Option<Endpoints> {
        let &index = self.edges.get(&e)?;
        let (a, b) = self.graph.edge_endpoints(index)?;
        let u = *self.graph.node_weight(a)?;
        let v = *self.graph.node_weight(b)?;
        Some(Endpoints::new(u, v))
    }

    /// The endpoint of `e` opposite to `v`.
    ///
    /// Returns `None` when the edge does not exist or `v` is not one of its
    /// endpoints - a normal query outcome, not an error.
    pub fn opposite(&self, e: EdgeId, v: VertexId) -> Option<VertexId> {
        self.endpoints(e)?.opposite(v)
    }

    /// Incident edges of a vertex, in insertion order.
    ///
    /// Unknown vertices have no incident edges.
    pub fn incident_edges(&self, v: VertexId) -> &[EdgeId] {
        self.incident.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Neighbors of a vertex, in incident-edge insertion order.
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.incident_edges(v)
            .iter()
            .filter_map(|&edge| self.opposite(edge, v))
            .collect()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Clear all vertices and edges, resetting the engine to its initial
    /// state. Previously issued ids become invalid and may be reissued.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.vertices.clear();
        self.edges.clear();
        self.next_vertex_id = 0;
        self.next_edge_id = 0;
        self.pos_x.clear();
        self.pos_y.clear();
        self.incident.clear();
        self.spatial.clear();
    }
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_vertex() {
        let mut engine = GraphEngine::new();
        let id = engine.insert_vertex(10.0, 20.0).unwrap();

        assert_eq!(engine.vertex_count(), 1);
        assert_eq!(engine.position(id), Some(Position::new(10.0, 20.0)));
        assert!(engine.contains_vertex(id));
    }

    #[test]
    fn test_insert_at_occupied_position_rejected() {
        let mut engine = GraphEngine::new();
        engine.insert_vertex(1.0, 2.0).unwrap();

        assert_eq!(
            engine.insert_vertex(1.0, 2.0),
            Err(Error::PositionOccupied(1.0, 2.0))
        );
        assert_eq!(engine.vertex_count(), 1);
    }

    #[test]
    fn test_insert_edge_registers_both_endpoints() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 1.0).unwrap();

        let e = engine.insert_edge(a, b).unwrap();

        assert_eq!(engine.edge_count(), 1);
        assert_eq!(engine.incident_edges(a), &[e]);
        assert_eq!(engine.incident_edges(b), &[e]);
    }

    #[test]
    fn test_duplicate_edge_rejected_in_either_order() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 1.0).unwrap();
        engine.insert_edge(a, b).unwrap();

        assert_eq!(engine.insert_edge(a, b), Err(Error::DuplicateEdge(a, b)));
        assert_eq!(engine.insert_edge(b, a), Err(Error::DuplicateEdge(b, a)));
        assert_eq!(engine.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();

        assert_eq!(engine.insert_edge(a, a), Err(Error::SelfLoop(a)));
        assert_eq!(engine.edge_count(), 0);
    }

    #[test]
    fn test_insert_edge_unknown_vertex() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let ghost = VertexId::new(99);

        assert_eq!(
            engine.insert_edge(a, ghost),
            Err(Error::VertexNotFound(ghost))
        );
    }

    #[test]
    fn test_remove_vertex_tears_down_edges() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 0.0).unwrap();
        let c = engine.insert_vertex(0.0, 1.0).unwrap();

        engine.insert_edge(a, b).unwrap();
        engine.insert_edge(b, c).unwrap();
        let ca = engine.insert_edge(c, a).unwrap();

        engine.remove_vertex(b).unwrap();

        assert!(!engine.contains_vertex(b));
        assert_eq!(engine.vertex_count(), 2);
        assert_eq!(engine.edge_count(), 1);
        // Only the c-a edge survives, on both endpoints.
        assert_eq!(engine.incident_edges(a), &[ca]);
        assert_eq!(engine.incident_edges(c), &[ca]);
        assert_eq!(engine.neighbors(a), vec![c]);
    }

    #[test]
    fn test_remove_unknown_vertex_fails() {
        let mut engine = GraphEngine::new();
        let ghost = VertexId::new(7);
        assert_eq!(engine.remove_vertex(ghost), Err(Error::VertexNotFound(ghost)));
    }

    #[test]
    fn test_remove_edge() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 1.0).unwrap();
        let e = engine.insert_edge(a, b).unwrap();

        engine.remove_edge(e).unwrap();

        assert_eq!(engine.edge_count(), 0);
        assert!(engine.incident_edges(a).is_empty());
        assert!(engine.incident_edges(b).is_empty());
        assert_eq!(engine.remove_edge(e), Err(Error::EdgeNotFound(e)));
    }

    #[test]
    fn test_move_vertex() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(1.0, 1.0).unwrap();
        let b = engine.insert_vertex(2.0, 2.0).unwrap();
        engine.insert_edge(a, b).unwrap();

        engine.move_vertex(b, 6.0, 2.0).unwrap();

        assert_eq!(engine.position(b), Some(Position::new(6.0, 2.0)));
        // The other vertex and the edge are untouched.
        assert_eq!(engine.position(a), Some(Position::new(1.0, 1.0)));
        assert_eq!(engine.edge_count(), 1);

        // Moving into the slot b vacated is now fine.
        engine.move_vertex(a, 2.0, 2.0).unwrap();
        assert_eq!(engine.position(a), Some(Position::new(2.0, 2.0)));
    }

    #[test]
    fn test_move_into_occupied_position_rejected() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(1.0, 1.0).unwrap();
        engine.insert_vertex(2.0, 2.0).unwrap();

        assert_eq!(
            engine.move_vertex(a, 2.0, 2.0),
            Err(Error::PositionOccupied(2.0, 2.0))
        );
        assert_eq!(engine.position(a), Some(Position::new(1.0, 1.0)));
    }

    #[test]
    fn test_move_onto_own_position_is_noop() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(1.0, 1.0).unwrap();

        engine.move_vertex(a, 1.0, 1.0).unwrap();
        assert_eq!(engine.position(a), Some(Position::new(1.0, 1.0)));
    }

    #[test]
    fn test_distance() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(1.0, 2.0).unwrap();
        let b = engine.insert_vertex(4.0, 10.0).unwrap();

        assert_eq!(engine.distance(a, a), Some(0.0));
        assert_eq!(engine.distance(a, b), engine.distance(b, a));
        assert!((engine.distance(a, b).unwrap() - 8.544).abs() < 1e-3);
        assert_eq!(engine.distance(a, VertexId::new(9)), None);
    }

    #[test]
    fn test_opposite() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 1.0).unwrap();
        let c = engine.insert_vertex(2.0, 2.0).unwrap();
        let e = engine.insert_edge(a, b).unwrap();

        assert_eq!(engine.opposite(e, a), Some(b));
        assert_eq!(engine.opposite(e, b), Some(a));
        assert_eq!(engine.opposite(e, c), None);
    }

    #[test]
    fn test_neighbors_in_insertion_order() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 0.0).unwrap();
        let c = engine.insert_vertex(0.0, 1.0).unwrap();
        let d = engine.insert_vertex(1.0, 1.0).unwrap();

        engine.insert_edge(a, c).unwrap();
        engine.insert_edge(b, a).unwrap();
        engine.insert_edge(a, d).unwrap();

        assert_eq!(engine.neighbors(a), vec![c, b, d]);
    }

    #[test]
    fn test_vertex_ids_not_reused_after_removal() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        engine.remove_vertex(a).unwrap();

        let b = engine.insert_vertex(0.0, 0.0).unwrap();
        assert_ne!(a, b);
        assert!(!engine.contains_vertex(a));
    }

    #[test]
    fn test_vertices_within() {
        let mut engine = GraphEngine::new();
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(3.0, 0.0).unwrap();
        engine.insert_vertex(10.0, 0.0).unwrap();

        let mut within = engine.vertices_within(a, 5.0).unwrap();
        within.sort();
        assert_eq!(within, vec![a, b]);
    }

    #[test]
    fn test_clear() {
        let mut engine = GraphEngine::with_capacity(4, 4);
        let a = engine.insert_vertex(0.0, 0.0).unwrap();
        let b = engine.insert_vertex(1.0, 1.0).unwrap();
        engine.insert_edge(a, b).unwrap();

        engine.clear();

        assert_eq!(engine.vertex_count(), 0);
        assert_eq!(engine.edge_count(), 0);
        // The vacated position is free again.
        engine.insert_vertex(0.0, 0.0).unwrap();
    }
}
