//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Exact-position occupancy lookup
//! - Point-in-radius

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::VertexId;

/// A point in the spatial index with associated vertex ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    /// The vertex identifier.
    pub id: VertexId,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl VertexPoint {
    /// Create a new VertexPoint.
    pub fn new(id: VertexId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        // Occupancy is defined by exact coordinate equality.
        self.x == point[0] && self.y == point[1]
    }
}

/// Spatial index for graph vertices.
///
/// Uses an R*-tree for efficient occupancy and radius queries. The engine
/// keeps it in sync on every insert, removal, and move.
pub struct SpatialIndex {
    tree: RTree<VertexPoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a vertex into the index.
    pub fn insert(&mut self, id: VertexId, x: f64, y: f64) {
        self.tree.insert(VertexPoint::new(id, x, y));
    }

    /// Remove a vertex from the index.
    ///
    /// Returns true if the vertex was found and removed.
    pub fn remove(&mut self, id: VertexId, x: f64, y: f64) -> bool {
        let point = VertexPoint::new(id, x, y);
        self.tree.remove(&point).is_some()
    }

    /// The vertex sitting at exactly `(x, y)`, if any.
    ///
    /// The engine never stores two vertices at the same coordinates, so at
    /// most one occupant exists.
    pub fn occupant(&self, x: f64, y: f64) -> Option<VertexId> {
        self.tree.locate_at_point(&[x, y]).map(|point| point.id)
    }

    /// Find all vertices within `radius` of a point (boundary inclusive).
    pub fn in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<VertexId> {
        if radius < 0.0 {
            return Vec::new();
        }
        let radius_sq = radius * radius;
        self.tree
            .locate_within_distance([x, y], radius_sq)
            .map(|point| point.id)
            .collect()
    }

    /// Clear all vertices from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of vertices in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupant_exact_match_only() {
        let mut index = SpatialIndex::new();
        index.insert(VertexId(0), 1.0, 2.0);
        index.insert(VertexId(1), 4.0, 10.0);

        assert_eq!(index.occupant(1.0, 2.0), Some(VertexId(0)));
        assert_eq!(index.occupant(4.0, 10.0), Some(VertexId(1)));
        // Near misses are not occupancy.
        assert_eq!(index.occupant(1.0, 2.0001), None);
        assert_eq!(index.occupant(0.0, 0.0), None);
    }

    #[test]
    fn test_remove() {
        let mut index = SpatialIndex::new();
        index.insert(VertexId(0), 0.0, 0.0);

        assert!(index.remove(VertexId(0), 0.0, 0.0));
        assert_eq!(index.occupant(0.0, 0.0), None);
        assert!(!index.remove(VertexId(0), 0.0, 0.0));
    }

    #[test]
    fn test_in_radius() {
        let mut index = SpatialIndex::new();
        index.insert(VertexId(0), 0.0, 0.0);
        index.insert(VertexId(1), 3.0, 0.0);
        index.insert(VertexId(2), 10.0, 0.0);

        let in_radius = index.in_radius(0.0, 0.0, 5.0);
        assert_eq!(in_radius.len(), 2);
        assert!(in_radius.contains(&VertexId(0)));
        assert!(in_radius.contains(&VertexId(1)));
    }

    #[test]
    fn test_in_radius_boundary_inclusive() {
        let mut index = SpatialIndex::new();
        index.insert(VertexId(0), 3.0, 4.0);

        assert_eq!(index.in_radius(0.0, 0.0, 5.0), vec![VertexId(0)]);
        assert!(index.in_radius(0.0, 0.0, 4.9).is_empty());
    }

    #[test]
    fn test_in_radius_negative_radius_is_empty() {
        let mut index = SpatialIndex::new();
        index.insert(VertexId(0), 0.0, 0.0);

        assert!(index.in_radius(0.0, 0.0, -1.0).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut index = SpatialIndex::new();
        index.insert(VertexId(0), 0.0, 0.0);
        index.insert(VertexId(1), 1.0, 1.0);
        assert_eq!(index.len(), 2);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.occupant(0.0, 0.0), None);
    }
}
