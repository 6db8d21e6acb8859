//! Vertex identity and position types.
//!
//! Vertices are positioned nodes in the plane. Each vertex has:
//! - A stable unique identifier (survives graph mutations)
//! - A position (x, y) in map space
//!
//! Identity is carried by the identifier, never by coordinates: two distinct
//! vertices may only share coordinates transiently, and all container
//! membership (incident lists, visited sets, cost maps) is id-based.

use std::fmt;

/// Stable vertex identifier.
///
/// This ID remains valid even after other vertices are removed from the
/// graph, and is never reused within the lifetime of a [`GraphEngine`].
///
/// [`GraphEngine`]: super::GraphEngine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new VertexId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.0
    }
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    ///
    /// Symmetric, zero iff the coordinates are equal, and satisfies the
    /// triangle inequality.
    pub fn distance(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
