//! Edge identity and endpoint types.
//!
//! Edges are undirected connections between two vertices. Each edge has:
//! - A stable unique identifier
//! - An unordered pair of endpoint vertex ids

use std::fmt;

use super::vertex::VertexId;

/// Stable edge identifier.
///
/// This ID remains valid even after other edges are removed from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw u32.
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

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EdgeId> for u32 {
    #[inline]
    fn from(id: EdgeId) -> Self {
        id.0
    }
}

/// The unordered endpoint pair of an edge.
///
/// Two `Endpoints` values are equal iff they connect the same two vertices,
/// regardless of the order the endpoints were given in.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Endpoints {
    /// One endpoint.
    pub u: VertexId,
    /// The other endpoint.
    pub v: VertexId,
}

impl Endpoints {
    /// Create an endpoint pair.
    #[inline]
    pub fn new(u: VertexId, v: VertexId) -> Self {
        Self { u, v }
    }

    /// Whether `vertex` is one of the two endpoints.
    #[inline]
    pub fn contains(self, vertex: VertexId) -> bool {
        self.u == vertex || self.v == vertex
    }

    /// The endpoint opposite to `vertex`.
    ///
    /// Returns `None` when `vertex` is not an endpoint of this edge; a wrong
    /// vertex is never returned silently.
    pub fn opposite(self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.u {
            Some(self.v)
        } else if vertex == self.v {
            Some(self.u)
        } else {
            None
        }
    }

    /// Whether this pair connects exactly `a` and `b`, in either order.
    pub fn connects(self, a: VertexId, b: VertexId) -> bool {
        (self.u == a && self.v == b) || (self.u == b && self.v == a)
    }
}

impl PartialEq for Endpoints {
    fn eq(&self, other: &Self) -> bool {
        self.connects(other.u, other.v)
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}-{}>", self.u, self.v)
    }
}
