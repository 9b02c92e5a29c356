use std::hash::{Hash, Hasher};

use crate::graph::Orientation;
use crate::vertex::Vertex;

/// An edge between two vertices, either directed or undirected.
///
/// Edges are built in two steps that commit to an orientation:
/// [`Edge::between`]`(v).and(w)` gives an undirected edge and
/// [`Edge::from`]`(v).to(w)` a directed one. Fields are immutable.
///
/// Equality follows the orientation: undirected `(a, b)` equals `(b, a)`,
/// directed `(a, b)` equals only `(a, b)`, and a directed edge never equals an
/// undirected one.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    start: Vertex,
    end: Vertex,
    directed: bool,
}

/// First step of building an undirected edge.
#[derive(Clone, Copy, Debug)]
pub struct UndirectedBuilder {
    start: Vertex,
}

impl UndirectedBuilder {
    pub fn and(self, end: Vertex) -> Edge {
        Edge {
            start: self.start,
            end,
            directed: false,
        }
    }
}

/// First step of building a directed edge.
#[derive(Clone, Copy, Debug)]
pub struct DirectedBuilder {
    start: Vertex,
}

impl DirectedBuilder {
    pub fn to(self, end: Vertex) -> Edge {
        Edge {
            start: self.start,
            end,
            directed: true,
        }
    }
}

impl Edge {
    pub fn between(start: Vertex) -> UndirectedBuilder {
        UndirectedBuilder { start }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from(start: Vertex) -> DirectedBuilder {
        DirectedBuilder { start }
    }

    /// Builds an edge of the given orientation.
    pub fn new(start: Vertex, end: Vertex, orientation: impl Into<Orientation>) -> Self {
        match orientation.into() {
            Orientation::Undirected => Edge::between(start).and(end),
            Orientation::Directed => Edge::from(start).to(end),
        }
    }

    pub fn start(&self) -> Vertex {
        self.start
    }

    pub fn end(&self) -> Vertex {
        self.end
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from(self.directed)
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    pub fn is_incident(&self, vertex: Vertex) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// The endpoint opposite to `vertex`. For a directed edge this is the end
    /// when leaving from the start. A loop returns its only vertex.
    pub fn other_end(&self, vertex: Vertex) -> Vertex {
        if self.start == vertex {
            self.end
        } else {
            self.start
        }
    }

    /// Endpoints ordered so that undirected edges that compare equal give the
    /// same pair.
    pub fn endpoints(&self) -> (Vertex, Vertex) {
        if self.directed || self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// The same edge with its direction flipped. Undirected edges are returned
    /// unchanged.
    pub fn reversed(&self) -> Edge {
        if self.directed {
            Edge::from(self.end).to(self.start)
        } else {
            *self
        }
    }

    /// The undirected edge over the same endpoints.
    pub fn undirected(&self) -> Edge {
        Edge::between(self.start).and(self.end)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        if self.directed != other.directed {
            return false;
        }
        if self.directed {
            self.start == other.start && self.end == other.end
        } else {
            (self.start == other.start && self.end == other.end)
                || (self.start == other.end && self.end == other.start)
        }
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.directed.hash(state);
        self.endpoints().hash(state);
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "{} {} {}", self.start, arrow, self.end)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vertex::VertexSource;

    fn hash_of(edge: &Edge) -> u64 {
        let state = ahash::RandomState::with_seeds(1, 2, 3, 4);
        state.hash_one(edge)
    }

    #[test]
    fn undirected_equality_is_symmetric() {
        let source = VertexSource::new();
        let (a, b) = (source.fresh(), source.fresh());
        let ab = Edge::between(a).and(b);
        let ba = Edge::between(b).and(a);
        assert_eq!(ab, ba);
        assert_eq!(hash_of(&ab), hash_of(&ba));
    }

    #[test]
    fn directed_equality_respects_direction() {
        let source = VertexSource::new();
        let (a, b) = (source.fresh(), source.fresh());
        assert_eq!(Edge::from(a).to(b), Edge::from(a).to(b));
        assert_ne!(Edge::from(a).to(b), Edge::from(b).to(a));
        assert_eq!(Edge::from(a).to(b).reversed(), Edge::from(b).to(a));
    }

    #[test]
    fn orientations_never_compare_equal() {
        let source = VertexSource::new();
        let (a, b) = (source.fresh(), source.fresh());
        assert_ne!(Edge::from(a).to(b), Edge::between(a).and(b));
        assert_ne!(Edge::from(a).to(a), Edge::between(a).and(a));
        assert_eq!(Edge::from(a).to(b).undirected(), Edge::between(b).and(a));
    }

    #[test]
    fn loops() {
        let source = VertexSource::new();
        let (a, b) = (source.fresh(), source.fresh());
        assert!(Edge::between(a).and(a).is_loop());
        assert!(Edge::from(b).to(b).is_loop());
        assert!(!Edge::between(a).and(b).is_loop());
        assert_eq!(Edge::between(a).and(a).other_end(a), a);
    }

    #[test]
    fn other_end() {
        let source = VertexSource::new();
        let (a, b) = (source.fresh(), source.fresh());
        let e = Edge::between(a).and(b);
        assert_eq!(e.other_end(a), b);
        assert_eq!(e.other_end(b), a);
        assert!(e.is_incident(a) && e.is_incident(b));
    }

    #[test]
    fn display() {
        let source = VertexSource::with_tag(0);
        let vs = source.fresh_many(2);
        insta::assert_snapshot!(Edge::between(vs[0]).and(vs[1]).to_string(), @"v0 -- v1");
        insta::assert_snapshot!(Edge::from(vs[1]).to(vs[0]).to_string(), @"v1 -> v0");
    }
}
