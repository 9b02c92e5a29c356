//! # Multigraph representations
//!
//! A finite multigraph is a vertex set together with a multiset of edges that
//! are either all undirected or all directed. Parallel edges and loops are
//! allowed.
//!
//! Three representations store the same abstract graph:
//!
//! - [`EdgeSetGraph`]: explicit edge multisets.
//! - [`MatrixGraph`]: an adjacency-count matrix.
//! - [`AdjacencyGraph`]: one neighbour multiset per vertex.
//!
//! All of them implement [`Multigraph`], and every query gives the same answer
//! on equivalent graphs. Graphs compare equal across representations when
//! their [`CanonicalGraph`] projections are equal.
//!
//! ## Conventions
//!
//! - A graph without edges has no orientation and accepts the first edge of
//!   either kind. Once it holds an edge, the other kind is rejected.
//! - An undirected loop contributes 2 to the degree of its vertex and appears
//!   twice in [`Multigraph::edges_at`]. A directed loop appears once among the
//!   outgoing and once among the incoming edges.
//! - [`Multigraph::make_directed`] turns every undirected edge into one edge
//!   per direction; a loop therefore becomes two directed loops.
//!   [`Multigraph::make_undirected`] forgets directions one for one.

use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;

use crate::define_indexed_vec;
use crate::edge::Edge;
use crate::multiset::Multiset;
use crate::vertex::Vertex;

pub mod adjacency;
pub mod builder;
pub mod edge_set;
pub mod matrix;

pub use adjacency::AdjacencyGraph;
pub use builder::GraphBuilder;
pub use edge_set::EdgeSetGraph;
pub use matrix::MatrixGraph;

define_indexed_vec!(
    /// Position of a vertex in the vertex order of an ordered representation.
    pub struct Slot;

    /// Storage indexed by vertex position.
    pub struct SlotVec;
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Undirected,
    Directed,
}

impl From<bool> for Orientation {
    fn from(directed: bool) -> Self {
        if directed {
            Orientation::Directed
        } else {
            Orientation::Undirected
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Undirected => write!(f, "undirected"),
            Orientation::Directed => write!(f, "directed"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Vertex {0} not in graph")]
    VertexNotInGraph(Vertex),
    #[error("Vertex {0} already in graph")]
    VertexAlreadyInGraph(Vertex),
    #[error("Edge {0} not in graph")]
    EdgeNotInGraph(Edge),
    #[error("Expected {expected} edges, found {found} ones")]
    OrientationMismatch {
        expected: Orientation,
        found: Orientation,
    },
    #[error("Graph cannot hold undirected and directed edges at once")]
    MixedOrientation,
    #[error("Matrix not square: row {row} has {len} entries, expected {expected}")]
    MatrixNotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("Matrix not symmetric at ({row}, {column}) in an undirected graph")]
    MatrixNotSymmetric { row: usize, column: usize },
    #[error("Adjacency lists of {0} and {1} disagree in an undirected graph")]
    AdjacencyNotSymmetric(Vertex, Vertex),
    #[error("Too many or too few vertices: {vertices} vertices for {dimension} rows")]
    VertexCountMismatch { vertices: usize, dimension: usize },
    #[error("Graph not Eulerian, impossible to find a cycle")]
    GraphNotEulerian,
    #[error("Junction {0} not in tour")]
    JunctionNotInTour(Vertex),
    #[error("{remaining} edges cannot be reached from the tour")]
    EdgesUnreachable { remaining: usize },
}

impl GraphError {
    pub(crate) fn mismatch(expected: Orientation) -> Self {
        let found = match expected {
            Orientation::Undirected => Orientation::Directed,
            Orientation::Directed => Orientation::Undirected,
        };
        GraphError::OrientationMismatch { expected, found }
    }
}

/// Collects `vertices` into a set, rejecting repeats.
pub(crate) fn distinct_vertices(
    vertices: impl IntoIterator<Item = Vertex>,
) -> Result<IndexSet<Vertex>, GraphError> {
    let mut set = IndexSet::new();
    for v in vertices {
        if !set.insert(v) {
            return Err(GraphError::VertexAlreadyInGraph(v));
        }
    }
    Ok(set)
}

/// Checks that none of `new` is already in the graph and that `new` has no
/// repeats, returning the vertices in the order given.
pub(crate) fn check_new_vertices<G: Multigraph>(
    graph: &G,
    new: impl IntoIterator<Item = Vertex>,
) -> Result<Vec<Vertex>, GraphError> {
    let new = distinct_vertices(new)?;
    if let Some(&v) = new.iter().find(|v| graph.contains_vertex(**v)) {
        return Err(GraphError::VertexAlreadyInGraph(v));
    }
    Ok(new.into_iter().collect())
}

/// The representation-independent content of a graph: its vertex set and its
/// two edge multisets, at most one of which is non-empty.
///
/// Every [`Multigraph`] projects to this, and structural equality is decided
/// here. The constructor validates its input, so any value of this type
/// satisfies the graph invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalGraph {
    vertices: IndexSet<Vertex>,
    undirected: Multiset<Edge>,
    directed: Multiset<Edge>,
}

impl CanonicalGraph {
    pub fn new(
        vertices: impl IntoIterator<Item = Vertex>,
        undirected: Multiset<Edge>,
        directed: Multiset<Edge>,
    ) -> Result<Self, GraphError> {
        let vertices = distinct_vertices(vertices)?;
        if !undirected.is_empty() && !directed.is_empty() {
            return Err(GraphError::MixedOrientation);
        }
        for (edges, orientation) in [
            (&undirected, Orientation::Undirected),
            (&directed, Orientation::Directed),
        ] {
            for edge in edges.elements() {
                if edge.orientation() != orientation {
                    return Err(GraphError::mismatch(orientation));
                }
                for end in [edge.start(), edge.end()] {
                    if !vertices.contains(&end) {
                        return Err(GraphError::VertexNotInGraph(end));
                    }
                }
            }
        }
        Ok(CanonicalGraph {
            vertices,
            undirected,
            directed,
        })
    }

    pub fn vertices(&self) -> &IndexSet<Vertex> {
        &self.vertices
    }

    pub fn undirected(&self) -> &Multiset<Edge> {
        &self.undirected
    }

    pub fn directed(&self) -> &Multiset<Edge> {
        &self.directed
    }

    pub fn is_directed(&self) -> bool {
        !self.directed.is_empty()
    }

    pub fn orientation(&self) -> Option<Orientation> {
        if self.directed.is_empty() && self.undirected.is_empty() {
            None
        } else {
            Some(Orientation::from(self.is_directed()))
        }
    }

    /// The edges of whichever orientation the graph has.
    pub fn edges(&self) -> &Multiset<Edge> {
        if self.is_directed() {
            &self.directed
        } else {
            &self.undirected
        }
    }

    pub fn into_parts(self) -> (IndexSet<Vertex>, Multiset<Edge>, Multiset<Edge>) {
        (self.vertices, self.undirected, self.directed)
    }
}

impl std::fmt::Display for CanonicalGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.orientation() {
            Some(orientation) => orientation.to_string(),
            None => "edgeless".to_string(),
        };
        let vertices = self.vertices.iter().sorted().join(", ");
        let edges = self
            .edges()
            .iter()
            .sorted_by_key(|e| e.endpoints())
            .join(", ");
        write!(f, "{kind} graph on {{{vertices}}}: [{edges}]")
    }
}

/// Representations that can be built from a validated [`CanonicalGraph`].
pub trait FromCanonical: Sized {
    fn from_canonical(canonical: CanonicalGraph) -> Self;
}

/// The query and mutation contract shared by every representation.
///
/// Fallible operations validate their arguments before touching the graph,
/// so an `Err` always leaves the graph as it was.
pub trait Multigraph: Clone {
    fn vertices(&self) -> IndexSet<Vertex>;

    fn vertex_count(&self) -> usize;

    fn contains_vertex(&self, vertex: Vertex) -> bool;

    /// Number of edges, counted with multiplicity.
    fn edge_count(&self) -> usize;

    /// True iff the graph holds at least one directed edge.
    fn is_directed(&self) -> bool;

    fn is_edgeless(&self) -> bool {
        self.edge_count() == 0
    }

    /// `None` for a graph without edges.
    fn orientation(&self) -> Option<Orientation> {
        if self.is_edgeless() {
            None
        } else {
            Some(Orientation::from(self.is_directed()))
        }
    }

    /// All undirected edges. Empty for a directed graph.
    fn undirected_edges(&self) -> Multiset<Edge>;

    /// All directed edges. Empty for an undirected graph.
    fn directed_edges(&self) -> Multiset<Edge>;

    /// Edges incident to `vertex` in an undirected graph, one entry per edge
    /// end, so a loop is listed twice.
    fn edges_at(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError>;

    /// Edges leaving `vertex` in a directed graph.
    fn edges_from(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError>;

    /// Edges entering `vertex` in a directed graph.
    fn edges_to(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError>;

    fn degree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        Ok(self.edges_at(vertex)?.len())
    }

    fn outdegree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        Ok(self.edges_from(vertex)?.len())
    }

    fn indegree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        Ok(self.edges_to(vertex)?.len())
    }

    /// How many copies of `edge` the graph holds. Zero when the orientation
    /// differs or an endpoint is missing.
    fn multiplicity(&self, edge: &Edge) -> usize;

    /// Adds vertices without edges. Fails, adding nothing, if any of them is
    /// already present or repeated.
    fn add_vertices(&mut self, new: impl IntoIterator<Item = Vertex>) -> Result<(), GraphError>;

    /// Removes `vertex` together with every edge incident to it.
    fn remove_vertex(&mut self, vertex: Vertex) -> Result<(), GraphError>;

    fn add_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError>;

    fn add_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError>;

    fn remove_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError>;

    fn remove_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError>;

    fn add_undirected_edge_between(&mut self, a: Vertex, b: Vertex) -> Result<(), GraphError> {
        self.add_undirected_edge(Edge::between(a).and(b))
    }

    fn add_directed_edge_from(&mut self, start: Vertex, end: Vertex) -> Result<(), GraphError> {
        self.add_directed_edge(Edge::from(start).to(end))
    }

    fn remove_undirected_edge_between(&mut self, a: Vertex, b: Vertex) -> Result<(), GraphError> {
        self.remove_undirected_edge(Edge::between(a).and(b))
    }

    fn remove_directed_edge_from(&mut self, start: Vertex, end: Vertex) -> Result<(), GraphError> {
        self.remove_directed_edge(Edge::from(start).to(end))
    }

    /// Adds `edge` through the method matching its orientation.
    fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if edge.is_directed() {
            self.add_directed_edge(edge)
        } else {
            self.add_undirected_edge(edge)
        }
    }

    /// Removes `edge` through the method matching its orientation.
    fn remove_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if edge.is_directed() {
            self.remove_directed_edge(edge)
        } else {
            self.remove_undirected_edge(edge)
        }
    }

    /// A copy with every directed edge made undirected. An undirected graph
    /// is returned as an identical copy.
    fn make_undirected(&self) -> Self;

    /// A copy where every undirected edge `{a, b}` becomes `a -> b` and
    /// `b -> a`, and every loop becomes two directed loops. A directed graph
    /// is returned as an identical copy.
    fn make_directed(&self) -> Self;

    fn canonical(&self) -> CanonicalGraph {
        CanonicalGraph {
            vertices: self.vertices(),
            undirected: self.undirected_edges(),
            directed: self.directed_edges(),
        }
    }

    /// Structural equality with a graph of any representation.
    fn structurally_eq<G: Multigraph>(&self, other: &G) -> bool {
        self.canonical() == other.canonical()
    }

    /// The same graph in another representation.
    fn convert<G: FromCanonical>(&self) -> G {
        G::from_canonical(self.canonical())
    }

    fn to_edge_set(&self) -> EdgeSetGraph {
        self.convert()
    }

    fn to_matrix(&self) -> MatrixGraph {
        self.convert()
    }

    fn to_adjacency(&self) -> AdjacencyGraph {
        self.convert()
    }
}

#[duplicate::duplicate_item(
    left            right;
    [EdgeSetGraph]  [EdgeSetGraph];
    [EdgeSetGraph]  [MatrixGraph];
    [EdgeSetGraph]  [AdjacencyGraph];
    [MatrixGraph]   [EdgeSetGraph];
    [MatrixGraph]   [MatrixGraph];
    [MatrixGraph]   [AdjacencyGraph];
    [AdjacencyGraph] [EdgeSetGraph];
    [AdjacencyGraph] [MatrixGraph];
    [AdjacencyGraph] [AdjacencyGraph];
)]
impl PartialEq<right> for left {
    fn eq(&self, other: &right) -> bool {
        self.structurally_eq(other)
    }
}

#[duplicate::duplicate_item(graph; [EdgeSetGraph]; [MatrixGraph]; [AdjacencyGraph];)]
impl Eq for graph {}

#[duplicate::duplicate_item(graph; [EdgeSetGraph]; [MatrixGraph]; [AdjacencyGraph];)]
impl std::fmt::Display for graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.canonical(), f)
    }
}

#[cfg(test)]
mod tests;
