use log::debug;

use super::{
    AdjacencyGraph, CanonicalGraph, FromCanonical, GraphError, MatrixGraph, Multigraph,
    Orientation,
};
use crate::edge::Edge;
use crate::multiset::Multiset;
use crate::vertex::{Vertex, VertexSource};

/// Collects vertices and edges, then builds any representation at once.
///
/// Nothing is validated until [`GraphBuilder::build`], which rejects repeated
/// vertices, edges with unknown endpoints, and mixed orientations.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    undirected: Multiset<Edge>,
    directed: Multiset<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            vertices: Vec::new(),
            undirected: Multiset::new(),
            directed: Multiset::new(),
        }
    }

    pub fn build<G: FromCanonical>(self) -> Result<G, GraphError> {
        debug!(
            "building graph with {} vertices and {} edges",
            self.vertices.len(),
            self.undirected.len() + self.directed.len()
        );
        let canonical = CanonicalGraph::new(self.vertices, self.undirected, self.directed)?;
        Ok(G::from_canonical(canonical))
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    pub fn add_vertices(&mut self, vertices: impl IntoIterator<Item = Vertex>) -> &mut Self {
        self.vertices.extend(vertices);
        self
    }

    /// Records an edge from `start` to `end` and returns it.
    pub fn add_edge(
        &mut self,
        start: Vertex,
        end: Vertex,
        orientation: impl Into<Orientation>,
    ) -> Edge {
        let edge = Edge::new(start, end, orientation);
        if edge.is_directed() {
            self.directed.insert(edge);
        } else {
            self.undirected.insert(edge);
        }
        edge
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A graph on `vertices` with the given edge multisets, at most one of them
/// non-empty.
pub fn from_edges<G: FromCanonical>(
    vertices: impl IntoIterator<Item = Vertex>,
    undirected: Multiset<Edge>,
    directed: Multiset<Edge>,
) -> Result<G, GraphError> {
    Ok(G::from_canonical(CanonicalGraph::new(
        vertices, undirected, directed,
    )?))
}

/// A graph whose rows and columns follow `vertices`.
pub fn from_matrix<G: FromCanonical>(
    vertices: impl IntoIterator<Item = Vertex>,
    matrix: Vec<Vec<usize>>,
    directed: bool,
) -> Result<G, GraphError> {
    Ok(MatrixGraph::new(vertices, matrix, directed)?.convert())
}

/// Like [`from_matrix`], with one fresh vertex from `source` per row.
///
/// Returns the vertices in row order alongside the graph.
pub fn from_fresh_matrix<G: FromCanonical>(
    source: &VertexSource,
    matrix: Vec<Vec<usize>>,
    directed: bool,
) -> Result<(Vec<Vertex>, G), GraphError> {
    let vertices = source.fresh_many(matrix.len());
    let graph = from_matrix(vertices.iter().copied(), matrix, directed)?;
    Ok((vertices, graph))
}

/// A graph with one neighbour multiset per vertex, in the order of
/// `vertices`.
pub fn from_adjacency<G: FromCanonical>(
    vertices: impl IntoIterator<Item = Vertex>,
    lists: Vec<Multiset<Vertex>>,
    directed: bool,
) -> Result<G, GraphError> {
    Ok(AdjacencyGraph::new(vertices, lists, directed)?.convert())
}
