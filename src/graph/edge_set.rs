use indexmap::IndexSet;
use log::debug;

use super::{
    check_new_vertices, CanonicalGraph, FromCanonical, GraphError, Multigraph, Orientation,
};
use crate::edge::Edge;
use crate::multiset::Multiset;
use crate::vertex::Vertex;

/// A multigraph stored as its vertex set and explicit edge multisets.
///
/// Exactly one of `undirected` and `directed` may be non-empty.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSetGraph {
    vertices: IndexSet<Vertex>,
    undirected: Multiset<Edge>,
    directed: Multiset<Edge>,
}

impl EdgeSetGraph {
    pub fn new(
        vertices: impl IntoIterator<Item = Vertex>,
        undirected: Multiset<Edge>,
        directed: Multiset<Edge>,
    ) -> Result<Self, GraphError> {
        Ok(Self::from_canonical(CanonicalGraph::new(
            vertices, undirected, directed,
        )?))
    }

    /// A graph on `vertices` without edges.
    pub fn edgeless(vertices: impl IntoIterator<Item = Vertex>) -> Result<Self, GraphError> {
        Self::new(vertices, Multiset::new(), Multiset::new())
    }

    fn check_vertex(&self, vertex: Vertex) -> Result<(), GraphError> {
        if self.vertices.contains(&vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotInGraph(vertex))
        }
    }

    /// Validates `edge` for insertion or removal: the method orientation
    /// `expected` must match the edge and the graph, and both ends must exist.
    fn check_edge(&self, edge: &Edge, expected: Orientation) -> Result<(), GraphError> {
        if edge.orientation() != expected {
            return Err(GraphError::mismatch(expected));
        }
        self.check_orientation(expected)?;
        self.check_vertex(edge.start())?;
        self.check_vertex(edge.end())
    }

    fn check_orientation(&self, expected: Orientation) -> Result<(), GraphError> {
        match self.orientation() {
            Some(found) if found != expected => Err(GraphError::mismatch(expected)),
            _ => Ok(()),
        }
    }

    /// The edges of `edges`, each listed `keep(edge)` times per copy.
    fn select(&self, edges: &Multiset<Edge>, keep: impl Fn(&Edge) -> usize) -> Multiset<Edge> {
        let mut selected = Multiset::new();
        for (edge, count) in edges.iter_counts() {
            selected.insert_n(*edge, count * keep(edge));
        }
        selected
    }
}

impl FromCanonical for EdgeSetGraph {
    fn from_canonical(canonical: CanonicalGraph) -> Self {
        let (vertices, undirected, directed) = canonical.into_parts();
        EdgeSetGraph {
            vertices,
            undirected,
            directed,
        }
    }
}

impl Multigraph for EdgeSetGraph {
    fn vertices(&self) -> IndexSet<Vertex> {
        self.vertices.clone()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.vertices.contains(&vertex)
    }

    fn edge_count(&self) -> usize {
        self.undirected.len() + self.directed.len()
    }

    fn is_directed(&self) -> bool {
        !self.directed.is_empty()
    }

    fn undirected_edges(&self) -> Multiset<Edge> {
        self.undirected.clone()
    }

    fn directed_edges(&self) -> Multiset<Edge> {
        self.directed.clone()
    }

    fn edges_at(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        self.check_vertex(vertex)?;
        self.check_orientation(Orientation::Undirected)?;
        Ok(self.select(&self.undirected, |edge| {
            if edge.is_loop() {
                usize::from(edge.start() == vertex) * 2
            } else {
                usize::from(edge.is_incident(vertex))
            }
        }))
    }

    fn edges_from(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        self.check_vertex(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        Ok(self.select(&self.directed, |edge| usize::from(edge.start() == vertex)))
    }

    fn edges_to(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        self.check_vertex(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        Ok(self.select(&self.directed, |edge| usize::from(edge.end() == vertex)))
    }

    fn multiplicity(&self, edge: &Edge) -> usize {
        if edge.is_directed() {
            self.directed.count(edge)
        } else {
            self.undirected.count(edge)
        }
    }

    fn add_vertices(&mut self, new: impl IntoIterator<Item = Vertex>) -> Result<(), GraphError> {
        let new = check_new_vertices(&*self, new)?;
        self.vertices.extend(new);
        Ok(())
    }

    fn remove_vertex(&mut self, vertex: Vertex) -> Result<(), GraphError> {
        self.check_vertex(vertex)?;
        self.undirected.retain(|edge| !edge.is_incident(vertex));
        self.directed.retain(|edge| !edge.is_incident(vertex));
        self.vertices.shift_remove(&vertex);
        debug!("removed vertex {vertex} from edge-set graph");
        Ok(())
    }

    fn add_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.check_edge(&edge, Orientation::Undirected)?;
        self.undirected.insert(edge);
        Ok(())
    }

    fn add_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.check_edge(&edge, Orientation::Directed)?;
        self.directed.insert(edge);
        Ok(())
    }

    fn remove_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.check_edge(&edge, Orientation::Undirected)?;
        if !self.undirected.remove(&edge) {
            return Err(GraphError::EdgeNotInGraph(edge));
        }
        Ok(())
    }

    fn remove_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.check_edge(&edge, Orientation::Directed)?;
        if !self.directed.remove(&edge) {
            return Err(GraphError::EdgeNotInGraph(edge));
        }
        Ok(())
    }

    fn make_undirected(&self) -> Self {
        if !self.is_directed() {
            return self.clone();
        }
        debug!("making {} directed edges undirected", self.directed.len());
        EdgeSetGraph {
            vertices: self.vertices.clone(),
            undirected: self.directed.map(Edge::undirected),
            directed: Multiset::new(),
        }
    }

    fn make_directed(&self) -> Self {
        if self.is_directed() {
            return self.clone();
        }
        debug!("making {} undirected edges directed", self.undirected.len());
        let mut directed = Multiset::new();
        for (edge, count) in self.undirected.iter_counts() {
            let forward = Edge::from(edge.start()).to(edge.end());
            directed.insert_n(forward, count);
            directed.insert_n(forward.reversed(), count);
        }
        EdgeSetGraph {
            vertices: self.vertices.clone(),
            undirected: Multiset::new(),
            directed,
        }
    }

    fn canonical(&self) -> CanonicalGraph {
        CanonicalGraph {
            vertices: self.vertices.clone(),
            undirected: self.undirected.clone(),
            directed: self.directed.clone(),
        }
    }
}
