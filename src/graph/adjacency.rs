use indexmap::IndexSet;
use log::debug;

use super::{
    check_new_vertices, distinct_vertices, CanonicalGraph, FromCanonical, GraphError, Multigraph,
    Orientation, Slot, SlotVec,
};
use crate::edge::Edge;
use crate::multiset::Multiset;
use crate::vertex::Vertex;

/// A multigraph stored as one neighbour multiset per vertex.
///
/// In an undirected graph `adjacency[i]` holds `w` as many times as there
/// are edges `{order[i], w}`, so the lists are symmetric, and a loop is held
/// once, in its own vertex's list. In a directed graph `adjacency[i]` holds
/// the ends of the edges leaving `order[i]`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyGraph {
    order: SlotVec<Vertex>,
    adjacency: SlotVec<Multiset<Vertex>>,
    directed: bool,
}

impl AdjacencyGraph {
    /// Builds a graph from one neighbour multiset per vertex, in the order of
    /// `vertices`.
    pub fn new(
        vertices: impl IntoIterator<Item = Vertex>,
        lists: Vec<Multiset<Vertex>>,
        directed: bool,
    ) -> Result<Self, GraphError> {
        let order = distinct_vertices(vertices)?;
        if order.len() != lists.len() {
            return Err(GraphError::VertexCountMismatch {
                vertices: order.len(),
                dimension: lists.len(),
            });
        }
        for neighbour in lists.iter().flat_map(Multiset::elements) {
            if !order.contains(neighbour) {
                return Err(GraphError::VertexNotInGraph(*neighbour));
            }
        }
        if !directed {
            for (i, list) in lists.iter().enumerate() {
                for (w, count) in list.iter_counts() {
                    let v = order[i];
                    let j = order.get_index_of(w).unwrap_or(i);
                    if lists[j].count(&v) != count {
                        return Err(GraphError::AdjacencyNotSymmetric(v, *w));
                    }
                }
            }
        }
        Ok(AdjacencyGraph {
            order: order.into_iter().collect(),
            adjacency: lists.into(),
            directed,
        })
    }

    /// The vertices in list order.
    pub fn vertex_order(&self) -> &[Vertex] {
        self.order.raw()
    }

    /// The neighbour multiset of `vertex`.
    pub fn neighbours(&self, vertex: Vertex) -> Result<&Multiset<Vertex>, GraphError> {
        Ok(&self.adjacency[self.slot(vertex)?])
    }

    fn slot(&self, vertex: Vertex) -> Result<Slot, GraphError> {
        self.order
            .position(|v| *v == vertex)
            .ok_or(GraphError::VertexNotInGraph(vertex))
    }

    fn check_orientation(&self, expected: Orientation) -> Result<(), GraphError> {
        match self.orientation() {
            Some(found) if found != expected => Err(GraphError::mismatch(expected)),
            _ => Ok(()),
        }
    }

    fn edge_slots(&self, edge: &Edge, expected: Orientation) -> Result<(Slot, Slot), GraphError> {
        if edge.orientation() != expected {
            return Err(GraphError::mismatch(expected));
        }
        self.check_orientation(expected)?;
        Ok((self.slot(edge.start())?, self.slot(edge.end())?))
    }

    fn loops_at(&self, i: Slot) -> usize {
        self.adjacency[i].count(&self.order[i])
    }
}

impl FromCanonical for AdjacencyGraph {
    fn from_canonical(canonical: CanonicalGraph) -> Self {
        let directed = canonical.is_directed();
        let (vertices, undirected, directed_edges) = canonical.into_parts();
        let mut adjacency: SlotVec<Multiset<Vertex>> =
            SlotVec::filled(Multiset::new(), vertices.len());
        for (edge, count) in undirected.iter_counts().chain(directed_edges.iter_counts()) {
            let (Some(i), Some(j)) = (
                vertices.get_index_of(&edge.start()),
                vertices.get_index_of(&edge.end()),
            ) else {
                continue;
            };
            adjacency[Slot(i)].insert_n(edge.end(), count);
            if !edge.is_directed() && i != j {
                adjacency[Slot(j)].insert_n(edge.start(), count);
            }
        }
        AdjacencyGraph {
            order: vertices.into_iter().collect(),
            adjacency,
            directed,
        }
    }
}

impl Multigraph for AdjacencyGraph {
    fn vertices(&self) -> IndexSet<Vertex> {
        self.order.values().copied().collect()
    }

    fn vertex_count(&self) -> usize {
        self.order.len()
    }

    fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.order.values().any(|v| *v == vertex)
    }

    fn edge_count(&self) -> usize {
        let total: usize = self.adjacency.values().map(Multiset::len).sum();
        if self.directed {
            total
        } else {
            let loops: usize = self.order.indices().map(|i| self.loops_at(i)).sum();
            (total + loops) / 2
        }
    }

    fn is_directed(&self) -> bool {
        self.directed && !self.is_edgeless()
    }

    fn undirected_edges(&self) -> Multiset<Edge> {
        let mut edges = Multiset::new();
        if self.directed {
            return edges;
        }
        for (i, list) in &self.adjacency {
            let v = self.order[i];
            for (w, count) in list.iter_counts() {
                // each pair is read from its lower slot; a loop from its own
                match self.order.position(|u| u == w) {
                    Some(j) if j < i => {}
                    Some(j) if j > i => {
                        let count = count.min(self.adjacency[j].count(&v));
                        edges.insert_n(Edge::between(v).and(*w), count);
                    }
                    _ => edges.insert_n(Edge::between(v).and(*w), count),
                }
            }
        }
        edges
    }

    fn directed_edges(&self) -> Multiset<Edge> {
        let mut edges = Multiset::new();
        if !self.directed {
            return edges;
        }
        for (i, list) in &self.adjacency {
            for (w, count) in list.iter_counts() {
                edges.insert_n(Edge::from(self.order[i]).to(*w), count);
            }
        }
        edges
    }

    fn edges_at(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Undirected)?;
        let mut edges = Multiset::new();
        for (w, count) in self.adjacency[i].iter_counts() {
            let ends = if *w == vertex { 2 } else { 1 };
            edges.insert_n(Edge::between(vertex).and(*w), count * ends);
        }
        Ok(edges)
    }

    fn edges_from(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        Ok(self.adjacency[i].map(|w| Edge::from(vertex).to(*w)))
    }

    fn edges_to(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        let mut edges = Multiset::new();
        for (i, list) in &self.adjacency {
            edges.insert_n(Edge::from(self.order[i]).to(vertex), list.count(&vertex));
        }
        Ok(edges)
    }

    fn degree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Undirected)?;
        Ok(self.adjacency[i].len() + self.loops_at(i))
    }

    fn outdegree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        Ok(self.adjacency[i].len())
    }

    fn multiplicity(&self, edge: &Edge) -> usize {
        if self.is_edgeless() || edge.is_directed() != self.directed {
            return 0;
        }
        match self.slot(edge.start()) {
            Ok(i) => self.adjacency[i].count(&edge.end()),
            Err(_) => 0,
        }
    }

    fn add_vertices(&mut self, new: impl IntoIterator<Item = Vertex>) -> Result<(), GraphError> {
        let new = check_new_vertices(&*self, new)?;
        for v in new {
            self.order.push(v);
            self.adjacency.push(Multiset::new());
        }
        Ok(())
    }

    fn remove_vertex(&mut self, vertex: Vertex) -> Result<(), GraphError> {
        let i = self.slot(vertex)?;
        self.order.remove(i);
        self.adjacency.remove(i);
        for (_, list) in self.adjacency.iter_mut() {
            list.remove_all(&vertex);
        }
        debug!("removed vertex {vertex} and its list from adjacency graph");
        Ok(())
    }

    fn add_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, j) = self.edge_slots(&edge, Orientation::Undirected)?;
        self.directed = false;
        self.adjacency[i].insert(edge.end());
        if i != j {
            self.adjacency[j].insert(edge.start());
        }
        Ok(())
    }

    fn add_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, _) = self.edge_slots(&edge, Orientation::Directed)?;
        self.directed = true;
        self.adjacency[i].insert(edge.end());
        Ok(())
    }

    fn remove_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, j) = self.edge_slots(&edge, Orientation::Undirected)?;
        if self.directed || !self.adjacency[i].remove(&edge.end()) {
            return Err(GraphError::EdgeNotInGraph(edge));
        }
        if i != j {
            self.adjacency[j].remove(&edge.start());
        }
        Ok(())
    }

    fn remove_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, _) = self.edge_slots(&edge, Orientation::Directed)?;
        if !self.directed || !self.adjacency[i].remove(&edge.end()) {
            return Err(GraphError::EdgeNotInGraph(edge));
        }
        Ok(())
    }

    fn make_undirected(&self) -> Self {
        if !self.is_directed() {
            return AdjacencyGraph {
                directed: false,
                ..self.clone()
            };
        }
        debug!("folding {} directed edges into lists", self.edge_count());
        let mut adjacency = SlotVec::filled(Multiset::new(), self.order.len());
        for (i, list) in &self.adjacency {
            for (w, count) in list.iter_counts() {
                adjacency[i].insert_n(*w, count);
                if let Some(j) = self.order.position(|u| u == w).filter(|j| *j != i) {
                    adjacency[j].insert_n(self.order[i], count);
                }
            }
        }
        AdjacencyGraph {
            order: self.order.clone(),
            adjacency,
            directed: false,
        }
    }

    fn make_directed(&self) -> Self {
        if self.is_directed() {
            return self.clone();
        }
        debug!("unfolding {} undirected edges", self.edge_count());
        let mut adjacency = self.adjacency.clone();
        for i in self.order.indices() {
            let loops = self.loops_at(i);
            adjacency[i].insert_n(self.order[i], loops);
        }
        AdjacencyGraph {
            order: self.order.clone(),
            adjacency,
            directed: true,
        }
    }
}
