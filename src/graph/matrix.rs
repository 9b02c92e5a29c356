use indexmap::IndexSet;
use log::debug;

use super::{
    check_new_vertices, distinct_vertices, CanonicalGraph, FromCanonical, GraphError, Multigraph,
    Orientation, Slot, SlotVec,
};
use crate::edge::Edge;
use crate::multiset::Multiset;
use crate::vertex::Vertex;

/// A multigraph stored as an adjacency-count matrix.
///
/// Row and column `i` belong to `order[i]`. In an undirected graph the matrix
/// is symmetric and the diagonal holds loop counts; in a directed graph
/// `matrix[i][j]` counts the edges `order[i] -> order[j]`.
///
/// `directed` records how the entries are read. It only becomes observable
/// through [`Multigraph::is_directed`] once the graph has an edge.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixGraph {
    order: SlotVec<Vertex>,
    matrix: SlotVec<SlotVec<usize>>,
    directed: bool,
}

impl MatrixGraph {
    /// Builds a graph from a square matrix whose rows follow `vertices`.
    ///
    /// The matrix must be square with one row per vertex, and symmetric when
    /// `directed` is false.
    pub fn new(
        vertices: impl IntoIterator<Item = Vertex>,
        matrix: Vec<Vec<usize>>,
        directed: bool,
    ) -> Result<Self, GraphError> {
        let order = distinct_vertices(vertices)?;
        let n = matrix.len();
        if order.len() != n {
            return Err(GraphError::VertexCountMismatch {
                vertices: order.len(),
                dimension: n,
            });
        }
        check_square(&matrix)?;
        if !directed {
            check_symmetric(&matrix)?;
        }
        Ok(MatrixGraph {
            order: order.into_iter().collect(),
            matrix: matrix.into_iter().map(SlotVec::from).collect(),
            directed,
        })
    }

    /// The vertices in row order.
    pub fn vertex_order(&self) -> &[Vertex] {
        self.order.raw()
    }

    /// A copy of the count matrix, rows in [`MatrixGraph::vertex_order`].
    pub fn matrix(&self) -> Vec<Vec<usize>> {
        self.matrix
            .values()
            .map(|row| row.raw().to_vec())
            .collect()
    }

    /// The entry for `(start, end)`, whatever the orientation.
    pub fn entry(&self, start: Vertex, end: Vertex) -> Result<usize, GraphError> {
        Ok(self.matrix[self.slot(start)?][self.slot(end)?])
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

    /// Slots of the endpoints of `edge`, once it is known to suit this graph.
    fn edge_slots(&self, edge: &Edge, expected: Orientation) -> Result<(Slot, Slot), GraphError> {
        if edge.orientation() != expected {
            return Err(GraphError::mismatch(expected));
        }
        self.check_orientation(expected)?;
        Ok((self.slot(edge.start())?, self.slot(edge.end())?))
    }

    fn row_sum(&self, i: Slot) -> usize {
        self.matrix[i].values().sum()
    }

    fn column_sum(&self, j: Slot) -> usize {
        self.matrix.values().map(|row| row[j]).sum()
    }

    fn zeroed(n: usize) -> SlotVec<SlotVec<usize>> {
        SlotVec::filled(SlotVec::filled(0, n), n)
    }
}

fn check_square(matrix: &[Vec<usize>]) -> Result<(), GraphError> {
    let n = matrix.len();
    match matrix.iter().position(|row| row.len() != n) {
        Some(row) => Err(GraphError::MatrixNotSquare {
            row,
            len: matrix[row].len(),
            expected: n,
        }),
        None => Ok(()),
    }
}

fn check_symmetric(matrix: &[Vec<usize>]) -> Result<(), GraphError> {
    for (row, entries) in matrix.iter().enumerate() {
        for (column, entry) in entries.iter().enumerate().skip(row + 1) {
            if *entry != matrix[column][row] {
                return Err(GraphError::MatrixNotSymmetric { row, column });
            }
        }
    }
    Ok(())
}

impl FromCanonical for MatrixGraph {
    fn from_canonical(canonical: CanonicalGraph) -> Self {
        let directed = canonical.is_directed();
        let (vertices, undirected, directed_edges) = canonical.into_parts();
        let mut matrix = Self::zeroed(vertices.len());
        for (edge, count) in undirected.iter_counts().chain(directed_edges.iter_counts()) {
            let (Some(i), Some(j)) = (
                vertices.get_index_of(&edge.start()),
                vertices.get_index_of(&edge.end()),
            ) else {
                continue;
            };
            let (i, j) = (Slot(i), Slot(j));
            matrix[i][j] += count;
            if !edge.is_directed() && i != j {
                matrix[j][i] += count;
            }
        }
        MatrixGraph {
            order: vertices.into_iter().collect(),
            matrix,
            directed,
        }
    }
}

impl Multigraph for MatrixGraph {
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
        if self.directed {
            self.matrix.values().map(|row| row.values().sum::<usize>()).sum()
        } else {
            self.matrix
                .iter()
                .map(|(i, row)| row.raw()[i.0..].iter().sum::<usize>())
                .sum()
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
        for (i, row) in &self.matrix {
            for (j, count) in row.iter().skip(i.0) {
                edges.insert_n(Edge::between(self.order[i]).and(self.order[j]), *count);
            }
        }
        edges
    }

    fn directed_edges(&self) -> Multiset<Edge> {
        let mut edges = Multiset::new();
        if !self.directed {
            return edges;
        }
        for (i, row) in &self.matrix {
            for (j, count) in row {
                edges.insert_n(Edge::from(self.order[i]).to(self.order[j]), *count);
            }
        }
        edges
    }

    fn edges_at(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Undirected)?;
        let mut edges = Multiset::new();
        for (j, count) in &self.matrix[i] {
            let ends = if i == j { 2 } else { 1 };
            edges.insert_n(Edge::between(vertex).and(self.order[j]), count * ends);
        }
        Ok(edges)
    }

    fn edges_from(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        let mut edges = Multiset::new();
        for (j, count) in &self.matrix[i] {
            edges.insert_n(Edge::from(vertex).to(self.order[j]), *count);
        }
        Ok(edges)
    }

    fn edges_to(&self, vertex: Vertex) -> Result<Multiset<Edge>, GraphError> {
        let j = self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        let mut edges = Multiset::new();
        for (i, row) in &self.matrix {
            edges.insert_n(Edge::from(self.order[i]).to(vertex), row[j]);
        }
        Ok(edges)
    }

    fn degree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Undirected)?;
        Ok(self.row_sum(i) + self.matrix[i][i])
    }

    fn outdegree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        let i = self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        Ok(self.row_sum(i))
    }

    fn indegree_at(&self, vertex: Vertex) -> Result<usize, GraphError> {
        let j = self.slot(vertex)?;
        self.check_orientation(Orientation::Directed)?;
        Ok(self.column_sum(j))
    }

    fn multiplicity(&self, edge: &Edge) -> usize {
        if self.is_edgeless() || edge.is_directed() != self.directed {
            return 0;
        }
        match (self.slot(edge.start()), self.slot(edge.end())) {
            (Ok(i), Ok(j)) => self.matrix[i][j],
            _ => 0,
        }
    }

    fn add_vertices(&mut self, new: impl IntoIterator<Item = Vertex>) -> Result<(), GraphError> {
        let new = check_new_vertices(&*self, new)?;
        let n = self.order.len() + new.len();
        for (_, row) in self.matrix.iter_mut() {
            row.extend(itertools::repeat_n(0, new.len()));
        }
        for v in new {
            self.order.push(v);
            self.matrix.push(SlotVec::filled(0, n));
        }
        Ok(())
    }

    fn remove_vertex(&mut self, vertex: Vertex) -> Result<(), GraphError> {
        let i = self.slot(vertex)?;
        self.order.remove(i);
        self.matrix.remove(i);
        for (_, row) in self.matrix.iter_mut() {
            row.remove(i);
        }
        debug!("removed vertex {vertex} and row {} from matrix graph", i.0);
        Ok(())
    }

    fn add_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, j) = self.edge_slots(&edge, Orientation::Undirected)?;
        self.directed = false;
        self.matrix[i][j] += 1;
        if i != j {
            self.matrix[j][i] += 1;
        }
        Ok(())
    }

    fn add_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, j) = self.edge_slots(&edge, Orientation::Directed)?;
        self.directed = true;
        self.matrix[i][j] += 1;
        Ok(())
    }

    fn remove_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, j) = self.edge_slots(&edge, Orientation::Undirected)?;
        if self.directed || self.matrix[i][j] == 0 {
            return Err(GraphError::EdgeNotInGraph(edge));
        }
        self.matrix[i][j] -= 1;
        if i != j {
            self.matrix[j][i] -= 1;
        }
        Ok(())
    }

    fn remove_directed_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let (i, j) = self.edge_slots(&edge, Orientation::Directed)?;
        if !self.directed || self.matrix[i][j] == 0 {
            return Err(GraphError::EdgeNotInGraph(edge));
        }
        self.matrix[i][j] -= 1;
        Ok(())
    }

    fn make_undirected(&self) -> Self {
        if !self.is_directed() {
            return MatrixGraph {
                directed: false,
                ..self.clone()
            };
        }
        debug!("folding directed matrix of {} vertices", self.order.len());
        let mut matrix = self.matrix.clone();
        for i in self.matrix.indices() {
            for j in self.matrix.indices() {
                if i != j {
                    matrix[i][j] = self.matrix[i][j] + self.matrix[j][i];
                }
            }
        }
        MatrixGraph {
            order: self.order.clone(),
            matrix,
            directed: false,
        }
    }

    fn make_directed(&self) -> Self {
        if self.is_directed() {
            return self.clone();
        }
        debug!("unfolding undirected matrix of {} vertices", self.order.len());
        let mut matrix = self.matrix.clone();
        for i in self.matrix.indices() {
            matrix[i][i] *= 2;
        }
        MatrixGraph {
            order: self.order.clone(),
            matrix,
            directed: true,
        }
    }
}
