//! # Multigraph
//!
//! Finite multigraphs with parallel edges and loops, where every graph is
//! either undirected or directed as a whole.
//!
//! The same abstract graph can be stored three ways, as explicit edge
//! multisets, as an adjacency-count matrix, or as neighbour lists. All three
//! implement [`Multigraph`], answer every query identically, convert into one
//! another and compare equal when they describe the same graph.
//!
//! On top of that contract the [`algorithms`] module builds Eulerian circuits
//! with Hierholzer's method and checks perfect matchings.
//!
//! Vertices are opaque identities handed out by a [`VertexSource`]; nothing
//! global is involved, so independent sources and graphs never interfere.

pub mod algorithms;
pub mod edge;
pub mod graph;
pub mod multiset;
pub mod typed_vec;
pub mod vertex;

pub use edge::Edge;
pub use graph::{
    AdjacencyGraph, CanonicalGraph, EdgeSetGraph, FromCanonical, GraphBuilder, GraphError,
    MatrixGraph, Multigraph, Orientation,
};
pub use multiset::Multiset;
pub use vertex::{Vertex, VertexSource};
