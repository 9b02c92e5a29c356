//! # Algorithms on multigraphs
//!
//! Everything here is generic over [`Multigraph`](crate::graph::Multigraph),
//! so it runs unchanged on every representation.
//!
//! - [`eulerian`]: eligibility test and Hierholzer construction of Eulerian
//!   circuits, with the tour splicing they rely on.
//! - [`matching`]: verification of perfect matchings.
//!
//! Connectivity is never computed. Callers asking for a circuit are expected
//! to pass a graph whose edges are reachable from the start vertex.

pub mod eulerian;
pub mod matching;

pub use eulerian::{
    cycle_in_eulerian, eulerian_cycle, is_eulerian, merge_tours, search_eulerian_cycle,
    CircuitSearch,
};
pub use matching::is_perfect_matching;
