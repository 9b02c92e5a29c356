//! Eulerian circuits by Hierholzer decomposition.
//!
//! A tour is a closed walk listed without repeating its first vertex:
//! `[a, b, c]` walks `a -> b -> c -> a`. A tour over a graph with edges has
//! one entry per edge, and a start vertex without edges gives `[start]`.

use log::{debug, trace};

use crate::graph::{GraphError, Multigraph};
use crate::vertex::Vertex;

/// Outcome of [`search_eulerian_cycle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CircuitSearch {
    Found(Vec<Vertex>),
    NotEulerian,
}

impl CircuitSearch {
    pub fn into_tour(self) -> Option<Vec<Vertex>> {
        match self {
            CircuitSearch::Found(tour) => Some(tour),
            CircuitSearch::NotEulerian => None,
        }
    }
}

/// Every vertex has even degree, or equal in- and outdegree when directed.
///
/// Loops add two to an undirected degree and one to each directed degree, so
/// they never change the outcome. Connectivity is not checked.
pub fn is_eulerian<G: Multigraph>(graph: &G) -> bool {
    let vertices = graph.vertices();
    if graph.is_directed() {
        vertices.iter().all(|v| {
            matches!(
                (graph.indegree_at(*v), graph.outdegree_at(*v)),
                (Ok(indegree), Ok(outdegree)) if indegree == outdegree
            )
        })
    } else {
        vertices
            .iter()
            .all(|v| graph.degree_at(*v).is_ok_and(|degree| degree % 2 == 0))
    }
}

/// Edges still available at `vertex` for a walk in the given orientation.
fn remaining_at<G: Multigraph>(working: &G, vertex: Vertex, directed: bool) -> usize {
    let degree = if directed {
        working.outdegree_at(vertex)
    } else {
        working.degree_at(vertex)
    };
    degree.unwrap_or(0)
}

/// Walks from `start`, consuming edges of `working`, until the walk is back
/// at `start` or stuck.
fn take_cycle<G: Multigraph>(
    working: &mut G,
    start: Vertex,
    directed: bool,
) -> Result<Vec<Vertex>, GraphError> {
    let mut tour = Vec::new();
    let mut current = start;
    loop {
        let available = if directed {
            working.edges_from(current)?
        } else {
            working.edges_at(current)?
        };
        let Some(&edge) = available.elements().next() else {
            break;
        };
        working.remove_edge(edge)?;
        trace!("walked {edge}");
        tour.push(current);
        current = edge.other_end(current);
        if current == start {
            break;
        }
    }
    if tour.is_empty() {
        tour.push(start);
    }
    Ok(tour)
}

fn check_start<G: Multigraph>(graph: &G, start: Vertex) -> Result<(), GraphError> {
    if !graph.contains_vertex(start) {
        return Err(GraphError::VertexNotInGraph(start));
    }
    if !is_eulerian(graph) {
        return Err(GraphError::GraphNotEulerian);
    }
    Ok(())
}

/// One closed walk from `start`, on a copy of `graph`.
///
/// In an Eulerian graph the walk can only get stuck at `start`, so the result
/// is always a closed tour. It need not use every edge.
pub fn cycle_in_eulerian<G: Multigraph>(
    graph: &G,
    start: Vertex,
) -> Result<Vec<Vertex>, GraphError> {
    check_start(graph, start)?;
    let mut working = graph.clone();
    take_cycle(&mut working, start, graph.is_directed())
}

/// A closed walk from `start` using every edge of `graph` exactly once.
///
/// Sub-cycles are taken from the first tour vertex that still has edges and
/// spliced in with [`merge_tours`]. `graph` itself is left untouched.
///
/// Fails with [`GraphError::EdgesUnreachable`] when some edges cannot be
/// reached from `start`.
pub fn eulerian_cycle<G: Multigraph>(graph: &G, start: Vertex) -> Result<Vec<Vertex>, GraphError> {
    check_start(graph, start)?;
    let directed = graph.is_directed();
    let mut working = graph.clone();
    let mut tour = take_cycle(&mut working, start, directed)?;

    while !working.is_edgeless() {
        let junction = tour
            .iter()
            .copied()
            .find(|v| remaining_at(&working, *v, directed) > 0)
            .ok_or(GraphError::EdgesUnreachable {
                remaining: working.edge_count(),
            })?;
        let sub_tour = take_cycle(&mut working, junction, directed)?;
        debug!(
            "splicing {} more vertices at {junction}, {} edges left",
            sub_tour.len(),
            working.edge_count()
        );
        tour = merge_tours(&tour, &sub_tour, junction)?;
    }
    Ok(tour)
}

/// Like [`eulerian_cycle`], reporting an ineligible graph as
/// [`CircuitSearch::NotEulerian`] instead of an error.
pub fn search_eulerian_cycle<G: Multigraph>(
    graph: &G,
    start: Vertex,
) -> Result<CircuitSearch, GraphError> {
    if !graph.contains_vertex(start) {
        return Err(GraphError::VertexNotInGraph(start));
    }
    if !is_eulerian(graph) {
        return Ok(CircuitSearch::NotEulerian);
    }
    eulerian_cycle(graph, start).map(CircuitSearch::Found)
}

/// Splices `tour2` into `tour1` at the first occurrence of `junction`.
///
/// After `junction`, the result follows `tour2` cyclically from the vertex
/// after its own `junction`, returns to `junction`, then resumes `tour1`.
/// An empty tour leaves the other unchanged.
///
/// No graph is involved, so nothing checks that the tours are walks of the
/// same graph. The caller must make sure both only hold vertices of that
/// graph; the only failure is [`GraphError::JunctionNotInTour`].
pub fn merge_tours(
    tour1: &[Vertex],
    tour2: &[Vertex],
    junction: Vertex,
) -> Result<Vec<Vertex>, GraphError> {
    if tour1.is_empty() {
        return Ok(tour2.to_vec());
    }
    if tour2.is_empty() {
        return Ok(tour1.to_vec());
    }
    let position = |tour: &[Vertex]| {
        tour.iter()
            .position(|v| *v == junction)
            .ok_or(GraphError::JunctionNotInTour(junction))
    };
    let (at1, at2) = (position(tour1)?, position(tour2)?);

    let mut merged = Vec::with_capacity(tour1.len() + tour2.len());
    merged.extend_from_slice(&tour1[..=at1]);
    merged.extend_from_slice(&tour2[at2 + 1..]);
    merged.extend_from_slice(&tour2[..=at2]);
    merged.extend_from_slice(&tour1[at1 + 1..]);
    Ok(merged)
}
