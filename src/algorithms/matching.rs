use bitvec::vec::BitVec;

use crate::edge::Edge;
use crate::graph::{GraphError, Multigraph};
use crate::multiset::Multiset;

/// Whether `subset` is a perfect matching of `graph`: `|V| / 2` edges, none of
/// them a loop, covering every vertex exactly once.
///
/// A directed edge covers both of its endpoints. Fails with
/// [`GraphError::EdgeNotInGraph`] when `subset` holds an edge more often than
/// `graph` does.
pub fn is_perfect_matching<G: Multigraph>(
    graph: &G,
    subset: &Multiset<Edge>,
) -> Result<bool, GraphError> {
    for (edge, count) in subset.iter_counts() {
        if graph.multiplicity(edge) < count {
            return Err(GraphError::EdgeNotInGraph(*edge));
        }
    }

    let vertices = graph.vertices();
    if vertices.len() % 2 == 1 || subset.len() != vertices.len() / 2 {
        return Ok(false);
    }

    let mut covered: BitVec = BitVec::repeat(false, vertices.len());
    for edge in subset.iter() {
        if edge.is_loop() {
            return Ok(false);
        }
        for end in [edge.start(), edge.end()] {
            let i = vertices
                .get_index_of(&end)
                .ok_or(GraphError::VertexNotInGraph(end))?;
            if covered.replace(i, true) {
                return Ok(false);
            }
        }
    }
    Ok(covered.all())
}
