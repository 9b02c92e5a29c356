use proptest::prelude::*;

use super::builder::{from_adjacency, from_edges, from_matrix};
use super::*;
use crate::vertex::VertexSource;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Three vertices with two parallel edges between the first two, a triangle
/// and a loop on the first vertex, in every input form.
struct Fixture {
    source: VertexSource,
    v: [Vertex; 3],
    undirected1: Multiset<Edge>,
    directed1: Multiset<Edge>,
    directed2: Multiset<Edge>,
    matrix1: Vec<Vec<usize>>,
    matrix2: Vec<Vec<usize>>,
    list1: Vec<Multiset<Vertex>>,
}

impl Fixture {
    fn new() -> Self {
        let source = VertexSource::new();
        let [v1, v2, v3] = [source.fresh(), source.fresh(), source.fresh()];

        let e1u = Edge::between(v1).and(v2);
        let undirected1 = [
            e1u,
            e1u,
            Edge::between(v2).and(v3),
            Edge::between(v3).and(v1),
            Edge::between(v1).and(v1),
        ]
        .into_iter()
        .collect();

        let e1d = Edge::from(v1).to(v2);
        let (e2d, e3d) = (Edge::from(v2).to(v3), Edge::from(v3).to(v1));
        let directed_loop = Edge::from(v1).to(v1);
        let directed1 = [e1d, e1d, e2d, e3d, directed_loop].into_iter().collect();
        let directed2 = [
            e1d,
            e1d,
            e1d.reversed(),
            e1d.reversed(),
            e2d,
            e2d.reversed(),
            e3d,
            e3d.reversed(),
            directed_loop,
            directed_loop,
        ]
        .into_iter()
        .collect();

        let list1 = vec![
            [v1, v2, v2, v3].into_iter().collect(),
            [v1, v1, v3].into_iter().collect(),
            [v1, v2].into_iter().collect(),
        ];

        Fixture {
            source,
            v: [v1, v2, v3],
            undirected1,
            directed1,
            directed2,
            matrix1: vec![vec![1, 2, 1], vec![2, 0, 1], vec![1, 1, 0]],
            matrix2: vec![vec![2, 4, 2], vec![4, 0, 2], vec![2, 2, 0]],
            list1,
        }
    }

    fn undirected<G: FromCanonical>(&self) -> G {
        from_edges(self.v, self.undirected1.clone(), Multiset::new()).unwrap()
    }

    fn directed<G: FromCanonical>(&self, edges: &Multiset<Edge>) -> G {
        from_edges(self.v, Multiset::new(), edges.clone()).unwrap()
    }
}

#[test]
fn three_input_forms_agree() {
    init();
    let f = Fixture::new();

    let by_edges: EdgeSetGraph = f.undirected();
    let by_matrix: MatrixGraph = from_matrix(f.v, f.matrix1.clone(), false).unwrap();
    let by_lists: AdjacencyGraph = from_adjacency(f.v, f.list1.clone(), false).unwrap();

    assert_eq!(by_edges, by_matrix);
    assert_eq!(by_matrix, by_lists);
    assert_eq!(by_lists, by_edges);
    similar_asserts::assert_eq!(by_edges.canonical(), by_lists.canonical());

    let matrix_as_lists: AdjacencyGraph = from_matrix(f.v, f.matrix1.clone(), false).unwrap();
    let lists_as_matrix: MatrixGraph = from_adjacency(f.v, f.list1.clone(), false).unwrap();
    let edges_as_edges: EdgeSetGraph = from_edges(f.v, f.undirected1.clone(), Multiset::new())
        .unwrap();
    assert_eq!(matrix_as_lists, lists_as_matrix);
    assert_eq!(edges_as_edges, by_edges);
    assert_eq!(lists_as_matrix.matrix(), f.matrix1);
}

#[test]
fn equality_sees_vertices_and_orientation() {
    let f = Fixture::new();
    let undirected: MatrixGraph = f.undirected();
    let directed: MatrixGraph = f.directed(&f.directed1);
    assert_ne!(undirected, directed);

    let mut bigger = undirected.to_edge_set();
    bigger.add_vertices([f.source.fresh()]).unwrap();
    assert_ne!(bigger, undirected);

    let mut fewer_edges = undirected.to_adjacency();
    fewer_edges
        .remove_undirected_edge_between(f.v[0], f.v[1])
        .unwrap();
    assert_ne!(fewer_edges, undirected);
}

#[test]
fn display_is_canonical() {
    let source = VertexSource::with_tag(0);
    let vs = source.fresh_many(2);
    let graph: MatrixGraph = from_matrix(vs.clone(), vec![vec![1, 2], vec![2, 0]], false).unwrap();
    insta::assert_snapshot!(
        graph.to_string(),
        @"undirected graph on {v0, v1}: [v0 -- v0, v0 -- v1, v0 -- v1]"
    );
    assert_eq!(graph.to_edge_set().to_string(), graph.to_string());

    let edgeless = EdgeSetGraph::edgeless(vs).unwrap();
    insta::assert_snapshot!(edgeless.to_string(), @"edgeless graph on {v0, v1}: []");
}

#[test]
fn default_graphs_are_empty() {
    let matrix = MatrixGraph::default();
    let lists = AdjacencyGraph::default();
    assert_eq!(matrix.vertex_count(), 0);
    assert!(lists.is_edgeless());
    assert_eq!(lists.orientation(), None);
    assert_eq!(matrix, lists);
    assert_eq!(EdgeSetGraph::default(), matrix);
}

#[duplicate::duplicate_item(
    representation  Graph;
    [edge_set]      [EdgeSetGraph];
    [matrix]        [MatrixGraph];
    [adjacency]     [AdjacencyGraph];
)]
mod representation {
    use super::*;

    #[test]
    fn make_directed_splits_every_edge() {
        init();
        let f = Fixture::new();
        let graph: Graph = f.undirected();

        let directed = graph.make_directed();
        assert!(directed.is_directed());
        assert_eq!(directed.directed_edges(), f.directed2);
        assert!(directed.undirected_edges().is_empty());
        assert_eq!(directed.edge_count(), 2 * graph.edge_count());
        assert_eq!(directed.make_directed(), directed);

        for v in f.v {
            let degree = graph.degree_at(v).unwrap();
            assert_eq!(directed.outdegree_at(v).unwrap(), degree);
            assert_eq!(directed.indegree_at(v).unwrap(), degree);
        }
    }

    #[test]
    fn make_undirected_forgets_direction() {
        let f = Fixture::new();
        let graph: Graph = f.directed(&f.directed1);
        let undirected = graph.make_undirected();
        assert!(!undirected.is_directed());
        assert_eq!(undirected, f.undirected::<EdgeSetGraph>());
        assert_eq!(undirected.make_undirected(), undirected);

        let doubled: Graph = f.directed(&f.directed2);
        let expected: MatrixGraph = from_matrix(f.v, f.matrix2.clone(), false).unwrap();
        assert_eq!(doubled.make_undirected(), expected);
    }

    #[test]
    fn conversions_leave_source_untouched() {
        let f = Fixture::new();
        let graph: Graph = f.undirected();
        let before = graph.canonical();
        let _ = graph.make_directed();
        let _ = graph.to_matrix();
        similar_asserts::assert_eq!(graph.canonical(), before);
    }

    #[test]
    fn loops_count_twice_in_degree() {
        let f = Fixture::new();
        let [v1, v2, v3] = f.v;
        let graph: Graph = f.undirected();

        assert_eq!(graph.degree_at(v1).unwrap(), 5);
        assert_eq!(graph.degree_at(v2).unwrap(), 3);
        assert_eq!(graph.degree_at(v3).unwrap(), 2);

        let at_v1 = graph.edges_at(v1).unwrap();
        assert_eq!(at_v1.count(&Edge::between(v1).and(v1)), 2);
        assert_eq!(at_v1.count(&Edge::between(v2).and(v1)), 2);
        assert_eq!(at_v1.len(), 5);
        assert_eq!(graph.multiplicity(&Edge::between(v1).and(v1)), 1);
        assert_eq!(graph.multiplicity(&Edge::between(v2).and(v1)), 2);
    }

    #[test]
    fn directed_degrees() {
        let f = Fixture::new();
        let [v1, v2, v3] = f.v;
        let graph: Graph = f.directed(&f.directed1);

        assert_eq!(graph.outdegree_at(v1).unwrap(), 3);
        assert_eq!(graph.indegree_at(v1).unwrap(), 2);
        assert_eq!(graph.outdegree_at(v2).unwrap(), 1);
        assert_eq!(graph.indegree_at(v2).unwrap(), 2);
        assert_eq!(graph.indegree_at(v3).unwrap(), 1);

        let from_v1 = graph.edges_from(v1).unwrap();
        assert_eq!(from_v1.count(&Edge::from(v1).to(v1)), 1);
        assert_eq!(from_v1.count(&Edge::from(v1).to(v2)), 2);
        let to_v1 = graph.edges_to(v1).unwrap();
        assert_eq!(to_v1.count(&Edge::from(v3).to(v1)), 1);
        assert_eq!(graph.multiplicity(&Edge::from(v2).to(v1)), 0);
    }

    #[test]
    fn wrong_orientation_is_rejected() {
        let f = Fixture::new();
        let [v1, v2, _] = f.v;
        let mut undirected: Graph = f.undirected();
        let mut directed: Graph = f.directed(&f.directed1);

        let expected_directed = GraphError::OrientationMismatch {
            expected: Orientation::Directed,
            found: Orientation::Undirected,
        };
        let expected_undirected = GraphError::OrientationMismatch {
            expected: Orientation::Undirected,
            found: Orientation::Directed,
        };

        assert_eq!(undirected.edges_from(v1).unwrap_err(), expected_directed);
        assert_eq!(undirected.indegree_at(v1).unwrap_err(), expected_directed);
        assert_eq!(
            undirected.add_directed_edge_from(v1, v2).unwrap_err(),
            expected_directed
        );
        assert_eq!(directed.edges_at(v1).unwrap_err(), expected_undirected);
        assert_eq!(
            directed.add_undirected_edge_between(v1, v2).unwrap_err(),
            expected_undirected
        );
        assert_eq!(
            directed
                .add_undirected_edge(Edge::from(v1).to(v2))
                .unwrap_err(),
            expected_undirected
        );

        assert!(undirected.directed_edges().is_empty());
        assert!(directed.undirected_edges().is_empty());
        assert_eq!(undirected.edge_count(), 5);
        assert_eq!(directed.edge_count(), 5);
    }

    #[test]
    fn membership_errors() {
        let f = Fixture::new();
        let [v1, v2, v3] = f.v;
        let stranger = f.source.fresh();
        let mut graph: Graph = f.directed(&f.directed1);

        assert_eq!(
            graph.outdegree_at(stranger).unwrap_err(),
            GraphError::VertexNotInGraph(stranger)
        );
        assert_eq!(
            graph.add_directed_edge_from(v1, stranger).unwrap_err(),
            GraphError::VertexNotInGraph(stranger)
        );
        assert_eq!(
            graph.remove_directed_edge_from(v3, v2).unwrap_err(),
            GraphError::EdgeNotInGraph(Edge::from(v3).to(v2))
        );
        assert_eq!(
            graph.remove_vertex(stranger).unwrap_err(),
            GraphError::VertexNotInGraph(stranger)
        );
        assert_eq!(
            graph.add_vertices([stranger, v2]).unwrap_err(),
            GraphError::VertexAlreadyInGraph(v2)
        );
        assert_eq!(graph.vertex_count(), 3);
        assert!(!graph.contains_vertex(stranger));
        assert_eq!(graph, f.directed::<EdgeSetGraph>(&f.directed1));
    }

    #[test]
    fn edgeless_graph_takes_either_orientation() {
        let f = Fixture::new();
        let [v1, v2, _] = f.v;
        let mut graph: Graph = from_edges(f.v, Multiset::new(), Multiset::new()).unwrap();
        assert_eq!(graph.orientation(), None);
        assert!(graph.edges_at(v1).unwrap().is_empty());
        assert!(graph.edges_from(v1).unwrap().is_empty());

        graph.add_directed_edge_from(v1, v2).unwrap();
        assert_eq!(graph.orientation(), Some(Orientation::Directed));
        graph.remove_directed_edge_from(v1, v2).unwrap();
        assert!(graph.is_edgeless());

        graph.add_edge(Edge::between(v2).and(v1)).unwrap();
        assert_eq!(graph.orientation(), Some(Orientation::Undirected));
        graph.remove_edge(Edge::between(v1).and(v2)).unwrap();
        assert_eq!(graph.orientation(), None);
    }

    #[test]
    fn removing_a_vertex_drops_its_edges() {
        let f = Fixture::new();
        let [v1, v2, v3] = f.v;
        let mut graph: Graph = f.undirected();
        graph.remove_vertex(v1).unwrap();

        let expected: EdgeSetGraph = from_edges(
            [v2, v3],
            [Edge::between(v3).and(v2)].into_iter().collect(),
            Multiset::new(),
        )
        .unwrap();
        assert_eq!(graph, expected);
        assert_eq!(graph.degree_at(v2).unwrap(), 1);
    }

    #[test]
    fn added_vertices_accept_edges() {
        let f = Fixture::new();
        let mut graph: Graph = f.directed(&f.directed1);
        let [a, b] = [f.source.fresh(), f.source.fresh()];
        graph.add_vertices([a, b]).unwrap();
        graph.add_directed_edge_from(a, b).unwrap();
        graph.add_directed_edge_from(b, f.v[0]).unwrap();

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 7);
        assert_eq!(graph.indegree_at(f.v[0]).unwrap(), 3);
        assert_eq!(graph.edges_to(b).unwrap().count(&Edge::from(a).to(b)), 1);
    }

    #[test]
    fn parallel_edges_are_removed_one_at_a_time() {
        let f = Fixture::new();
        let [v1, v2, _] = f.v;
        let mut graph: Graph = f.undirected();
        graph.remove_undirected_edge_between(v2, v1).unwrap();
        assert_eq!(graph.multiplicity(&Edge::between(v1).and(v2)), 1);
        graph.remove_undirected_edge_between(v1, v2).unwrap();
        assert_eq!(
            graph.remove_undirected_edge_between(v1, v2).unwrap_err(),
            GraphError::EdgeNotInGraph(Edge::between(v1).and(v2))
        );
        assert_eq!(graph.edge_count(), 3);
    }
}

/// A random graph on `n` vertices given as index pairs, with the counts
/// matrix and the neighbour lists that describe the same graph.
#[derive(Debug, Clone)]
struct RandomGraph {
    vertices: Vec<Vertex>,
    edges: Multiset<Edge>,
    matrix: Vec<Vec<usize>>,
    lists: Vec<Multiset<Vertex>>,
    directed: bool,
}

fn random_graph() -> impl Strategy<Value = RandomGraph> {
    (1usize..6)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n, 0..n), 0..12),
                any::<bool>(),
            )
        })
        .prop_map(|(n, pairs, directed)| {
            let vertices = VertexSource::with_tag(7).fresh_many(n);
            let mut edges = Multiset::new();
            let mut matrix = vec![vec![0; n]; n];
            let mut lists = vec![Multiset::new(); n];
            for (i, j) in pairs {
                edges.insert(Edge::new(vertices[i], vertices[j], directed));
                matrix[i][j] += 1;
                lists[i].insert(vertices[j]);
                if !directed && i != j {
                    matrix[j][i] += 1;
                    lists[j].insert(vertices[i]);
                }
            }
            RandomGraph {
                vertices,
                edges,
                matrix,
                lists,
                directed,
            }
        })
}

impl RandomGraph {
    fn by_edges<G: FromCanonical>(&self) -> G {
        let (undirected, directed) = if self.directed {
            (Multiset::new(), self.edges.clone())
        } else {
            (self.edges.clone(), Multiset::new())
        };
        from_edges(self.vertices.clone(), undirected, directed).unwrap()
    }
}

proptest! {
    #[test]
    fn input_forms_are_equivalent(g in random_graph()) {
        let by_edges: EdgeSetGraph = g.by_edges();
        let by_matrix: MatrixGraph =
            from_matrix(g.vertices.clone(), g.matrix.clone(), g.directed).unwrap();
        let by_lists: AdjacencyGraph =
            from_adjacency(g.vertices.clone(), g.lists.clone(), g.directed).unwrap();

        prop_assert_eq!(&by_edges, &by_matrix);
        prop_assert_eq!(&by_matrix, &by_lists);
        prop_assert_eq!(&by_lists.to_edge_set(), &by_edges);
        prop_assert_eq!(by_matrix.edge_count(), g.edges.len());
        prop_assert_eq!(by_lists.edge_count(), g.edges.len());
    }

    #[test]
    fn orientation_is_exclusive(g in random_graph()) {
        let graphs = (g.by_edges::<EdgeSetGraph>(), g.by_edges::<MatrixGraph>(), g.by_edges::<AdjacencyGraph>());
        for (directed, undirected, is_directed) in [
            (graphs.0.directed_edges(), graphs.0.undirected_edges(), graphs.0.is_directed()),
            (graphs.1.directed_edges(), graphs.1.undirected_edges(), graphs.1.is_directed()),
            (graphs.2.directed_edges(), graphs.2.undirected_edges(), graphs.2.is_directed()),
        ] {
            prop_assert_eq!(is_directed, !directed.is_empty());
            prop_assert!(directed.is_empty() || undirected.is_empty());
            prop_assert_eq!(is_directed, g.directed && !g.edges.is_empty());
        }
    }

    #[test]
    fn degrees_sum_to_edge_ends(g in random_graph()) {
        let graphs = (g.by_edges::<EdgeSetGraph>(), g.by_edges::<MatrixGraph>(), g.by_edges::<AdjacencyGraph>());
        let edges = g.edges.len();
        if g.directed && edges > 0 {
            for v in &g.vertices {
                let out = graphs.0.outdegree_at(*v).unwrap();
                prop_assert_eq!(graphs.1.outdegree_at(*v).unwrap(), out);
                prop_assert_eq!(graphs.2.outdegree_at(*v).unwrap(), out);
            }
            let outs: usize = g.vertices.iter().map(|v| graphs.2.outdegree_at(*v).unwrap()).sum();
            let ins: usize = g.vertices.iter().map(|v| graphs.1.indegree_at(*v).unwrap()).sum();
            prop_assert_eq!(outs, edges);
            prop_assert_eq!(ins, edges);
        } else {
            for v in &g.vertices {
                let degree = graphs.0.degree_at(*v).unwrap();
                prop_assert_eq!(graphs.1.degree_at(*v).unwrap(), degree);
                prop_assert_eq!(graphs.2.degree_at(*v).unwrap(), degree);
                prop_assert_eq!(graphs.2.edges_at(*v).unwrap().len(), degree);
            }
            let total: usize = g.vertices.iter().map(|v| graphs.1.degree_at(*v).unwrap()).sum();
            prop_assert_eq!(total, 2 * edges);
        }
    }

    #[test]
    fn conversions_agree_across_representations(g in random_graph()) {
        let by_edges: EdgeSetGraph = g.by_edges();
        let by_matrix: MatrixGraph = g.by_edges();
        let by_lists: AdjacencyGraph = g.by_edges();

        let directed = by_edges.make_directed();
        prop_assert_eq!(&by_matrix.make_directed(), &directed);
        prop_assert_eq!(&by_lists.make_directed(), &directed);

        let undirected = by_edges.make_undirected();
        prop_assert_eq!(&by_matrix.make_undirected(), &undirected);
        prop_assert_eq!(&by_lists.make_undirected(), &undirected);

        if g.directed {
            prop_assert_eq!(undirected.edge_count(), g.edges.len());
        } else {
            prop_assert_eq!(directed.edge_count(), 2 * g.edges.len());
        }
    }
}
