//! Structural guarantees of the graph family.

use crate::init_logging;
use proptest::prelude::*;
use std::collections::HashSet;
use tcgen::*;

/// Number of connected components among nodes `1..=nodes`.
fn components<T>(nodes: usize, edges: &[Edge<T>]) -> usize {
    fn find(parent: &mut [usize], x: usize) -> usize {
        let mut root = x;
        while parent[root] != root {
            root = parent[root];
        }
        parent[x] = root;
        root
    }

    let mut parent: Vec<usize> = (0..=nodes).collect();
    for edge in edges {
        let a = find(&mut parent, edge.u);
        let b = find(&mut parent, edge.v);
        parent[a] = b;
    }
    (1..=nodes).filter(|&x| find(&mut parent, x) == x).count()
}

fn max_degree<T>(nodes: usize, edges: &[Edge<T>]) -> usize {
    let mut degree = vec![0; nodes + 1];
    for edge in edges {
        degree[edge.u] += 1;
        degree[edge.v] += 1;
    }
    degree.into_iter().max().unwrap_or(0)
}

fn edge_count(nodes: usize, extra: usize) -> usize {
    (nodes - 1 + extra).min(nodes * (nodes - 1) / 2)
}

proptest! {
    #[test]
    fn trees_are_trees(seed in any::<u64>(), nodes in 1usize..80) {
        init_logging();
        let mut rng = Random::from_u64(seed);
        let edges = Graph::tree(nodes).unwrap().val(&mut rng).unwrap().to_vec();
        prop_assert_eq!(edges.len(), nodes - 1);
        prop_assert_eq!(components(nodes, &edges), 1);
    }

    #[test]
    fn connected_graphs_are_simple(seed in any::<u64>(), nodes in 2usize..30, extra in 0usize..60) {
        let mut rng = Random::from_u64(seed);
        let edges_wanted = edge_count(nodes, extra);
        let mut graph = Graph::new(nodes, edges_wanted, GraphOptions::default()).unwrap();
        let edges = graph.val(&mut rng).unwrap().to_vec();

        prop_assert_eq!(edges.len(), edges_wanted);
        prop_assert_eq!(components(nodes, &edges), 1);
        prop_assert!(edges.iter().all(|e| e.u != e.v));
        let pairs: HashSet<(usize, usize)> =
            edges.iter().map(|e| (e.u.min(e.v), e.u.max(e.v))).collect();
        prop_assert_eq!(pairs.len(), edges.len());
    }

    #[test]
    fn disconnected_graphs_stay_simple(seed in any::<u64>(), nodes in 2usize..25, fill in 0.0f64..=1.0) {
        let mut rng = Random::from_u64(seed);
        let edges_wanted = (fill * (nodes * (nodes - 1) / 2) as f64) as usize;
        let options = GraphOptions::default().connected(false);
        let mut graph = Graph::new(nodes, edges_wanted, options).unwrap();
        let edges = graph.val(&mut rng).unwrap().to_vec();

        prop_assert_eq!(edges.len(), edges_wanted);
        prop_assert!(edges.iter().all(|e| e.u != e.v));
        prop_assert!(edges.iter().all(|e| (1..=nodes).contains(&e.u) && (1..=nodes).contains(&e.v)));
        let pairs: HashSet<(usize, usize)> =
            edges.iter().map(|e| (e.u.min(e.v), e.u.max(e.v))).collect();
        prop_assert_eq!(pairs.len(), edges.len());
    }

    #[test]
    fn dag_edges_ascend(seed in any::<u64>(), nodes in 2usize..30, extra in 0usize..60) {
        let mut rng = Random::from_u64(seed);
        let mut dag = Graph::dag(nodes, edge_count(nodes, extra)).unwrap();
        prop_assert!(dag.val(&mut rng).unwrap().iter().all(|e| e.u < e.v));
    }

    #[test]
    fn bounded_trees_respect_degree(seed in any::<u64>(), nodes in 3usize..80, bound in 2usize..6) {
        let mut rng = Random::from_u64(seed);
        let edges = Graph::bounded_tree(nodes, bound).unwrap().val(&mut rng).unwrap().to_vec();
        prop_assert_eq!(components(nodes, &edges), 1);
        prop_assert!(max_degree(nodes, &edges) <= bound);
    }

    #[test]
    fn lines_and_stars(seed in any::<u64>(), nodes in 3usize..80) {
        let mut rng = Random::from_u64(seed);
        let line = Graph::line(nodes).unwrap().val(&mut rng).unwrap().to_vec();
        prop_assert_eq!(components(nodes, &line), 1);
        prop_assert_eq!(max_degree(nodes, &line), 2);

        let star = Graph::star(nodes).unwrap().val(&mut rng).unwrap().to_vec();
        prop_assert_eq!(components(nodes, &star), 1);
        prop_assert_eq!(max_degree(nodes, &star), nodes - 1);
    }

    #[test]
    fn loose_graphs_allow_what_they_ask_for(seed in any::<u64>(), nodes in 1usize..10, edges in 0usize..40) {
        let mut rng = Random::from_u64(seed);
        let options = GraphOptions::default()
            .connected(false)
            .duplicate(true)
            .self_edge(true);
        let mut graph = Graph::new(nodes, edges, options).unwrap();
        let generated = graph.val(&mut rng).unwrap();
        prop_assert_eq!(generated.len(), edges);
        prop_assert!(generated.iter().all(|e| (1..=nodes).contains(&e.u) && (1..=nodes).contains(&e.v)));
    }
}

#[test]
fn impossible_graphs_are_rejected() {
    init_logging();
    let defaults = GraphOptions::default();
    assert!(matches!(Graph::new(10, 8, defaults), Err(TcgenError::InvalidArgument { .. })));
    assert!(Graph::new(5, 11, defaults).is_err());
    assert!(Graph::new(5, 4, defaults.dag(true).self_edge(true)).is_err());
    assert!(Graph::new(1, 2, defaults.connected(false).duplicate(true)).is_err());
    assert!(Graph::bounded_tree(10, 1).is_err());
}

#[test]
fn weighted_adjacency_matrix() {
    let mut rng = Random::from_u64(9);
    let mut graph = Graph::tree(8).unwrap().with_weight(Integer::range(1, 9).unwrap());
    let edges = graph.val(&mut rng).unwrap().to_vec();
    let mut matrix = graph.adj_matrix(&mut rng).unwrap();
    let cells = matrix.val(&mut rng).unwrap();
    for edge in &edges {
        let weight = edge.weight.unwrap();
        assert_eq!(cells[edge.u - 1][edge.v - 1], weight);
        assert_eq!(cells[edge.v - 1][edge.u - 1], weight);
    }
    assert_eq!(matrix.render(&mut rng).unwrap().lines().count(), 8);
}
