//! Invariants every partitioning algorithm must uphold: groups disjointly
//! cover the vertex set, sizes differ by at most one, and the group count
//! matches the request.

use graphcut::algorithms::{self, Partitioner};
use graphcut::{generator, metrics, Graph, Partition};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut a = Array2::<f64>::zeros((n, n));
    for &(i, j) in edges {
        a[(i, j)] = 1.0;
        a[(j, i)] = 1.0;
    }
    Graph::new(a).unwrap()
}

fn unit_weighted(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut a = Array2::<f64>::zeros((n, n));
    for &(i, j) in edges {
        a[(i, j)] = 1.0;
        a[(j, i)] = 1.0;
    }
    Graph::with_weights(a.clone(), a).unwrap()
}

fn cycle(n: usize) -> Vec<(usize, usize)> {
    (0..n).map(|i| (i, (i + 1) % n)).collect()
}

fn assert_invariants(partition: &Partition, n: usize, k: usize) {
    partition.validate(n).unwrap();
    assert_eq!(partition.k(), k);
}

#[test]
fn unweighted_algorithms_on_a_cycle() {
    let graph = graph_from_edges(8, &cycle(8));
    for (name, k) in [
        ("spectral", 2),
        ("kernighan-lin", 2),
        ("kernighan-lin", 4),
        ("greedy", 2),
        ("greedy", 3),
        ("brute-force", 2),
        ("brute-force", 4),
    ] {
        let mut algorithm = algorithms::create(name, Some(17)).unwrap();
        let partition = algorithm.partition(&graph, k).unwrap();
        assert_invariants(&partition, 8, k);
    }
}

#[test]
fn weighted_algorithms_on_a_random_graph() {
    let mut rng = StdRng::seed_from_u64(23);
    let a = generator::random_adjacency(9, 3, &mut rng).unwrap();
    let w = generator::random_weights(&a, 1.0, 4.0, &mut rng).unwrap();
    let graph = Graph::with_weights(a, w).unwrap();

    for (name, k) in [
        ("geometric", 2),
        ("geometric", 4),
        ("brute-force-weighted", 2),
    ] {
        let mut algorithm = algorithms::create(name, Some(29)).unwrap();
        let partition = algorithm.partition(&graph, k).unwrap();
        assert_invariants(&partition, 9, k);
    }
}

#[test]
fn inertial_splits_a_weighted_path() {
    // The Fiedler vector of a path is monotone along it, so the upper-median
    // split is contiguous and balanced.
    let graph = unit_weighted(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let mut algorithm = algorithms::create("inertial", None).unwrap();
    let partition = algorithm.partition(&graph, 2).unwrap();
    assert_invariants(&partition, 5, 2);
    assert_eq!(metrics::cut_edges(&graph, &partition), 1);
}

#[test]
fn geometric_is_reproducible_under_a_fixed_seed() {
    let graph = unit_weighted(10, &cycle(10));
    let first = algorithms::create("geometric", Some(99))
        .unwrap()
        .partition(&graph, 4)
        .unwrap();
    let second = algorithms::create("geometric", Some(99))
        .unwrap()
        .partition(&graph, 4)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn kernighan_lin_finds_the_cycle_optimum() {
    // Every balanced bisection of a 6-cycle that is not optimal admits an
    // improving swap, so local search lands on the cut-2 optimum regardless
    // of the random start.
    let graph = graph_from_edges(6, &cycle(6));
    for seed in 0..10 {
        let partition = algorithms::create("kernighan-lin", Some(seed))
            .unwrap()
            .partition(&graph, 2)
            .unwrap();
        assert_eq!(metrics::cut_edges(&graph, &partition), 2);
    }
}

#[test]
fn single_vertex_single_group() {
    let graph = graph_from_edges(1, &[]);
    for name in ["greedy", "brute-force"] {
        let partition = algorithms::create(name, None)
            .unwrap()
            .partition(&graph, 1)
            .unwrap();
        assert_eq!(partition.groups(), &[vec![0]]);
    }
}

#[test]
fn k_equal_n_yields_singletons() {
    let graph = graph_from_edges(4, &cycle(4));
    let partition = algorithms::create("brute-force", None)
        .unwrap()
        .partition(&graph, 4)
        .unwrap();
    assert_invariants(&partition, 4, 4);
    for group in partition.groups() {
        assert_eq!(group.len(), 1);
    }
    // With every vertex alone, every edge is cut.
    assert_eq!(metrics::cut_edges(&graph, &partition), graph.edge_count());
}

#[test]
fn empty_graph_has_zero_cut() {
    let graph = graph_from_edges(4, &[]);
    let partition = algorithms::create("greedy", None)
        .unwrap()
        .partition(&graph, 2)
        .unwrap();
    assert_invariants(&partition, 4, 2);
    assert_eq!(metrics::cut_edges(&graph, &partition), 0);
}

#[test]
fn complete_graph_optimum_is_quarter_n_squared() {
    // K_n with even n and k = 2: the optimal cut is n^2/4.
    let n = 4;
    let edges: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();
    let graph = graph_from_edges(n, &edges);
    let partition = algorithms::create("brute-force", None)
        .unwrap()
        .partition(&graph, 2)
        .unwrap();
    assert_eq!(metrics::cut_edges(&graph, &partition), n * n / 4);
}

#[test]
fn brute_force_is_optimal_among_balanced_partitions() {
    // Exhaustively cross-check the brute-force optimum on a small graph
    // against every balanced bisection.
    let graph = graph_from_edges(6, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 5), (3, 5)]);
    let best = algorithms::create("brute-force", None)
        .unwrap()
        .partition(&graph, 2)
        .unwrap();
    let best_cut = metrics::cut_edges(&graph, &best);

    for mask in 0u32..(1 << 6) {
        if mask.count_ones() != 3 {
            continue;
        }
        let groups: Vec<Vec<usize>> = vec![
            (0..6).filter(|v| mask & (1 << v) != 0).collect(),
            (0..6).filter(|v| mask & (1 << v) == 0).collect(),
        ];
        let candidate = Partition::new(groups);
        assert!(metrics::cut_edges(&graph, &candidate) >= best_cut);
    }
    assert_eq!(best_cut, 1);
}

#[test]
fn out_of_range_k_is_rejected_everywhere() {
    let graph = graph_from_edges(4, &cycle(4));
    for name in algorithms::names() {
        let mut algorithm = algorithms::create(name, Some(1)).unwrap();
        assert!(algorithm.partition(&graph, 0).is_err(), "{name} accepted k = 0");
        assert!(algorithm.partition(&graph, 5).is_err(), "{name} accepted k > n");
    }
}
