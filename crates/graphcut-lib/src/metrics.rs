//! Cut metrics over a partition.

use crate::model::{Graph, Partition};

/// Number of edges whose endpoints lie in different groups.
pub fn cut_edges(graph: &Graph, partition: &Partition) -> usize {
    let assignment = partition.assignments(graph.vertex_count());
    graph
        .edges()
        .into_iter()
        .filter(|&(i, j)| assignment[i] != assignment[j])
        .count()
}

/// Total weight of edges whose endpoints lie in different groups.
///
/// Falls back to the adjacency entries (1 per edge) when the graph carries no
/// weights matrix, so the value then equals [`cut_edges`].
pub fn cut_weight(graph: &Graph, partition: &Partition) -> f64 {
    let assignment = partition.assignments(graph.vertex_count());
    graph
        .edges()
        .into_iter()
        .filter(|&(i, j)| assignment[i] != assignment[j])
        .map(|(i, j)| graph.weight(i, j))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn four_cycle() -> Graph {
        let a = array![
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0]
        ];
        Graph::new(a).unwrap()
    }

    #[test]
    fn cycle_cuts() {
        let g = four_cycle();
        let contiguous = Partition::new(vec![vec![0, 1], vec![2, 3]]);
        let alternating = Partition::new(vec![vec![0, 2], vec![1, 3]]);
        assert_eq!(cut_edges(&g, &contiguous), 2);
        assert_eq!(cut_edges(&g, &alternating), 4);
    }

    #[test]
    fn weighted_cut_uses_weights() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let w = array![[0.0, 2.5], [2.5, 0.0]];
        let g = Graph::with_weights(a, w).unwrap();
        let p = Partition::new(vec![vec![0], vec![1]]);
        assert_eq!(cut_edges(&g, &p), 1);
        assert!((cut_weight(&g, &p) - 2.5).abs() < 1e-12);
    }
}
