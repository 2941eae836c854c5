//! Random graph generator used for test and benchmark input.
//!
//! The RNG is injected by the caller; nothing here touches process-global
//! random state. Seed handling lives in [`crate::utils::rng`].

use ndarray::Array2;
use rand::Rng;

use crate::error::PartitionError;

/// Generate a random symmetric 0/1 adjacency matrix.
///
/// For each vertex in turn a target degree is drawn uniformly from
/// `[1, max_edges_per_vertex]` (lower bound 2 when an earlier degree-1 vertex
/// chose this vertex as its sole neighbor, to avoid dangling leaf chains),
/// then edges are added to distinct random partners respecting both
/// endpoints' degree caps. A vertex keeps a smaller degree when no eligible
/// partner remains.
///
/// # Errors
///
/// `InvalidInput` for `n == 0` or `max_edges_per_vertex == 0`.
pub fn random_adjacency<R: Rng>(
    n: usize,
    max_edges_per_vertex: usize,
    rng: &mut R,
) -> Result<Array2<f64>, PartitionError> {
    if n == 0 {
        return Err(PartitionError::InvalidInput(
            "vertex count must be positive".to_string(),
        ));
    }
    if max_edges_per_vertex == 0 {
        return Err(PartitionError::InvalidInput(
            "max edges per vertex must be positive".to_string(),
        ));
    }

    let mut adjacency = Array2::<f64>::zeros((n, n));
    if n == 1 {
        return Ok(adjacency);
    }

    let m_max = max_edges_per_vertex.min(n - 1);
    let mut degree = vec![0usize; n];
    // Per-vertex degree cap: the drawn target once a vertex has been
    // processed, the global maximum before that.
    let mut cap = vec![m_max; n];
    let mut needs_two = vec![false; n];

    for i in 0..n {
        let lo = if needs_two[i] { 2.min(m_max) } else { 1 };
        let target = rng.gen_range(lo..=m_max).max(degree[i]);
        cap[i] = target;

        let mut attempts = 0;
        let max_attempts = 10 * n;
        while degree[i] < cap[i] && attempts < max_attempts {
            attempts += 1;
            let j = rng.gen_range(0..n);
            if j == i || adjacency[(i, j)] > 0.0 || degree[j] >= cap[j] {
                continue;
            }
            adjacency[(i, j)] = 1.0;
            adjacency[(j, i)] = 1.0;
            degree[i] += 1;
            degree[j] += 1;
        }

        if cap[i] == 1 && degree[i] == 1 {
            // i is a leaf: its sole neighbor must not also end up degree-1.
            if let Some(j) = (0..n).find(|&j| adjacency[(i, j)] > 0.0) {
                needs_two[j] = true;
            }
        }
    }

    Ok(adjacency)
}

/// Generate a weights matrix over the support of an existing adjacency.
///
/// Each edge receives `min_weight + 0.5 * round(r * (max_weight - min_weight) / 0.5)`
/// with `r` uniform in `[0, 1)`, so weights fall on half-unit steps within
/// `[min_weight, max_weight]`.
///
/// # Errors
///
/// `InvalidInput` for a non-square adjacency, non-positive `min_weight` or
/// `max_weight < min_weight`.
pub fn random_weights<R: Rng>(
    adjacency: &Array2<f64>,
    min_weight: f64,
    max_weight: f64,
    rng: &mut R,
) -> Result<Array2<f64>, PartitionError> {
    let (rows, cols) = adjacency.dim();
    if rows != cols {
        return Err(PartitionError::InvalidInput(format!(
            "adjacency is {rows}x{cols}, expected square"
        )));
    }
    if min_weight <= 0.0 {
        return Err(PartitionError::InvalidInput(
            "minimum weight must be positive".to_string(),
        ));
    }
    if max_weight < min_weight {
        return Err(PartitionError::InvalidInput(
            "maximum weight must be at least the minimum weight".to_string(),
        ));
    }

    let mut weights = Array2::<f64>::zeros((rows, rows));
    for i in 0..rows {
        for j in (i + 1)..rows {
            if adjacency[(i, j)] > 0.0 {
                let steps = (rng.gen::<f64>() * (max_weight - min_weight) / 0.5).round();
                let w = min_weight + 0.5 * steps;
                weights[(i, j)] = w;
                weights[(j, i)] = w;
            }
        }
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn adjacency_is_symmetric_with_zero_diagonal() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = random_adjacency(12, 4, &mut rng).unwrap();
        for i in 0..12 {
            assert_eq!(a[(i, i)], 0.0);
            for j in 0..12 {
                assert_eq!(a[(i, j)], a[(j, i)]);
            }
        }
    }

    #[test]
    fn degrees_respect_cap() {
        let mut rng = StdRng::seed_from_u64(11);
        let max_edges = 3;
        let a = random_adjacency(10, max_edges, &mut rng).unwrap();
        for i in 0..10 {
            let deg = (0..10).filter(|&j| a[(i, j)] > 0.0).count();
            assert!(deg <= max_edges, "vertex {i} has degree {deg}");
        }
    }

    #[test]
    fn weights_cover_support_on_half_steps() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = random_adjacency(8, 3, &mut rng).unwrap();
        let w = random_weights(&a, 1.0, 4.0, &mut rng).unwrap();
        for i in 0..8 {
            for j in 0..8 {
                if a[(i, j)] > 0.0 {
                    assert!(w[(i, j)] >= 1.0 && w[(i, j)] <= 4.0);
                    let doubled = w[(i, j)] * 2.0;
                    assert!((doubled - doubled.round()).abs() < 1e-9);
                } else {
                    assert_eq!(w[(i, j)], 0.0);
                }
            }
        }
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_adjacency(0, 3, &mut rng).is_err());
        assert!(random_adjacency(4, 0, &mut rng).is_err());
        let a = random_adjacency(4, 2, &mut rng).unwrap();
        assert!(random_weights(&a, 0.0, 2.0, &mut rng).is_err());
        assert!(random_weights(&a, 3.0, 2.0, &mut rng).is_err());
    }

    #[test]
    fn same_seed_reproduces_graph() {
        let a1 = random_adjacency(9, 3, &mut StdRng::seed_from_u64(42)).unwrap();
        let a2 = random_adjacency(9, 3, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a1, a2);
    }
}
