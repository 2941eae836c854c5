//! Typed graph value: a validated adjacency matrix plus optional edge weights.
//!
//! Matrices are validated once at construction so the algorithms can assume a
//! square, symmetric, zero-diagonal adjacency throughout. Any positive
//! adjacency entry is treated as "edge present".

use ndarray::Array2;

use crate::error::PartitionError;

/// Tolerance for the symmetry check on input matrices.
const SYMMETRY_TOL: f64 = 1e-9;

/// An undirected graph over vertices `0..n`, stored densely.
#[derive(Clone, Debug)]
pub struct Graph {
    adjacency: Array2<f64>,
    weights: Option<Array2<f64>>,
}

impl Graph {
    /// Build an unweighted graph from an adjacency matrix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the matrix is not square, not symmetric
    /// (within tolerance), carries a non-zero diagonal, or has negative
    /// entries.
    pub fn new(adjacency: Array2<f64>) -> Result<Self, PartitionError> {
        validate_symmetric(&adjacency, "adjacency")?;
        for i in 0..adjacency.nrows() {
            if adjacency[(i, i)] != 0.0 {
                return Err(PartitionError::InvalidInput(format!(
                    "adjacency diagonal must be zero, found {} at ({i},{i})",
                    adjacency[(i, i)]
                )));
            }
        }
        Ok(Self {
            adjacency,
            weights: None,
        })
    }

    /// Build a weighted graph from an adjacency matrix and a weights matrix.
    ///
    /// The weights matrix must be symmetric with `support(W) ⊆ support(A)`:
    /// a non-zero weight is only allowed where the adjacency records an edge.
    pub fn with_weights(
        adjacency: Array2<f64>,
        weights: Array2<f64>,
    ) -> Result<Self, PartitionError> {
        let graph = Self::new(adjacency)?;
        validate_symmetric(&weights, "weights")?;
        if weights.dim() != graph.adjacency.dim() {
            return Err(PartitionError::InvalidInput(format!(
                "weights shape {:?} does not match adjacency shape {:?}",
                weights.dim(),
                graph.adjacency.dim()
            )));
        }
        for i in 0..weights.nrows() {
            for j in 0..weights.ncols() {
                if weights[(i, j)] != 0.0 && graph.adjacency[(i, j)] <= 0.0 {
                    return Err(PartitionError::InvalidInput(format!(
                        "weight {} at ({i},{j}) has no corresponding edge",
                        weights[(i, j)]
                    )));
                }
            }
        }
        Ok(Self {
            weights: Some(weights),
            ..graph
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.nrows()
    }

    pub fn adjacency(&self) -> &Array2<f64> {
        &self.adjacency
    }

    pub fn weights(&self) -> Option<&Array2<f64>> {
        self.weights.as_ref()
    }

    /// Weights matrix, or `InvalidInput` for algorithms that require one.
    pub fn require_weights(&self) -> Result<&Array2<f64>, PartitionError> {
        self.weights.as_ref().ok_or_else(|| {
            PartitionError::InvalidInput("algorithm requires a weights matrix".to_string())
        })
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency[(i, j)] > 0.0
    }

    /// Neighbors of `v` in ascending vertex order.
    pub fn neighbors(&self, v: usize) -> Vec<usize> {
        (0..self.vertex_count())
            .filter(|&u| u != v && self.has_edge(v, u))
            .collect()
    }

    /// All undirected edges as `(i, j)` pairs with `i < j`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let n = self.vertex_count();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.has_edge(i, j) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Weight of the edge `(i, j)`: the weights entry when present, else the
    /// adjacency entry (1 for an unweighted edge).
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        match &self.weights {
            Some(w) => w[(i, j)],
            None => self.adjacency[(i, j)],
        }
    }
}

fn validate_symmetric(m: &Array2<f64>, name: &str) -> Result<(), PartitionError> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(PartitionError::InvalidInput(format!(
            "{name} matrix is {rows}x{cols}, expected square"
        )));
    }
    for i in 0..rows {
        for j in 0..cols {
            if m[(i, j)] < 0.0 {
                return Err(PartitionError::InvalidInput(format!(
                    "{name} entry ({i},{j}) is negative"
                )));
            }
            if j > i && (m[(i, j)] - m[(j, i)]).abs() > SYMMETRY_TOL {
                return Err(PartitionError::InvalidInput(format!(
                    "{name} matrix is not symmetric at ({i},{j})"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rejects_non_square() {
        let m = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            Graph::new(m),
            Err(PartitionError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_asymmetric() {
        let m = array![[0.0, 1.0], [0.0, 0.0]];
        assert!(Graph::new(m).is_err());
    }

    #[test]
    fn rejects_nonzero_diagonal() {
        let m = array![[1.0, 0.0], [0.0, 0.0]];
        assert!(Graph::new(m).is_err());
    }

    #[test]
    fn rejects_weight_without_edge() {
        let a = array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let w = array![[0.0, 2.0, 0.0], [2.0, 0.0, 3.5], [0.0, 3.5, 0.0]];
        assert!(Graph::with_weights(a, w).is_err());
    }

    #[test]
    fn edges_and_neighbors() {
        let m = array![[0.0, 1.0, 1.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let g = Graph::new(m).unwrap();
        assert_eq!(g.edges(), vec![(0, 1), (0, 2)]);
        assert_eq!(g.neighbors(0), vec![1, 2]);
        assert_eq!(g.neighbors(1), vec![0]);
        assert_eq!(g.edge_count(), 2);
    }
}
