//! Partition value: an ordered list of vertex-index groups.
//!
//! The balance invariant (largest and smallest group differ by at most one
//! vertex) and the disjoint-cover invariant are checked explicitly via
//! [`Partition::validate`]; construction itself stays cheap so algorithms can
//! assemble groups incrementally.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::PartitionError;

/// Pad value used in the rectangular matrix encoding of a partition.
pub const PAD_VALUE: f64 = -1.0;

/// An ordered tuple of vertex-index groups. Vertex order within a group is
/// not significant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    groups: Vec<Vec<usize>>,
}

impl Partition {
    pub fn new(groups: Vec<Vec<usize>>) -> Self {
        Self { groups }
    }

    /// Build a partition from a per-vertex group assignment. Vertices appear
    /// in ascending order within each group.
    pub fn from_assignments(assignments: &[usize], k: usize) -> Self {
        let mut groups = vec![Vec::new(); k];
        for (v, &g) in assignments.iter().enumerate() {
            groups[g].push(v);
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Number of groups.
    pub fn k(&self) -> usize {
        self.groups.len()
    }

    /// Inverse mapping: vertex index -> group index. Vertices not covered by
    /// any group map to `usize::MAX`.
    pub fn assignments(&self, n: usize) -> Vec<usize> {
        let mut assignment = vec![usize::MAX; n];
        for (g, group) in self.groups.iter().enumerate() {
            for &v in group {
                if v < n {
                    assignment[v] = g;
                }
            }
        }
        assignment
    }

    /// Whether the largest and smallest groups differ by at most one vertex.
    pub fn is_balanced(&self) -> bool {
        let sizes: Vec<usize> = self.groups.iter().map(Vec::len).collect();
        match (sizes.iter().max(), sizes.iter().min()) {
            (Some(max), Some(min)) => max - min <= 1,
            _ => true,
        }
    }

    /// Check that the groups disjointly cover `0..n` and satisfy the balance
    /// invariant.
    ///
    /// # Errors
    ///
    /// `InvalidInput` naming the first violated property.
    pub fn validate(&self, n: usize) -> Result<(), PartitionError> {
        let mut seen = vec![false; n];
        for group in &self.groups {
            for &v in group {
                if v >= n {
                    return Err(PartitionError::InvalidInput(format!(
                        "vertex {v} out of range 0..{n}"
                    )));
                }
                if seen[v] {
                    return Err(PartitionError::InvalidInput(format!(
                        "vertex {v} appears in more than one group"
                    )));
                }
                seen[v] = true;
            }
        }
        if let Some(v) = seen.iter().position(|&s| !s) {
            return Err(PartitionError::InvalidInput(format!(
                "vertex {v} is not covered by any group"
            )));
        }
        if !self.is_balanced() {
            return Err(PartitionError::InvalidInput(
                "group sizes differ by more than one".to_string(),
            ));
        }
        Ok(())
    }

    /// Rectangular `k x max_size` encoding, padded with `-1` where a group is
    /// shorter than the longest. Serializable with the same brace format as
    /// adjacency matrices.
    pub fn to_padded_matrix(&self) -> Array2<f64> {
        let k = self.groups.len();
        let width = self.groups.iter().map(Vec::len).max().unwrap_or(0);
        let mut m = Array2::from_elem((k, width), PAD_VALUE);
        for (g, group) in self.groups.iter().enumerate() {
            for (col, &v) in group.iter().enumerate() {
                m[(g, col)] = v as f64;
            }
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_assignments_groups_in_order() {
        let p = Partition::from_assignments(&[0, 1, 0, 1], 2);
        assert_eq!(p.groups(), &[vec![0, 2], vec![1, 3]]);
        assert_eq!(p.k(), 2);
        p.validate(4).unwrap();
    }

    #[test]
    fn validate_catches_missing_vertex() {
        let p = Partition::new(vec![vec![0], vec![2]]);
        assert!(p.validate(3).is_err());
    }

    #[test]
    fn validate_catches_imbalance() {
        let p = Partition::new(vec![vec![0, 1, 2], vec![3]]);
        assert!(p.validate(4).is_err());
        assert!(!p.is_balanced());
    }

    #[test]
    fn padded_matrix_shape_and_pad() {
        let p = Partition::new(vec![vec![0, 1], vec![2, 3, 4]]);
        let m = p.to_padded_matrix();
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m[(0, 2)], PAD_VALUE);
        assert_eq!(m[(1, 2)], 4.0);
    }

    #[test]
    fn assignments_roundtrip() {
        let p = Partition::new(vec![vec![1, 3], vec![0, 2]]);
        assert_eq!(p.assignments(4), vec![1, 0, 1, 0]);
    }
}
