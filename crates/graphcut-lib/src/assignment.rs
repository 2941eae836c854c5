//! Assignment step of the spectral method.
//!
//! The spectral bisection pipeline ends by turning the Fiedler vector into a
//! two-sided vertex assignment under the zero-sum balance constraint. That
//! final step is the only thing this trait exposes, so alternative solvers can
//! be swapped in without touching the eigen pipeline.

use ndarray::Array1;

use crate::error::PartitionError;

/// Turns a Fiedler vector into a balanced two-sided assignment.
///
/// Implementations return one group index (0 or 1) per vertex; group sizes
/// must differ by at most one.
pub trait AssignmentSolver {
    fn assign(&self, fiedler: &Array1<f64>) -> Result<Vec<usize>, PartitionError>;
}

/// Balanced median cut on the Fiedler vector.
///
/// Sorting the components and sending the lower half to one side is the exact
/// minimizer of the sign-choice objective under the zero-sum constraint, in
/// O(n log n). The lower `n/2` components go to group 0, the rest to group 1,
/// so odd n leaves group 1 one vertex larger.
pub struct MedianCutAssignment;

impl AssignmentSolver for MedianCutAssignment {
    fn assign(&self, fiedler: &Array1<f64>) -> Result<Vec<usize>, PartitionError> {
        let n = fiedler.len();
        if n == 0 {
            return Err(PartitionError::NoSolution(
                "cannot assign an empty vertex set".to_string(),
            ));
        }
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| fiedler[a].total_cmp(&fiedler[b]));
        let mut side = vec![1usize; n];
        for &i in order.iter().take(n / 2) {
            side[i] = 0;
        }
        Ok(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_cut_balances_even() {
        let x = Array1::from(vec![0.4, -0.3, 0.1, -0.2]);
        let side = MedianCutAssignment.assign(&x).unwrap();
        assert_eq!(side, vec![1, 0, 1, 0]);
    }

    #[test]
    fn median_cut_balances_odd() {
        let x = Array1::from(vec![1.0, -1.0, 0.0]);
        let side = MedianCutAssignment.assign(&x).unwrap();
        let zeros = side.iter().filter(|&&s| s == 0).count();
        assert_eq!(zeros, 1);
        assert_eq!(side[1], 0);
    }

    #[test]
    fn median_cut_rejects_empty() {
        let x: Array1<f64> = Array1::from(Vec::new());
        assert!(MedianCutAssignment.assign(&x).is_err());
    }
}
