//! Inertial bisection: Fiedler vector of the *weighted* Laplacian, split at
//! the upper median of its components.

use crate::algorithms::{check_k, Partitioner};
use crate::error::PartitionError;
use crate::linalg;
use crate::model::{Graph, Partition};

/// Inertial bisection. Fixed at k = 2; requires a weights matrix.
pub struct Inertial;

impl Partitioner for Inertial {
    fn name(&self) -> &'static str {
        "inertial"
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        if k != 2 {
            return Err(PartitionError::InvalidInput(format!(
                "inertial bisection is fixed at k = 2, got k = {k}"
            )));
        }
        check_k(graph, k, 2)?;
        let weights = graph.require_weights()?;

        let fiedler = linalg::fiedler_vector(weights)?;
        let n = fiedler.len();
        // Upper median: ties at the median go to the first group, so odd n
        // gives sizes n/2 + 1 and n/2.
        let mut sorted: Vec<f64> = fiedler.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = sorted[n / 2];

        let side: Vec<usize> = fiedler
            .iter()
            .map(|&x| if x >= median { 0 } else { 1 })
            .collect();
        Ok(Partition::from_assignments(&side, 2))
    }
}
