//! Spectral bisection: Fiedler vector of the unweighted Laplacian, followed
//! by the balanced assignment step.

use tracing::debug;

use crate::algorithms::{check_k, Partitioner};
use crate::assignment::{AssignmentSolver, MedianCutAssignment};
use crate::error::PartitionError;
use crate::linalg;
use crate::model::{Graph, Partition};

/// Spectral bisection. Fixed at k = 2.
pub struct Spectral {
    solver: Box<dyn AssignmentSolver>,
}

impl Spectral {
    pub fn new() -> Self {
        Self {
            solver: Box::new(MedianCutAssignment),
        }
    }

    /// Swap in an alternative assignment solver.
    pub fn with_solver(solver: Box<dyn AssignmentSolver>) -> Self {
        Self { solver }
    }
}

impl Default for Spectral {
    fn default() -> Self {
        Self::new()
    }
}

impl Partitioner for Spectral {
    fn name(&self) -> &'static str {
        "spectral"
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        if k != 2 {
            return Err(PartitionError::InvalidInput(format!(
                "spectral bisection is fixed at k = 2, got k = {k}"
            )));
        }
        check_k(graph, k, 2)?;

        let fiedler = linalg::fiedler_vector(graph.adjacency())?;
        let side = self.solver.assign(&fiedler)?;
        let partition = Partition::from_assignments(&side, 2);
        debug!(
            n = graph.vertex_count(),
            cut = crate::metrics::cut_edges(graph, &partition),
            "spectral bisection done"
        );
        Ok(partition)
    }
}
