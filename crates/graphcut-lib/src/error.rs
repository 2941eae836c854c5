//! Error type shared by every partitioning entry point.
//!
//! Each algorithm reports the first error it encounters; nothing is retried
//! and no partial partitions are ever returned.

use thiserror::Error;

/// Error type for partitioning operations.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Malformed input: non-square or asymmetric matrices, out-of-range k, …
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An external solver binary could not be started.
    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The solver ran but produced no usable assignment.
    #[error("no solution: {0}")]
    NoSolution(String),

    /// Solver output did not match the expected answer structure.
    #[error("solver output malformed: {0}")]
    SolverOutputMalformed(String),

    /// Eigendecomposition failure or a matrix outside numerical tolerance.
    #[error("numerical failure: {0}")]
    Numerical(String),

    /// Filesystem failure while staging the logic program.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
