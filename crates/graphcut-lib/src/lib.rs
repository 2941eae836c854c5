//! Balanced k-way partitioning of undirected graphs.
//!
//! Given an n-vertex graph — optionally edge-weighted — the library returns a
//! partition of the vertex set into k groups whose sizes differ by at most
//! one, minimizing the number (or total weight) of edges crossing group
//! boundaries. Several algorithms solve the same problem at different
//! runtime/quality trade-offs; see [`algorithms`] for the roster and
//! [`algorithms::create`] for the name-keyed factory.
//!
//! Everything is value-oriented: a [`Graph`] in, a [`Partition`] out, nothing
//! retained between calls. The brace-format text encoding in [`serialize`]
//! exists only for the facade edge; internally matrices are typed
//! `ndarray` arrays.

// Public modules
pub mod algorithms;
pub mod asp;
pub mod assignment;
pub mod error;
pub mod generator;
pub mod linalg;
pub mod metrics;
pub mod model;
pub mod serialize;
pub mod utils;

// Re-export primary types for ergonomic use.
pub use algorithms::Partitioner;
pub use error::PartitionError;
pub use model::{Graph, Partition};
