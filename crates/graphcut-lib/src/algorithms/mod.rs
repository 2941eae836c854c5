/*!
Partitioning strategies behind a common capability.

Every algorithm implements [`Partitioner`]: `(graph, k) -> Partition`.
Algorithms are values, not static entry points; randomized ones own their RNG
so runs are reproducible under an explicit seed or `RNG_SEED`. The factory
[`create`] resolves an algorithm by name, which is what the CLI facade uses.

| Name                   | k          | Input   | Character                    |
|------------------------|------------|---------|------------------------------|
| `spectral`             | 2 (fixed)  | A       | Fiedler vector + median cut  |
| `inertial`             | 2 (fixed)  | A + W   | weighted Fiedler, median     |
| `geometric`            | >= 1       | A + W   | sphere embedding, recursive  |
| `kernighan-lin`        | >= 2       | A       | local-search swaps           |
| `greedy`               | >= 1       | A       | BFS growth + refinement      |
| `brute-force`          | >= 1       | A       | exhaustive, optimal          |
| `brute-force-weighted` | >= 1       | A + W   | exhaustive, optimal weight   |
| `logical`              | >= 1       | A       | external ASP solver          |
| `logical-weighted`     | >= 1       | A + W   | external ASP solver          |
*/

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::error::PartitionError;
use crate::model::{Graph, Partition};

pub mod brute_force;
pub mod geometric;
pub mod greedy;
pub mod inertial;
pub mod kernighan_lin;
pub mod spectral;

pub use brute_force::{BruteForce, BruteForceWeighted};
pub use geometric::Geometric;
pub use greedy::Greedy;
pub use inertial::Inertial;
pub use kernighan_lin::KernighanLin;
pub use spectral::Spectral;

/// A balanced k-way partitioning strategy.
pub trait Partitioner {
    /// Stable name, as used by [`create`].
    fn name(&self) -> &'static str;

    /// Partition the graph into `k` groups.
    ///
    /// Implementations validate their own k range and input requirements and
    /// report the first error encountered; no partial result is returned.
    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError>;
}

/// Validate `min_k <= k <= n`.
pub(crate) fn check_k(graph: &Graph, k: usize, min_k: usize) -> Result<(), PartitionError> {
    let n = graph.vertex_count();
    if k < min_k {
        return Err(PartitionError::InvalidInput(format!(
            "k = {k} is below the minimum of {min_k}"
        )));
    }
    if k > n {
        return Err(PartitionError::InvalidInput(format!(
            "k = {k} exceeds the vertex count n = {n}"
        )));
    }
    Ok(())
}

type Factory = fn(Option<u64>) -> Box<dyn Partitioner>;

fn make_spectral(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(Spectral::new())
}

fn make_inertial(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(Inertial)
}

fn make_geometric(seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(Geometric::new(seed))
}

fn make_kernighan_lin(seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(KernighanLin::new(seed))
}

fn make_greedy(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(Greedy)
}

fn make_brute_force(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(BruteForce)
}

fn make_brute_force_weighted(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(BruteForceWeighted)
}

fn make_logical(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(crate::asp::LogicalProgramming::new(
        crate::asp::AspConfig::default(),
        false,
    ))
}

fn make_logical_weighted(_seed: Option<u64>) -> Box<dyn Partitioner> {
    Box::new(crate::asp::LogicalProgramming::new(
        crate::asp::AspConfig::default(),
        true,
    ))
}

static REGISTRY: Lazy<BTreeMap<&'static str, Factory>> = Lazy::new(|| {
    let mut registry: BTreeMap<&'static str, Factory> = BTreeMap::new();
    registry.insert("spectral", make_spectral as Factory);
    registry.insert("inertial", make_inertial);
    registry.insert("geometric", make_geometric);
    registry.insert("kernighan-lin", make_kernighan_lin);
    registry.insert("greedy", make_greedy);
    registry.insert("brute-force", make_brute_force);
    registry.insert("brute-force-weighted", make_brute_force_weighted);
    registry.insert("logical", make_logical);
    registry.insert("logical-weighted", make_logical_weighted);
    registry
});

/// Instantiate an algorithm by name. `seed` is honored by the randomized
/// algorithms and ignored by the deterministic ones.
pub fn create(name: &str, seed: Option<u64>) -> Option<Box<dyn Partitioner>> {
    REGISTRY.get(name).map(|factory| factory(seed))
}

/// Registered algorithm names, sorted.
pub fn names() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_every_name() {
        for name in names() {
            let algorithm = create(name, Some(1)).expect("registered algorithm");
            assert_eq!(algorithm.name(), name);
        }
        assert!(create("no-such-algorithm", None).is_none());
    }
}
