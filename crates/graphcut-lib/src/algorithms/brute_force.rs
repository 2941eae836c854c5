/*!
Exhaustive search over balanced assignments.

Two flavors share the enumeration-and-minimize shape:

- [`BruteForce`] backtracks over per-vertex group choices and checks balance
  at full depth, minimizing the inter-group *edge count*.
- [`BruteForceWeighted`] walks all k^n assignments with a base-k counter,
  filters to balanced ones, and minimizes the inter-group *edge weight*.

Neither breaks symmetry, so each partition is visited once per group
relabeling. Both are O(k^n) and intended only for small n; ties keep the
first assignment found in enumeration order.
*/

use tracing::debug;

use crate::algorithms::{check_k, Partitioner};
use crate::error::PartitionError;
use crate::model::{Graph, Partition};

/// Exhaustive balanced partitioning minimizing cut edges.
pub struct BruteForce;

/// Exhaustive balanced partitioning minimizing cut weight. Requires a
/// weights matrix.
pub struct BruteForceWeighted;

impl Partitioner for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        check_k(graph, k, 1)?;
        let n = graph.vertex_count();
        let edges = graph.edges();

        let mut assignment = vec![0usize; n];
        let mut best: Option<(usize, Vec<usize>)> = None;
        search(&edges, k, n, 0, &mut assignment, &mut best);

        let (cut, assignment) = best.expect("at least one balanced assignment exists");
        debug!(n, k, cut, "exhausted search space");
        Ok(Partition::from_assignments(&assignment, k))
    }
}

/// Depth-first enumeration of group choices; evaluates complete balanced
/// assignments and keeps the first minimum.
fn search(
    edges: &[(usize, usize)],
    k: usize,
    n: usize,
    depth: usize,
    assignment: &mut Vec<usize>,
    best: &mut Option<(usize, Vec<usize>)>,
) {
    if depth == n {
        if !is_balanced(assignment, k) {
            return;
        }
        let cut = edges
            .iter()
            .filter(|&&(i, j)| assignment[i] != assignment[j])
            .count();
        if best.as_ref().map_or(true, |(c, _)| cut < *c) {
            *best = Some((cut, assignment.clone()));
        }
        return;
    }
    for g in 0..k {
        assignment[depth] = g;
        search(edges, k, n, depth + 1, assignment, best);
    }
}

impl Partitioner for BruteForceWeighted {
    fn name(&self) -> &'static str {
        "brute-force-weighted"
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        check_k(graph, k, 1)?;
        let weights = graph.require_weights()?;
        let n = graph.vertex_count();
        let edges = graph.edges();

        // Base-k counter over all k^n assignments, least-significant digit
        // at vertex 0.
        let mut digits = vec![0usize; n];
        let mut best: Option<(f64, Vec<usize>)> = None;
        loop {
            if is_balanced(&digits, k) {
                let weight: f64 = edges
                    .iter()
                    .filter(|&&(i, j)| digits[i] != digits[j])
                    .map(|&(i, j)| weights[(i, j)])
                    .sum();
                if best.as_ref().map_or(true, |(w, _)| weight < *w) {
                    best = Some((weight, digits.clone()));
                }
            }
            if !increment(&mut digits, k) {
                break;
            }
        }

        let (weight, assignment) = best.expect("at least one balanced assignment exists");
        debug!(n, k, weight, "exhausted search space");
        Ok(Partition::from_assignments(&assignment, k))
    }
}

/// Advance the base-k odometer; `false` once it wraps back to all zeros.
fn increment(digits: &mut [usize], k: usize) -> bool {
    for digit in digits.iter_mut() {
        *digit += 1;
        if *digit < k {
            return true;
        }
        *digit = 0;
    }
    false
}

/// Balance check over a complete assignment: group sizes differ by at most
/// one.
fn is_balanced(assignment: &[usize], k: usize) -> bool {
    let mut sizes = vec![0usize; k];
    for &g in assignment {
        sizes[g] += 1;
    }
    let max = sizes.iter().max().copied().unwrap_or(0);
    let min = sizes.iter().min().copied().unwrap_or(0);
    max - min <= 1
}
