/*!
Greedy BFS growth with swap refinement.

Each group is grown by breadth-first search from a seed: the first seed is a
pseudo-peripheral vertex (maximizing single-source BFS depth), later seeds
maximize BFS distance from the seeds chosen so far. A group that exhausts its
BFS frontier before reaching its target size is topped up with boundary
vertices (unused neighbors of used vertices); on a disconnected graph with no
boundary left, remaining vertices are spread over the shortest groups at the
end so the partition still covers every vertex.

Refinement applies any cross-group swap that reduces the cut, judged against
the pre-swap cut, for up to [`REFINE_ITERATIONS`] sweeps.
*/

use std::collections::VecDeque;

use tracing::debug;

use crate::algorithms::{check_k, Partitioner};
use crate::error::PartitionError;
use crate::metrics;
use crate::model::{Graph, Partition};

/// Maximum number of refinement sweeps over all cross-group pairs.
pub const REFINE_ITERATIONS: usize = 100;

/// Greedy BFS-growth partitioning. Accepts any `1 <= k <= n`.
pub struct Greedy;

impl Partitioner for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        check_k(graph, k, 1)?;
        let n = graph.vertex_count();

        // Target sizes: floor(n/k) each, plus one for the first n mod k.
        let base = n / k;
        let remainder = n % k;
        let targets: Vec<usize> = (0..k)
            .map(|g| base + usize::from(g < remainder))
            .collect();

        let mut used = vec![false; n];
        let mut groups: Vec<Vec<usize>> = Vec::with_capacity(k);
        let mut seeds: Vec<usize> = Vec::with_capacity(k);

        for g in 0..k {
            let seed = if g == 0 {
                pseudo_peripheral(graph, &used)
            } else {
                farthest_from(graph, &seeds, &used)
            };
            let mut group = Vec::with_capacity(targets[g]);
            if let Some(seed) = seed {
                seeds.push(seed);
                grow(graph, seed, targets[g], &mut used, &mut group);
            }
            // Frontier exhausted early: fill from the boundary.
            while group.len() < targets[g] {
                match boundary_vertex(graph, &used) {
                    Some(v) => {
                        used[v] = true;
                        group.push(v);
                    }
                    None => break,
                }
            }
            groups.push(group);
        }

        // Disconnected leftovers go to the shortest groups.
        for v in 0..n {
            if !used[v] {
                used[v] = true;
                let shortest = groups
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, g)| g.len())
                    .map(|(i, _)| i)
                    .expect("k >= 1");
                groups[shortest].push(v);
            }
        }

        let mut assignment = Partition::new(groups).assignments(n);
        refine(graph, &mut assignment);

        let partition = Partition::from_assignments(&assignment, k);
        debug!(
            n,
            k,
            cut = metrics::cut_edges(graph, &partition),
            "greedy growth done"
        );
        Ok(partition)
    }
}

/// Single-source BFS distances; unreachable vertices stay `None`.
fn bfs_distances(graph: &Graph, sources: &[usize]) -> Vec<Option<usize>> {
    let n = graph.vertex_count();
    let mut dist = vec![None; n];
    let mut queue = VecDeque::new();
    for &s in sources {
        dist[s] = Some(0);
        queue.push_back(s);
    }
    while let Some(v) = queue.pop_front() {
        let d = dist[v].expect("queued vertices have distances");
        for u in graph.neighbors(v) {
            if dist[u].is_none() {
                dist[u] = Some(d + 1);
                queue.push_back(u);
            }
        }
    }
    dist
}

/// Unused vertex maximizing single-source BFS depth over all candidates.
fn pseudo_peripheral(graph: &Graph, used: &[bool]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for v in 0..graph.vertex_count() {
        if used[v] {
            continue;
        }
        let depth = bfs_distances(graph, &[v])
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0);
        if best.map_or(true, |(_, d)| depth > d) {
            best = Some((v, depth));
        }
    }
    best.map(|(v, _)| v)
}

/// Unused vertex maximizing BFS distance from the seed set; vertices
/// unreachable from every seed count as farthest.
fn farthest_from(graph: &Graph, seeds: &[usize], used: &[bool]) -> Option<usize> {
    let dist = bfs_distances(graph, seeds);
    let mut best: Option<(usize, usize)> = None;
    for v in 0..graph.vertex_count() {
        if used[v] {
            continue;
        }
        match dist[v] {
            None => return Some(v),
            Some(d) => {
                if best.map_or(true, |(_, bd)| d > bd) {
                    best = Some((v, d));
                }
            }
        }
    }
    best.map(|(v, _)| v)
}

/// BFS from `seed` over unused vertices, taking vertices until `target` is
/// reached or the frontier dries up.
fn grow(graph: &Graph, seed: usize, target: usize, used: &mut [bool], group: &mut Vec<usize>) {
    if target == 0 || used[seed] {
        return;
    }
    let mut queue = VecDeque::new();
    used[seed] = true;
    group.push(seed);
    queue.push_back(seed);
    while group.len() < target {
        let Some(v) = queue.pop_front() else {
            break;
        };
        for u in graph.neighbors(v) {
            if !used[u] {
                used[u] = true;
                group.push(u);
                queue.push_back(u);
                if group.len() == target {
                    return;
                }
            }
        }
    }
}

/// Any unused neighbor of a used vertex.
fn boundary_vertex(graph: &Graph, used: &[bool]) -> Option<usize> {
    for v in 0..graph.vertex_count() {
        if !used[v] {
            continue;
        }
        for u in graph.neighbors(v) {
            if !used[u] {
                return Some(u);
            }
        }
    }
    None
}

/// Cut reduction achieved by swapping the groups of `u` and `v`.
fn swap_gain(graph: &Graph, assignment: &[usize], u: usize, v: usize) -> i64 {
    let (a, b) = (assignment[u], assignment[v]);
    let mut gain = 0i64;
    for w in graph.neighbors(u) {
        if w == v {
            continue;
        }
        if assignment[w] == b {
            gain += 1;
        } else if assignment[w] == a {
            gain -= 1;
        }
    }
    for w in graph.neighbors(v) {
        if w == u {
            continue;
        }
        if assignment[w] == a {
            gain += 1;
        } else if assignment[w] == b {
            gain -= 1;
        }
    }
    gain
}

/// Apply improving swaps, judged against the pre-swap cut, until a full sweep
/// finds none or the iteration cap is hit.
fn refine(graph: &Graph, assignment: &mut [usize]) {
    let n = assignment.len();
    for sweep in 0..REFINE_ITERATIONS {
        let mut improved = false;
        for u in 0..n {
            for v in (u + 1)..n {
                if assignment[u] == assignment[v] {
                    continue;
                }
                if swap_gain(graph, assignment, u, v) > 0 {
                    assignment.swap(u, v);
                    improved = true;
                }
            }
        }
        if !improved {
            debug!(sweeps = sweep, "refinement converged");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn path_seed_is_an_endpoint() {
        // Path 0-1-2-3: both endpoints have eccentricity 3, inner vertices 2.
        let a = array![
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0]
        ];
        let graph = Graph::new(a).unwrap();
        let seed = pseudo_peripheral(&graph, &[false; 4]).unwrap();
        assert!(seed == 0 || seed == 3);
    }

    #[test]
    fn disconnected_graph_still_covered() {
        // Two components: 0-1 and 2-3-4.
        let a = array![
            [0.0, 1.0, 0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0, 0.0]
        ];
        let graph = Graph::new(a).unwrap();
        let partition = Greedy.partition(&graph, 2).unwrap();
        partition.validate(5).unwrap();
    }

    #[test]
    fn refinement_untangles_a_bad_split() {
        // 4-cycle assigned alternating groups (cut 4); one swap fixes it.
        let a = array![
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0]
        ];
        let graph = Graph::new(a).unwrap();
        let mut assignment = vec![0, 1, 0, 1];
        refine(&graph, &mut assignment);
        let partition = Partition::from_assignments(&assignment, 2);
        assert_eq!(metrics::cut_edges(&graph, &partition), 2);
    }
}
