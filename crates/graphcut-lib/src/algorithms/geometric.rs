/*!
Geometric partitioning by recursive circle/sphere splits.

Pipeline:

1. Embed each vertex in 2-D using the eigenvector columns of the weighted
   Laplacian paired with the 2nd- and 3rd-smallest eigenvalues (the smallest
   belongs to the constant vector and carries no geometry).
2. Stereographically project the plane onto the unit sphere and re-center the
   point cloud on its centroid.
3. Recursively split: draw a random unit normal, cut at the median of the
   dot products, rebalance to within one vertex, and recurse with floor(k/2)
   groups on one side and ceil(k/2) on the other.

The split normal is drawn per recursive call, so output varies run to run
unless the RNG is seeded.
*/

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::algorithms::{check_k, Partitioner};
use crate::error::PartitionError;
use crate::linalg;
use crate::model::{Graph, Partition};
use crate::utils::rng::rng_with;

/// Recursive geometric partitioning. Accepts any `1 <= k <= n`; requires a
/// weights matrix.
pub struct Geometric {
    rng: StdRng,
}

impl Geometric {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_with(seed),
        }
    }
}

impl Partitioner for Geometric {
    fn name(&self) -> &'static str {
        "geometric"
    }

    fn partition(&mut self, graph: &Graph, k: usize) -> Result<Partition, PartitionError> {
        check_k(graph, k, 1)?;
        let n = graph.vertex_count();
        if k == 1 {
            return Ok(Partition::new(vec![(0..n).collect()]));
        }
        if n <= 2 {
            // Too few points to embed; k == n == 2 here after the checks.
            return Ok(Partition::new(vec![vec![0], vec![1]]));
        }

        let weights = graph.require_weights()?;
        let l = linalg::laplacian(weights);
        let (eigenvalues, eigenvectors) = linalg::symmetric_eigen(&l)?;
        let order = linalg::ascending_indices(&eigenvalues);
        let (s1, s2) = (order[1], order[2]);

        // Stereographic projection of (x, y) onto the unit sphere, then shift
        // by the centroid so median cuts pass near the cloud's center.
        let mut points: Vec<[f64; 3]> = (0..n)
            .map(|i| {
                let (x, y) = (eigenvectors[(i, s1)], eigenvectors[(i, s2)]);
                let norm = (x * x + y * y + 1.0).sqrt();
                [x / norm, y / norm, 1.0 / norm]
            })
            .collect();
        let mut centroid = [0.0f64; 3];
        for p in &points {
            for axis in 0..3 {
                centroid[axis] += p[axis];
            }
        }
        for axis in 0..3 {
            centroid[axis] /= n as f64;
        }
        for p in &mut points {
            for axis in 0..3 {
                p[axis] -= centroid[axis];
            }
        }

        let groups = split(&points, (0..n).collect(), k, &mut self.rng);
        debug!(n, k, "geometric split done");
        Ok(Partition::new(groups))
    }
}

/// Recursive median split of `indices` into `k` groups.
fn split<R: Rng>(
    points: &[[f64; 3]],
    indices: Vec<usize>,
    k: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    if k <= 1 {
        return vec![indices];
    }

    let normal = random_unit_normal(rng);
    let dots: Vec<f64> = indices
        .iter()
        .map(|&i| dot(&points[i], &normal))
        .collect();
    let mut sorted = dots.clone();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[sorted.len() / 2];

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (pos, &i) in indices.iter().enumerate() {
        if dots[pos] < median {
            left.push(i);
        } else {
            right.push(i);
        }
    }
    rebalance(points, &mut left, &mut right);

    let k_left = k / 2;
    let k_right = k - k_left;
    let mut groups = split(points, left, k_left, rng);
    groups.extend(split(points, right, k_right, rng));
    groups
}

/// Move vertices from the larger side to the smaller until the sides differ
/// by at most one, preferring the vertex whose coordinate sum lies closest to
/// the median coordinate sum of the whole call.
fn rebalance(points: &[[f64; 3]], left: &mut Vec<usize>, right: &mut Vec<usize>) {
    let coordinate_sum = |i: usize| points[i][0] + points[i][1] + points[i][2];

    let mut all_sums: Vec<f64> = left
        .iter()
        .chain(right.iter())
        .map(|&i| coordinate_sum(i))
        .collect();
    all_sums.sort_by(f64::total_cmp);
    let median_sum = all_sums[all_sums.len() / 2];

    while left.len().abs_diff(right.len()) > 1 {
        let (from, to) = if left.len() > right.len() {
            (&mut *left, &mut *right)
        } else {
            (&mut *right, &mut *left)
        };
        let pick = from
            .iter()
            .enumerate()
            .min_by(|(_, &a), (_, &b)| {
                (coordinate_sum(a) - median_sum)
                    .abs()
                    .total_cmp(&(coordinate_sum(b) - median_sum).abs())
            })
            .map(|(pos, _)| pos)
            .expect("larger side is non-empty");
        to.push(from.remove(pick));
    }
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Uniform random unit vector, by rejection sampling inside the unit ball.
fn random_unit_normal<R: Rng>(rng: &mut R) -> [f64; 3] {
    loop {
        let v = [
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        ];
        let norm_sq = dot(&v, &v);
        if norm_sq > 1e-12 && norm_sq <= 1.0 {
            let norm = norm_sq.sqrt();
            return [v[0] / norm, v[1] / norm, v[2] / norm];
        }
    }
}
