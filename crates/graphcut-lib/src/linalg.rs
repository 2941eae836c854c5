/*!
Dense linear-algebra kernel shared by the spectral family of algorithms.

This module implements the numerical building blocks:

- Laplacian construction (L = D - M over adjacency or weights)
- Symmetric eigendecomposition (nalgebra `SymmetricEigen`)
- Fiedler-index selection with an exact-duplicate skip
- Index ordering by ascending eigenvalue for the geometric embedding

Matrices cross the module boundary as `ndarray::Array2<f64>`; conversion to
nalgebra happens only around the decomposition itself.
*/

use nalgebra::linalg::SymmetricEigen;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, Axis};

use crate::error::PartitionError;

/// Tolerance for the symmetry check ahead of the eigendecomposition.
const SYMMETRY_TOL: f64 = 1e-8;

/// Relative tolerance for grouping computed eigenvalues around the minimum
/// when deciding whether the bottom eigenspace is degenerate.
const MIN_EIGENSPACE_TOL: f64 = 1e-9;

/// Iteration cap handed to the QR iteration inside `SymmetricEigen`.
const EIGEN_MAX_ITER: usize = 10_000;

/// Row-sum vector `d = M · 1` (length n).
pub fn row_sums(m: &Array2<f64>) -> Array1<f64> {
    m.sum_axis(Axis(1))
}

/// Laplacian `L = D - M` where `D = diag(row_sums(M))`.
///
/// For a valid graph matrix the result is symmetric, has zero row sums and a
/// smallest eigenvalue of zero.
pub fn laplacian(m: &Array2<f64>) -> Array2<f64> {
    let n = m.nrows();
    let degree = row_sums(m);
    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            l[(i, j)] = -m[(i, j)];
        }
        l[(i, i)] += degree[i];
    }
    l
}

/// Eigendecomposition of a symmetric matrix.
///
/// # Returns
///
/// `(eigenvalues, eigenvectors)` where `eigenvalues` has length n and
/// `eigenvectors` is an n x n matrix whose column `i` pairs with
/// `eigenvalues[i]`. No ordering of the eigenvalues is assumed; callers pick
/// indices through [`fiedler_index`] or [`ascending_indices`].
///
/// # Errors
///
/// `Numerical` if the matrix is asymmetric beyond tolerance or the QR
/// iteration fails to converge.
pub fn symmetric_eigen(m: &Array2<f64>) -> Result<(Array1<f64>, Array2<f64>), PartitionError> {
    let n = m.nrows();
    if n == 0 {
        return Ok((Array1::zeros(0), Array2::zeros((0, 0))));
    }
    if n != m.ncols() {
        return Err(PartitionError::Numerical(format!(
            "matrix is {}x{}, expected square",
            n,
            m.ncols()
        )));
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if (m[(i, j)] - m[(j, i)]).abs() > SYMMETRY_TOL {
                return Err(PartitionError::Numerical(format!(
                    "matrix not symmetric within tolerance at ({i},{j})"
                )));
            }
        }
    }

    let dm = DMatrix::from_fn(n, n, |i, j| m[(i, j)]);
    let eigen = SymmetricEigen::try_new(dm, f64::EPSILON, EIGEN_MAX_ITER).ok_or_else(|| {
        PartitionError::Numerical("eigendecomposition did not converge".to_string())
    })?;

    let eigenvalues = Array1::from_iter(eigen.eigenvalues.iter().copied());
    let eigenvectors = Array2::from_shape_fn((n, n), |(i, j)| eigen.eigenvectors[(i, j)]);
    Ok((eigenvalues, eigenvectors))
}

/// Index of the second-smallest *distinct* eigenvalue: the argmin over
/// `{i : λᵢ != min λ}`, skipping exact duplicates of the minimum.
///
/// # Errors
///
/// `Numerical` when the spectrum is empty or all eigenvalues are equal.
pub fn fiedler_index(eigenvalues: &Array1<f64>) -> Result<usize, PartitionError> {
    let min = eigenvalues
        .iter()
        .copied()
        .min_by(f64::total_cmp)
        .ok_or_else(|| PartitionError::Numerical("empty spectrum".to_string()))?;
    let mut best: Option<usize> = None;
    for (i, &v) in eigenvalues.iter().enumerate() {
        if v == min {
            continue;
        }
        match best {
            Some(b) if eigenvalues[b] <= v => {}
            _ => best = Some(i),
        }
    }
    best.ok_or_else(|| {
        PartitionError::Numerical("all eigenvalues are equal; no Fiedler direction".to_string())
    })
}

/// Index permutation sorting the eigenvalues ascending.
pub fn ascending_indices(eigenvalues: &Array1<f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eigenvalues[a].total_cmp(&eigenvalues[b]));
    order
}

/// Number of eigenvalues lying within relative tolerance of the minimum.
fn minimum_multiplicity(eigenvalues: &Array1<f64>) -> usize {
    let Some(min) = eigenvalues.iter().copied().min_by(f64::total_cmp) else {
        return 0;
    };
    let scale = eigenvalues
        .iter()
        .fold(1.0f64, |acc, &v| acc.max(v.abs()));
    eigenvalues
        .iter()
        .filter(|&&v| (v - min).abs() <= MIN_EIGENSPACE_TOL * scale)
        .count()
}

/// Per-vertex connected-component index over the support of `m`, as a real
/// vector. Components are numbered in order of first discovery from vertex 0
/// upward, so the result is deterministic.
pub fn component_indicator(m: &Array2<f64>) -> Array1<f64> {
    let n = m.nrows();
    let mut component: Vec<Option<usize>> = vec![None; n];
    let mut next = 0usize;
    for start in 0..n {
        if component[start].is_some() {
            continue;
        }
        component[start] = Some(next);
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            for u in 0..n {
                if m[(v, u)] != 0.0 && component[u].is_none() {
                    component[u] = Some(next);
                    stack.push(u);
                }
            }
        }
        next += 1;
    }
    Array1::from_iter(
        component
            .into_iter()
            .map(|c| c.expect("every vertex visited") as f64),
    )
}

/// Fiedler vector of `L = D - M`: the eigenvector paired with the
/// second-smallest distinct eigenvalue of the Laplacian built from `m`.
///
/// When the minimum eigenvalue is repeated the graph is disconnected and its
/// bottom eigenspace is spanned by per-component indicators; no eigenvector
/// outside that space separates components (and the decomposition is free to
/// hand back block-confined basis vectors that split a single component
/// instead). In that case the connected-component indicator of `m` is
/// returned directly, so downstream median splits peel components apart.
pub fn fiedler_vector(m: &Array2<f64>) -> Result<Array1<f64>, PartitionError> {
    let l = laplacian(m);
    let (eigenvalues, eigenvectors) = symmetric_eigen(&l)?;
    if minimum_multiplicity(&eigenvalues) > 1 {
        let indicator = component_indicator(m);
        if indicator.iter().any(|&c| c != indicator[0]) {
            return Ok(indicator);
        }
        // Repeated minimum without a component split: fall through to the
        // regular selection.
    }
    let idx = fiedler_index(&eigenvalues)?;
    Ok(eigenvectors.column(idx).to_owned())
}
