use bevy::math::DVec3;
use nalgebra::{DMatrix, DVector, SymmetricEigen};

use super::batch::EmbeddingBatch;
use crate::error::{Result, VisualiserError};

/// Coordinates of one vector along the first three principal components.
pub type ProjectedPoint = DVec3;

const COMPONENTS: usize = 3;

/// Relative eigenvalue threshold below which a component carries no variance.
const EIGENVALUE_TOLERANCE: f64 = 1e-12;

/// Singular values below this fraction of the raw data's Frobenius norm are
/// rounding left over from centring, not spread.
const CENTRING_NOISE: f64 = 1e-10;

/// Project every vector of the batch onto its three directions of greatest variance.
///
/// Data is mean-centred (not scaled). The eigen-decomposition runs on the
/// smaller of the Gram matrix (`N x N`) and the covariance matrix (`D x D`);
/// both yield identical scores. Components the batch cannot support (rank
/// below three) come out as zero. Each component's sign is fixed so that its
/// largest-magnitude score is positive, which makes the output reproducible
/// for a given batch. A batch of identical vectors projects to the origin
/// exactly, however the mean rounds.
pub fn project(batch: &EmbeddingBatch) -> Result<Vec<ProjectedPoint>> {
    let n = batch.len();
    if n < 2 {
        return Err(VisualiserError::InsufficientData { count: n });
    }

    let (centred, raw_norm) = centred_matrix(batch);
    let noise_floor = (CENTRING_NOISE * raw_norm).powi(2);
    let mut scores = if batch.dimensions() >= n {
        gram_scores(&centred, noise_floor)
    } else {
        covariance_scores(&centred, noise_floor)
    };

    for component in &mut scores {
        orient(component);
    }

    Ok((0..n)
        .map(|i| DVec3::new(scores[0][i], scores[1][i], scores[2][i]))
        .collect())
}

/// Mean-centred data matrix plus the Frobenius norm of the data before centring.
fn centred_matrix(batch: &EmbeddingBatch) -> (DMatrix<f64>, f64) {
    let vectors = batch.vectors();
    let mut matrix = DMatrix::from_fn(batch.len(), batch.dimensions(), |i, j| vectors[i][j]);
    let raw_norm = matrix.norm();
    for mut column in matrix.column_iter_mut() {
        let mean = column.mean();
        column.add_scalar_mut(-mean);
    }
    (matrix, raw_norm)
}

/// Eigenpairs sorted by descending eigenvalue, truncated to the retained components.
///
/// An eigenvalue is kept only above both `noise_floor` and a fraction of the
/// largest one.
fn leading_eigenpairs(symmetric: DMatrix<f64>, noise_floor: f64) -> Vec<(f64, DVector<f64>)> {
    let eigen = SymmetricEigen::new(symmetric);
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .total_cmp(&eigen.eigenvalues[a])
            .then(a.cmp(&b))
    });

    let largest = order
        .first()
        .map(|&i| eigen.eigenvalues[i].max(0.0))
        .unwrap_or(0.0);
    let threshold = (largest * EIGENVALUE_TOLERANCE).max(noise_floor);

    order
        .into_iter()
        .take(COMPONENTS)
        .filter(|&i| eigen.eigenvalues[i] > threshold)
        .map(|i| (eigen.eigenvalues[i], eigen.eigenvectors.column(i).into_owned()))
        .collect()
}

/// Scores via `X Xᵀ = U Λ Uᵀ`: component k of row i is `U[i, k] * sqrt(λ_k)`.
fn gram_scores(centred: &DMatrix<f64>, noise_floor: f64) -> [Vec<f64>; COMPONENTS] {
    let n = centred.nrows();
    let gram = centred * centred.transpose();
    let mut scores: [Vec<f64>; COMPONENTS] = std::array::from_fn(|_| vec![0.0; n]);

    for (k, (value, vector)) in leading_eigenpairs(gram, noise_floor).into_iter().enumerate() {
        let sigma = value.sqrt();
        for i in 0..n {
            scores[k][i] = vector[i] * sigma;
        }
    }
    scores
}

/// Scores via `Xᵀ X = V Λ Vᵀ`: component k of row i is `X[i, :] · V[:, k]`.
fn covariance_scores(centred: &DMatrix<f64>, noise_floor: f64) -> [Vec<f64>; COMPONENTS] {
    let n = centred.nrows();
    let covariance = centred.transpose() * centred;
    let mut scores: [Vec<f64>; COMPONENTS] = std::array::from_fn(|_| vec![0.0; n]);

    for (k, (_, vector)) in leading_eigenpairs(covariance, noise_floor).into_iter().enumerate() {
        let projected = centred * vector;
        scores[k].copy_from_slice(projected.as_slice());
    }
    scores
}

fn orient(component: &mut [f64]) {
    let pivot = component
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, v)| match best {
            Some((_, b)) if b >= v.abs() => best,
            _ => Some((i, v.abs())),
        });

    if let Some((i, _)) = pivot {
        if component[i] < 0.0 {
            component.iter_mut().for_each(|v| *v = -*v);
        }
    }
}
