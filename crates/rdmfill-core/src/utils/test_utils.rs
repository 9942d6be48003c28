//! Synthetic dissimilarity matrices for tests and benchmarks.

#![cfg(feature = "test-utils")]

use crate::{matrix::MISSING, types::DMatrix};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Draws `n` points in the plane from a standard normal distribution.
pub fn random_planar_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<[f64; 2]> {
    (0..n)
        .map(|_| [rng.sample(StandardNormal), rng.sample(StandardNormal)])
        .collect()
}

/// Euclidean distance matrix of a set of planar points.
pub fn planar_distances(points: &[[f64; 2]]) -> DMatrix<f64> {
    let n = points.len();
    DMatrix::from_fn(n, n, |i, j| {
        let dx = points[i][0] - points[j][0];
        let dy = points[i][1] - points[j][1];
        dx.hypot(dy)
    })
}

/// Fully observed distance matrix of `n` random planar points.
pub fn random_planar_distances(n: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    planar_distances(&random_planar_points(n, &mut rng))
}

/// Replaces a random fraction of the upper-triangle pairs with the missing
/// marker, on both sides of the diagonal.
///
/// The number of removed pairs is `ceil(fraction * n * (n - 1) / 2)`, drawn
/// without replacement.
pub fn mask_random<R: Rng + ?Sized>(matrix: &DMatrix<f64>, fraction: f64, rng: &mut R) -> DMatrix<f64> {
    let n = matrix.nrows();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();
    let amount = ((fraction.clamp(0.0, 1.0) * pairs.len() as f64).ceil() as usize).min(pairs.len());

    let mut masked = matrix.clone();
    for idx in index::sample(rng, pairs.len(), amount) {
        let (i, j) = pairs[idx];
        masked[(i, j)] = MISSING;
        masked[(j, i)] = MISSING;
    }
    masked
}

/// Pearson correlation between two samples, skipping positions where either
/// value is missing or infinite.
///
/// Returns `None` with fewer than two usable positions or zero variance.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let count = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / count;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / count;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (da, db) = (x - mean_a, y - mean_b);
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom > 0.0 {
        Some(cov / denom)
    } else {
        None
    }
}
