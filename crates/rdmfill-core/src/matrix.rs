//! Inspection and validation of dissimilarity matrices.
//!
//! A dissimilarity matrix is an N×N matrix of non-negative distances with a
//! zero diagonal. Unobserved entries hold the missing marker, the scalar's
//! NaN, which never compares equal to itself and propagates through
//! arithmetic, so it cannot be mistaken for a real distance.
//!
//! Pairs are addressed through the upper triangle: `(i, j)` with `i < j`,
//! enumerated in ascending row then ascending column order.
//!
//! # Reference sets
//!
//! The reference set of a pair `(i, j)` is every third index `k` for which
//! both `(i, k)` and `(j, k)` are known. It is derived on demand and never
//! stored, since filling one entry can enlarge the reference set of others.

use crate::{
    error::{MatrixError, Result},
    types::{DMatrix, Pair, Scalar},
};
use log::debug;
use num_traits::Float;

/// Missing marker for `f64` matrices.
pub const MISSING: f64 = f64::NAN;

/// Returns the missing marker for the scalar type.
#[inline]
pub fn missing<T: Scalar>() -> T {
    <T as Float>::nan()
}

/// Returns true if the value is the missing marker.
#[inline]
pub fn is_missing<T: Scalar>(value: T) -> bool {
    Float::is_nan(value)
}

/// Returns an error unless the matrix is square.
pub fn ensure_square<T: Scalar>(matrix: &DMatrix<T>) -> Result<()> {
    if matrix.is_square() {
        Ok(())
    } else {
        Err(MatrixError::not_square(matrix.nrows(), matrix.ncols()))
    }
}

/// Returns a copy of the matrix with the diagonal set to zero.
pub fn with_zero_diagonal<T: Scalar>(matrix: &DMatrix<T>) -> DMatrix<T> {
    let mut result = matrix.clone();
    let n = result.nrows().min(result.ncols());
    for i in 0..n {
        result[(i, i)] = T::zero();
    }
    result
}

/// Overwrites the lower triangle with the upper triangle.
pub fn mirror_upper<T: Scalar>(matrix: &mut DMatrix<T>) {
    let n = matrix.nrows().min(matrix.ncols());
    for i in 0..n {
        for j in (i + 1)..n {
            matrix[(j, i)] = matrix[(i, j)];
        }
    }
}

/// Lists the missing upper-triangle pairs in ascending row, then column order.
pub fn missing_upper_pairs<T: Scalar>(matrix: &DMatrix<T>) -> Vec<Pair> {
    let n = matrix.nrows();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if is_missing(matrix[(i, j)]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Counts the missing upper-triangle pairs.
pub fn count_missing_upper<T: Scalar>(matrix: &DMatrix<T>) -> usize {
    let n = matrix.nrows();
    (0..n)
        .map(|i| {
            ((i + 1)..n)
                .filter(|&j| is_missing(matrix[(i, j)]))
                .count()
        })
        .sum()
}

/// Counts the known off-diagonal entries of every row.
pub fn known_per_row<T: Scalar>(matrix: &DMatrix<T>) -> Vec<usize> {
    matrix
        .row_iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(j, &value)| j != i && !is_missing(value))
                .count()
        })
        .collect()
}

/// Iterates over the reference indices of the pair `(i, j)`.
///
/// A reference index `k` differs from both `i` and `j`, and both `(i, k)` and
/// `(j, k)` are known in the current state of the matrix.
pub fn reference_indices<T: Scalar>(
    matrix: &DMatrix<T>,
    i: usize,
    j: usize,
) -> impl Iterator<Item = usize> + '_ {
    (0..matrix.ncols()).filter(move |&k| {
        k != i && k != j && !is_missing(matrix[(i, k)]) && !is_missing(matrix[(j, k)])
    })
}

/// Collects the known distances `(a_k, b_k) = (d(i, k), d(j, k))` for every
/// reference index `k` of the pair `(i, j)` into `out`.
///
/// The buffer is cleared first so it can be reused across pairs.
pub fn reference_distances_into<T: Scalar>(
    matrix: &DMatrix<T>,
    i: usize,
    j: usize,
    out: &mut Vec<(T, T)>,
) {
    out.clear();
    out.extend(reference_indices(matrix, i, j).map(|k| (matrix[(i, k)], matrix[(j, k)])));
}

/// Returns true if the matrix is square and both triangles agree.
///
/// Missing entries must be mirrored by missing entries; known entries must
/// match within `tolerance`.
pub fn is_symmetric<T: Scalar>(matrix: &DMatrix<T>, tolerance: T) -> bool {
    matrix.is_square() && first_asymmetry(matrix, tolerance).is_none()
}

fn first_asymmetry<T: Scalar>(matrix: &DMatrix<T>, tolerance: T) -> Option<Pair> {
    let n = matrix.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let upper = matrix[(i, j)];
            let lower = matrix[(j, i)];
            let agrees = match (is_missing(upper), is_missing(lower)) {
                (true, true) => true,
                (false, false) => Float::abs(upper - lower) <= tolerance,
                _ => false,
            };
            if !agrees {
                return Some((i, j));
            }
        }
    }
    None
}

/// Validates a matrix before completion.
///
/// Checks, in order:
/// 1. the matrix is square;
/// 2. every known off-diagonal entry is finite and non-negative;
/// 3. both triangles agree within `symmetry_tolerance` (skipped when `None`);
/// 4. every row has at least `min_known_per_row` known off-diagonal entries.
///
/// The diagonal is ignored since completion forces it to zero.
pub fn validate_distance_matrix<T: Scalar>(
    matrix: &DMatrix<T>,
    min_known_per_row: usize,
    symmetry_tolerance: Option<T>,
) -> Result<()> {
    ensure_square(matrix)?;
    let n = matrix.nrows();

    for i in 0..n {
        for j in 0..n {
            let value = matrix[(i, j)];
            if i == j || is_missing(value) {
                continue;
            }
            if !Float::is_finite(value) || value < T::zero() {
                return Err(MatrixError::invalid_entry(i, j, Scalar::to_f64(value)));
            }
        }
    }

    if let Some(tolerance) = symmetry_tolerance {
        if let Some((i, j)) = first_asymmetry(matrix, tolerance) {
            return Err(MatrixError::asymmetric(
                i,
                j,
                Scalar::to_f64(matrix[(i, j)]),
                Scalar::to_f64(matrix[(j, i)]),
            ));
        }
    }

    for (row, known) in known_per_row(matrix).into_iter().enumerate() {
        if known < min_known_per_row {
            debug!("Rejecting matrix: row {row} has {known} known entries (need {min_known_per_row})");
            return Err(MatrixError::insufficient_known_entries(
                row,
                known,
                min_known_per_row,
            ));
        }
    }

    Ok(())
}

/// Expands a condensed distance vector into a square matrix.
///
/// The condensed form lists the upper triangle row by row: `d(0,1), d(0,2),
/// ..., d(0,n-1), d(1,2), ...`. Missing markers are carried over to both
/// triangles and the diagonal is zero.
pub fn from_condensed<T: Scalar>(condensed: &[T]) -> Result<DMatrix<T>> {
    let len = condensed.len();
    let n = condensed_size(len).ok_or(MatrixError::InvalidCondensedLength { len })?;

    let mut matrix = DMatrix::from_element(n, n, T::zero());
    let mut values = condensed.iter().copied();
    for i in 0..n {
        for j in (i + 1)..n {
            let value = values.next().ok_or(MatrixError::InvalidCondensedLength { len })?;
            matrix[(i, j)] = value;
            matrix[(j, i)] = value;
        }
    }
    Ok(matrix)
}

/// Flattens the upper triangle of a square matrix into condensed form.
pub fn to_condensed<T: Scalar>(matrix: &DMatrix<T>) -> Result<Vec<T>> {
    ensure_square(matrix)?;
    let n = matrix.nrows();
    let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            condensed.push(matrix[(i, j)]);
        }
    }
    Ok(condensed)
}

/// Solves `n * (n - 1) / 2 == len` for `n`.
fn condensed_size(len: usize) -> Option<usize> {
    let estimate = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    (estimate.saturating_sub(1)..=estimate + 1).find(|&n| n >= 1 && n * (n - 1) / 2 == len)
}
