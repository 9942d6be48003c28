//! Property-based tests for the completion engine.
//!
//! Random planar point sets are turned into distance matrices, a random
//! subset of pairs is removed, and the completed matrix is checked for the
//! invariants every completion must satisfy.

use proptest::prelude::*;
use rdmfill_core::{
    error::{CompletionError, MatrixError},
    matrix::{is_missing, MISSING},
    test_utils::planar_distances,
    types::DMatrix,
};
use rdmfill_engine::{Completer, Completion};

/// Point sets of 4 to 12 planar points plus a removal flag per pair.
fn masked_matrix() -> impl Strategy<Value = DMatrix<f64>> {
    prop::collection::vec((-10.0_f64..10.0, -10.0_f64..10.0), 4..12).prop_flat_map(|points| {
        let n = points.len();
        let pairs = n * (n - 1) / 2;
        (Just(points), prop::collection::vec(prop::bool::weighted(0.35), pairs))
    })
    .prop_map(|(points, removed)| {
        let points: Vec<[f64; 2]> = points.into_iter().map(|(x, y)| [x, y]).collect();
        let mut matrix = planar_distances(&points);
        let n = matrix.nrows();
        let mut flags = removed.into_iter();
        for i in 0..n {
            for j in (i + 1)..n {
                if flags.next().unwrap_or(false) {
                    matrix[(i, j)] = MISSING;
                    matrix[(j, i)] = MISSING;
                }
            }
        }
        matrix
    })
}

/// Completes the matrix, discarding inputs rejected for sparse rows.
fn complete_or_reject(input: &DMatrix<f64>) -> Option<Completion<f64>> {
    match Completer::new().complete(input) {
        Ok(completion) => Some(completion),
        Err(CompletionError::Matrix(MatrixError::InsufficientKnownEntries { .. })) => None,
        Err(other) => panic!("unexpected error: {other}"),
    }
}

fn same_entries(a: &DMatrix<f64>, b: &DMatrix<f64>) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (is_missing(*x) && is_missing(*y)) || x == y)
}

/// Perturbs every known lower-triangle entry by less than the default
/// symmetry tolerance.
fn jitter_lower(matrix: &DMatrix<f64>, offsets: &[f64]) -> DMatrix<f64> {
    let mut jittered = matrix.clone();
    let n = matrix.nrows();
    let mut offsets = offsets.iter().cycle();
    for i in 0..n {
        for j in 0..i {
            let offset = offsets.next().copied().unwrap_or(0.0);
            if !is_missing(jittered[(i, j)]) {
                jittered[(i, j)] += offset;
            }
        }
    }
    jittered
}

proptest! {
    #[test]
    fn prop_near_symmetric_input_gives_symmetric_output(
        input in masked_matrix(),
        offsets in prop::collection::vec(0.0_f64..5e-11, 1..16),
    ) {
        let jittered = jitter_lower(&input, &offsets);
        if let Some(completion) = complete_or_reject(&jittered) {
            let m = &completion.matrix;
            let n = m.nrows();
            for i in 0..n {
                for j in (i + 1)..n {
                    let (a, b) = (m[(i, j)], m[(j, i)]);
                    prop_assert!((is_missing(a) && is_missing(b)) || a == b);
                    if !is_missing(input[(i, j)]) {
                        prop_assert_eq!(a, input[(i, j)]);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_output_is_symmetric_with_zero_diagonal(input in masked_matrix()) {
        if let Some(completion) = complete_or_reject(&input) {
            let m = &completion.matrix;
            let n = m.nrows();
            for i in 0..n {
                prop_assert_eq!(m[(i, i)], 0.0);
                for j in 0..n {
                    let (a, b) = (m[(i, j)], m[(j, i)]);
                    prop_assert!((is_missing(a) && is_missing(b)) || a == b);
                }
            }
        }
    }

    #[test]
    fn prop_filled_entries_are_finite_and_non_negative(input in masked_matrix()) {
        if let Some(completion) = complete_or_reject(&input) {
            for &value in completion.matrix.iter() {
                prop_assert!(is_missing(value) || (value.is_finite() && value >= 0.0));
            }
        }
    }

    #[test]
    fn prop_known_entries_are_preserved(input in masked_matrix()) {
        if let Some(completion) = complete_or_reject(&input) {
            let n = input.nrows();
            for i in 0..n {
                for j in 0..n {
                    if i != j && !is_missing(input[(i, j)]) {
                        prop_assert_eq!(completion.matrix[(i, j)], input[(i, j)]);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_remaining_pairs_have_no_reference(input in masked_matrix()) {
        if let Some(completion) = complete_or_reject(&input) {
            let m = &completion.matrix;
            for &(i, j) in &completion.remaining {
                prop_assert!(is_missing(m[(i, j)]));
                let has_reference = (0..m.nrows()).any(|k| {
                    k != i && k != j && !is_missing(m[(i, k)]) && !is_missing(m[(j, k)])
                });
                prop_assert!(!has_reference);
            }
            prop_assert!(completion.passes <= completion.initial_missing.max(1));
        }
    }

    #[test]
    fn prop_completion_is_idempotent(input in masked_matrix()) {
        if let Some(first) = complete_or_reject(&input) {
            let second = Completer::new().complete(&first.matrix).unwrap();
            prop_assert!(same_entries(&first.matrix, &second.matrix));
            prop_assert_eq!(second.filled(), 0);
        }
    }
}
