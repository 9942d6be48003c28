//! # rdmfill
//!
//! Fills missing entries of representational dissimilarity matrices (RDMs)
//! by triangulating each unobserved distance from the distances both of its
//! items have to a shared reference item.
//!
//! ## Overview
//!
//! For a missing pair `(i, j)`, every item `k` with `d(i, k)` and `d(j, k)`
//! known yields two candidate distances: one assuming a right angle at `k`
//! and one assuming `i`, `j` and `k` are collinear. The median of all
//! candidates becomes the estimate. Passes repeat until every entry is
//! filled or a pass makes no progress, in which case the entries with no
//! chain of references stay missing.
//!
//! ## Quick Start
//!
//! ```rust
//! use rdmfill::prelude::*;
//!
//! let input = DMatrix::from_row_slice(4, 4, &[
//!     0.0, 1.0, MISSING, 2.0,
//!     1.0, 0.0, 1.5, MISSING,
//!     MISSING, 1.5, 0.0, 1.2,
//!     2.0, MISSING, 1.2, 0.0,
//! ]);
//!
//! let filled = rdmfill::complete(&input, false).unwrap();
//! assert!(filled.iter().all(|d| !d.is_nan()));
//! assert_eq!(filled[(0, 2)], filled[(2, 0)]);
//! ```
//!
//! ## Crate Organization
//!
//! - [`rdmfill_core`]: Matrix inspection, validation, configuration, results and callbacks
//! - [`rdmfill_engine`]: Estimators and the completion engine
//!
//! ## Features
//!
//! - `parallel` (default): complete batches of matrices with rayon
//! - `serde`: serialization of configurations and termination reasons
//! - `full`: all of the above

// Re-export core functionality
pub use rdmfill_core::*;

// Re-export the engine
pub use rdmfill_engine::{
    collinear, median, right_angle, weighted_median, Collinear, Completer, PairEstimator,
    PooledMedian, RightAngle, WeightedPooledMedian,
};

/// Linear algebra backend used for matrices.
pub use nalgebra;

use rdmfill_core::{
    completion::{Completion, CompletionConfig, NoOpCallback, PrintProgressCallback},
    types::{DMatrix, Scalar},
};

/// Completes a dissimilarity matrix with the default settings.
///
/// Missing entries are marked with NaN. The diagonal is treated as zero and
/// the input is left untouched. With `verbose` set, one line is printed per
/// visited pair and per pass; it has no effect on the result.
///
/// Entries that no chain of references reaches are returned as NaN.
///
/// # Errors
///
/// Fails before any estimation if the matrix is not square, holds a
/// negative or infinite entry, is not symmetric, or has a row with fewer
/// than two known off-diagonal entries.
pub fn complete(matrix: &DMatrix<f64>, verbose: bool) -> CompletionResult<DMatrix<f64>> {
    complete_with_config(matrix, CompletionConfig::default(), verbose)
}

/// Completes a dissimilarity matrix with an explicit configuration.
///
/// Works for both `f32` and `f64` matrices.
pub fn complete_with_config<T: Scalar>(
    matrix: &DMatrix<T>,
    config: CompletionConfig<T>,
    verbose: bool,
) -> CompletionResult<DMatrix<T>> {
    complete_detailed(matrix, config, verbose).map(Completion::into_matrix)
}

/// Like [`complete_with_config`] but returns the whole [`Completion`]
/// record: passes, pairs left missing and the reason the run stopped.
pub fn complete_detailed<T: Scalar>(
    matrix: &DMatrix<T>,
    config: CompletionConfig<T>,
    verbose: bool,
) -> CompletionResult<Completion<T>> {
    let completer = Completer::new().with_config(config);
    if verbose {
        completer.complete_with_callback(matrix, &mut PrintProgressCallback::new())
    } else {
        completer.complete_with_callback(matrix, &mut NoOpCallback)
    }
}

/// Prelude module for convenient imports.
///
/// ```
/// use rdmfill::prelude::*;
/// ```
pub mod prelude {
    pub use rdmfill_core::prelude::*;
    pub use rdmfill_engine::{
        Collinear, Completer, PairEstimator, PooledMedian, RightAngle, WeightedPooledMedian,
    };

    pub use crate::{complete, complete_detailed, complete_with_config};
}
