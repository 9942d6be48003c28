//! Iterative completion of partially observed dissimilarity matrices.
//!
//! # Algorithm
//!
//! The engine zeroes the diagonal of a private copy `Y` of the input and
//! repeats passes over the missing pairs:
//!
//! 1. **Enumerate**: list the missing upper-triangle pairs `(i, j)`, `i < j`
//! 2. **Stop**: when none are left, or when the count did not decrease
//!    since the previous pass (stagnation)
//! 3. **Estimate**: visit the pairs in ascending row then column order;
//!    collect the reference distances from the current `Y` and write the
//!    estimate to `Y[i,j]` and `Y[j,i]` together
//!
//! Estimates written earlier in a pass are visible to later pairs of the
//! same pass, so information propagates across several missing entries in
//! one sweep. Passes are therefore strictly sequential.
//!
//! # Termination
//!
//! Every pass except the last fills at least one pair, so the number of
//! passes is bounded by the number of missing pairs. One pass costs
//! O(missing × N).
//!
//! # Partial results
//!
//! A pair whose reference set stays empty is left missing. This happens
//! for isolated structures, e.g. two groups of indices with no known
//! distance between them. It is reported through
//! [`Completion::remaining`] and [`TerminationReason::Stagnated`], not as
//! an error.

use crate::estimator::{PairEstimator, PooledMedian};
use log::{debug, info, trace, warn};
use rdmfill_core::{
    completion::{
        Completion, CompletionCallback, CompletionConfig, NoOpCallback, PairEstimate,
        PairSkipped, PassSummary, TerminationReason,
    },
    error::CompletionResult,
    matrix::{
        count_missing_upper, ensure_square, mirror_upper, missing_upper_pairs,
        reference_distances_into, validate_distance_matrix, with_zero_diagonal,
    },
    types::{DMatrix, Pair, Scalar},
};
use std::marker::PhantomData;
use std::time::Instant;

/// Completion engine for dissimilarity matrices.
///
/// Holds a [`CompletionConfig`] and a [`PairEstimator`]. The engine keeps no
/// state between calls, so one instance can complete any number of
/// matrices, also from several threads.
///
/// # Example
///
/// ```rust
/// use rdmfill_core::{matrix::MISSING, types::DMatrix};
/// use rdmfill_engine::Completer;
///
/// let input = DMatrix::from_row_slice(4, 4, &[
///     0.0, 1.0, MISSING, 2.0,
///     1.0, 0.0, 1.5, MISSING,
///     MISSING, 1.5, 0.0, 1.2,
///     2.0, MISSING, 1.2, 0.0,
/// ]);
///
/// let completion = Completer::new().complete(&input).unwrap();
/// assert!(completion.is_complete());
/// assert_eq!(completion.matrix[(0, 2)], completion.matrix[(2, 0)]);
/// ```
#[derive(Debug, Clone)]
pub struct Completer<T: Scalar, E = PooledMedian> {
    config: CompletionConfig<T>,
    estimator: E,
    _phantom: PhantomData<T>,
}

impl<T: Scalar> Completer<T, PooledMedian> {
    /// Creates an engine with the default configuration and the pooled
    /// median estimator.
    pub fn new() -> Self {
        Self {
            config: CompletionConfig::default(),
            estimator: PooledMedian,
            _phantom: PhantomData,
        }
    }
}

impl<T: Scalar> Default for Completer<T, PooledMedian> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Completer<T, E>
where
    T: Scalar,
    E: PairEstimator<T>,
{
    /// Replaces the configuration.
    pub fn with_config(mut self, config: CompletionConfig<T>) -> Self {
        self.config = config;
        self
    }

    /// Replaces the estimator.
    pub fn with_estimator<F: PairEstimator<T>>(self, estimator: F) -> Completer<T, F> {
        Completer {
            config: self.config,
            estimator,
            _phantom: PhantomData,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CompletionConfig<T> {
        &self.config
    }

    /// Returns the estimator.
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Completes a matrix without progress reporting.
    pub fn complete(&self, matrix: &DMatrix<T>) -> CompletionResult<Completion<T>> {
        self.complete_with_callback(matrix, &mut NoOpCallback)
    }

    /// Completes a matrix, reporting progress to `callback`.
    ///
    /// # Errors
    ///
    /// Returns an error, before any estimation, if the configuration is
    /// invalid or the matrix fails validation (not square, negative or
    /// infinite entries, asymmetric, or a row with too few known entries).
    /// Errors returned by the callback are propagated.
    pub fn complete_with_callback<C>(
        &self,
        matrix: &DMatrix<T>,
        callback: &mut C,
    ) -> CompletionResult<Completion<T>>
    where
        C: CompletionCallback<T> + ?Sized,
    {
        let start = Instant::now();
        let mut working = self.prepare(matrix)?;
        let size = working.nrows();
        let initial_missing = count_missing_upper(&working);

        info!(
            "Completing {size}x{size} matrix with {initial_missing} missing pairs using {}",
            self.estimator.name()
        );
        callback.on_completion_start(size, initial_missing)?;

        let mut passes = 0;
        let mut previous_missing: Option<usize> = None;
        let termination_reason = loop {
            let pairs = missing_upper_pairs(&working);
            let missing = pairs.len();

            if missing == 0 {
                break TerminationReason::Complete;
            }
            if previous_missing.is_some_and(|previous| missing >= previous) {
                break TerminationReason::Stagnated;
            }
            if self.config.max_passes.is_some_and(|max| passes >= max) {
                break TerminationReason::MaxPasses;
            }

            previous_missing = Some(missing);
            passes += 1;
            callback.on_pass_start(passes, missing)?;
            self.run_pass(&mut working, passes, &pairs, callback)?;

            let summary = PassSummary {
                pass: passes,
                missing_before: missing,
                missing_after: count_missing_upper(&working),
            };
            info!(
                "Pass {}: filled {} of {} missing pairs",
                summary.pass,
                summary.filled(),
                summary.missing_before
            );
            if !callback.on_pass_end(&summary)? {
                break TerminationReason::CallbackRequest;
            }
        };

        let remaining = missing_upper_pairs(&working);
        if termination_reason == TerminationReason::Stagnated {
            warn!(
                "No progress in reducing missing entries; {} pairs have no reference and stay missing",
                remaining.len()
            );
        }
        info!(
            "Completion finished after {passes} passes ({termination_reason:?}), {} of {initial_missing} pairs filled",
            initial_missing - remaining.len()
        );

        let completion = Completion::new(
            working,
            passes,
            initial_missing,
            remaining,
            start.elapsed(),
            termination_reason,
        );
        callback.on_completion_end(&completion)?;
        Ok(completion)
    }

    /// Builds the working copy and validates it.
    fn prepare(&self, matrix: &DMatrix<T>) -> CompletionResult<DMatrix<T>> {
        self.config.validate()?;
        ensure_square(matrix)?;

        let mut working = with_zero_diagonal(matrix);
        if self.config.symmetry_tolerance.is_none() {
            mirror_upper(&mut working);
        }
        validate_distance_matrix(
            &working,
            self.config.min_known_per_row,
            self.config.symmetry_tolerance,
        )?;
        // Triangles may differ within tolerance; the upper one wins.
        mirror_upper(&mut working);
        Ok(working)
    }

    /// Visits every pair once, in order, writing estimates in place.
    fn run_pass<C>(
        &self,
        working: &mut DMatrix<T>,
        pass: usize,
        pairs: &[Pair],
        callback: &mut C,
    ) -> CompletionResult<()>
    where
        C: CompletionCallback<T> + ?Sized,
    {
        let total = pairs.len();
        let mut references = Vec::with_capacity(working.nrows());

        for (idx, &(row, col)) in pairs.iter().enumerate() {
            let position = idx + 1;
            reference_distances_into(working, row, col, &mut references);

            match self.estimator.estimate(&references) {
                Some(value) => {
                    working[(row, col)] = value;
                    working[(col, row)] = value;
                    debug!(
                        "{position}/{total} Estimated ({row},{col}) and ({col},{row}) with {value:.4} using {} references",
                        references.len()
                    );
                    callback.on_pair_estimated(&PairEstimate {
                        pass,
                        position,
                        total,
                        row,
                        col,
                        value,
                        references: references.len(),
                    })?;
                }
                None => {
                    trace!("{position}/{total} No references available for ({row},{col})");
                    callback.on_pair_skipped(&PairSkipped {
                        pass,
                        position,
                        total,
                        row,
                        col,
                    })?;
                }
            }
        }
        Ok(())
    }
}
