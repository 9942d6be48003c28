//! Outcome of a completion run.

use crate::types::{DMatrix, Pair, Scalar};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reasons a completion stopped.
///
/// - **Complete**: no missing entry remains
/// - **Stagnated**: a pass failed to reduce the missing count; the remaining
///   entries have no reference index and never will
/// - **MaxPasses**: the configured pass budget ran out
/// - **CallbackRequest**: a progress callback asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// Every off-diagonal entry is known
    Complete,
    /// The missing count stopped decreasing
    Stagnated,
    /// Pass budget exhausted
    MaxPasses,
    /// Progress callback requested early termination
    CallbackRequest,
}

/// Result of completing a dissimilarity matrix.
///
/// The matrix is symmetric with a zero diagonal. Entries listed in
/// `remaining` are still missing; every other entry is known.
#[derive(Debug, Clone)]
pub struct Completion<T>
where
    T: Scalar,
{
    /// The completed matrix
    pub matrix: DMatrix<T>,

    /// Number of estimation passes performed
    pub passes: usize,

    /// Missing upper-triangle pairs before the first pass
    pub initial_missing: usize,

    /// Pairs that still have no estimate, in ascending row then column order
    pub remaining: Vec<Pair>,

    /// Wall-clock time spent in the completion
    pub duration: Duration,

    /// Why the completion stopped
    pub termination_reason: TerminationReason,
}

impl<T> Completion<T>
where
    T: Scalar,
{
    /// Creates a new completion result.
    pub fn new(
        matrix: DMatrix<T>,
        passes: usize,
        initial_missing: usize,
        remaining: Vec<Pair>,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            matrix,
            passes,
            initial_missing,
            remaining,
            duration,
            termination_reason,
        }
    }

    /// Number of pairs that received an estimate.
    pub fn filled(&self) -> usize {
        self.initial_missing - self.remaining.len()
    }

    /// True if no entry is left missing.
    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Consumes the result and returns the matrix.
    pub fn into_matrix(self) -> DMatrix<T> {
        self.matrix
    }
}
