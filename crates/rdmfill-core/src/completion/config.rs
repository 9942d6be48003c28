//! Configuration of a completion run.

use crate::{
    error::{CompletionError, CompletionResult},
    types::Scalar,
};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conditions applied before and during a completion.
///
/// # Validation
/// - **min_known_per_row**: every row must have at least this many known
///   off-diagonal entries before estimation starts. A row with fewer can
///   never be triangulated against other indices.
/// - **symmetry_tolerance**: maximum allowed difference between (i, j) and
///   (j, i). With `None` the upper triangle is authoritative and is
///   mirrored into the lower triangle.
///
/// # Termination
/// Completion always stops once the count of missing entries reaches zero
/// or stops decreasing between passes. `max_passes` adds an optional
/// budget on top of that.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompletionConfig<T> {
    /// Minimum number of known off-diagonal entries per row
    pub min_known_per_row: usize,

    /// Maximum number of estimation passes
    pub max_passes: Option<usize>,

    /// Tolerance when checking that both triangles agree
    pub symmetry_tolerance: Option<T>,
}

impl<T: Scalar> Default for CompletionConfig<T> {
    fn default() -> Self {
        Self {
            min_known_per_row: 2,
            max_passes: None,
            symmetry_tolerance: Some(T::SYMMETRY_TOLERANCE),
        }
    }
}

impl<T: Scalar> CompletionConfig<T> {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of known entries per row.
    pub fn with_min_known_per_row(mut self, min_known: usize) -> Self {
        self.min_known_per_row = min_known;
        self
    }

    /// Sets the maximum number of passes.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Sets the symmetry tolerance.
    pub fn with_symmetry_tolerance(mut self, tol: T) -> Self {
        self.symmetry_tolerance = Some(tol);
        self
    }

    /// Trusts the upper triangle instead of checking symmetry.
    pub fn with_upper_triangle_only(mut self) -> Self {
        self.symmetry_tolerance = None;
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> CompletionResult<()> {
        if self.min_known_per_row == 0 {
            return Err(CompletionError::invalid_configuration(
                "must be at least 1",
                "min_known_per_row",
                "0",
            ));
        }
        if self.max_passes == Some(0) {
            return Err(CompletionError::invalid_configuration(
                "must allow at least one pass",
                "max_passes",
                "0",
            ));
        }
        if let Some(tol) = self.symmetry_tolerance {
            if !Float::is_finite(tol) || tol < T::zero() {
                return Err(CompletionError::invalid_configuration(
                    "must be finite and non-negative",
                    "symmetry_tolerance",
                    tol.to_string(),
                ));
            }
        }
        Ok(())
    }
}
