//! Core types for completing partially observed dissimilarity matrices.
//!
//! This crate provides the foundations shared by the completion engine:
//! the scalar trait and matrix aliases, the missing-entry marker, input
//! validation, reference-set queries, and the configuration, result and
//! progress-callback types of a completion run.
//!
//! # Key Concepts
//!
//! - **Dissimilarity matrix**: symmetric N×N matrix of non-negative
//!   distances with a zero diagonal
//! - **Missing marker**: NaN, standing for an unobserved entry
//! - **Reference index**: a third item `k` with both `d(i, k)` and `d(j, k)`
//!   known, used to triangulate `d(i, j)`
//! - **Stagnation**: a pass that fills nothing, after which the remaining
//!   entries can never be estimated
//!
//! # Modules
//!
//! - [`completion`]: Configuration, results and progress callbacks
//! - [`error`]: Error types for validation and completion
//! - [`matrix`]: Missing marker, validation and reference sets
//! - [`types`]: Scalar trait, type aliases and numerical constants

pub mod completion;
pub mod error;
pub mod matrix;
pub mod types;
pub mod utils;

// Re-export commonly used items at the crate root
pub use error::{CompletionError, CompletionResult, MatrixError, Result};

#[cfg(feature = "test-utils")]
pub use utils::test_utils;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rdmfill_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::completion::{
        Completion, CompletionCallback, CompletionConfig, NoOpCallback, PairEstimate,
        PairSkipped, PassSummary, PrintProgressCallback, ProgressEvent, RecordingCallback,
        TerminationReason,
    };
    pub use crate::error::{CompletionError, CompletionResult, MatrixError, Result};
    pub use crate::matrix::{is_missing, missing, MISSING};
    pub use crate::types::{constants, DMatrix, DVector, Pair, Scalar};
}
