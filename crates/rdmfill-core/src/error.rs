//! Error types for distance-matrix completion.
//!
//! This module defines the error types raised while validating an input
//! matrix and while configuring or running a completion.

use thiserror::Error;

/// Errors raised while inspecting or validating a distance matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The matrix is not square.
    #[error("Distance matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// A row has too few known off-diagonal entries.
    ///
    /// Every pair involving such a row needs references to other indices,
    /// so the row can never receive an estimate.
    #[error("Row {row} has {known} known off-diagonal entries, at least {required} required")]
    InsufficientKnownEntries {
        /// Index of the offending row
        row: usize,
        /// Number of known off-diagonal entries in the row
        known: usize,
        /// Minimum number of known entries per row
        required: usize,
    },

    /// A known entry is negative or infinite.
    #[error("Entry ({row}, {col}) is not a valid distance: {value}")]
    InvalidEntry {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Offending value
        value: f64,
    },

    /// The entries (row, col) and (col, row) disagree.
    ///
    /// Either one side is missing while the other is known, or both are
    /// known but differ by more than the symmetry tolerance.
    #[error("Entries ({row}, {col}) = {upper} and ({col}, {row}) = {lower} are not symmetric")]
    Asymmetric {
        /// Row index in the upper triangle
        row: usize,
        /// Column index in the upper triangle
        col: usize,
        /// Value stored at (row, col)
        upper: f64,
        /// Value stored at (col, row)
        lower: f64,
    },

    /// A condensed vector does not have a triangular length.
    #[error("Condensed distance vector of length {len} does not describe a square matrix")]
    InvalidCondensedLength {
        /// Length of the condensed vector
        len: usize,
    },
}

impl MatrixError {
    /// Create a NotSquare error.
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Create an InsufficientKnownEntries error.
    pub fn insufficient_known_entries(row: usize, known: usize, required: usize) -> Self {
        Self::InsufficientKnownEntries {
            row,
            known,
            required,
        }
    }

    /// Create an InvalidEntry error.
    pub fn invalid_entry(row: usize, col: usize, value: f64) -> Self {
        Self::InvalidEntry { row, col, value }
    }

    /// Create an Asymmetric error.
    pub fn asymmetric(row: usize, col: usize, upper: f64, lower: f64) -> Self {
        Self::Asymmetric {
            row,
            col,
            upper,
            lower,
        }
    }
}

/// Errors that can occur while configuring or running a completion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    /// Invalid completion configuration.
    #[error("Invalid completion configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// The input matrix was rejected before any estimation began.
    #[error("Invalid input matrix: {0}")]
    Matrix(#[from] MatrixError),
}

impl CompletionError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for operations that can produce MatrixError.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Result type alias for completion operations.
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;
