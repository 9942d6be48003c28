//! rdmfill engine - fills missing entries of dissimilarity matrices.
//!
//! This crate implements the completion engine on top of the types from
//! `rdmfill-core`. Missing distances are triangulated from reference
//! indices whose distances to both ends of the pair are known, pass after
//! pass, until every entry is filled or no further entry can be.
//!
//! # Available Estimators
//!
//! - **PooledMedian**: median of the pooled right-angle and collinear
//!   estimates (default)
//! - **WeightedPooledMedian**: weighted median with configurable trust in
//!   each hypothesis
//! - **RightAngle** / **Collinear**: single-hypothesis medians
//!
//! # Examples
//!
//! ```rust
//! use rdmfill_core::{completion::CompletionConfig, matrix::MISSING, types::DMatrix};
//! use rdmfill_engine::{Completer, WeightedPooledMedian};
//!
//! let input = DMatrix::from_row_slice(4, 4, &[
//!     0.0, 1.0, MISSING, 2.0,
//!     1.0, 0.0, 1.5, MISSING,
//!     MISSING, 1.5, 0.0, 1.2,
//!     2.0, MISSING, 1.2, 0.0,
//! ]);
//!
//! let completer = Completer::new()
//!     .with_config(CompletionConfig::new().with_max_passes(10))
//!     .with_estimator(WeightedPooledMedian::new(1.0_f64, 2.0).unwrap());
//!
//! let completion = completer.complete(&input).unwrap();
//! assert!(completion.is_complete());
//! ```

pub mod batch;
pub mod completer;
pub mod estimator;

// Re-export the engine and estimators for convenience
pub use completer::Completer;
pub use estimator::{
    collinear, median, right_angle, weighted_median, Collinear, PairEstimator, PooledMedian,
    RightAngle, WeightedPooledMedian,
};

// Re-export commonly used items from core
pub use rdmfill_core::{
    completion::{Completion, CompletionCallback, CompletionConfig, TerminationReason},
    error::{CompletionError, CompletionResult},
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        let _completer = Completer::<f64>::new();
        let _config = CompletionConfig::<f64>::new().with_max_passes(5);
        let _weighted = WeightedPooledMedian::new(1.0_f64, 1.0).unwrap();
        assert_eq!(PairEstimator::<f64>::name(&PooledMedian), "Pooled Median");
    }
}
