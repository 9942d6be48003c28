//! Completion of many independent matrices.
//!
//! Completions share no state, so independent matrices can be processed in
//! parallel. Each matrix is still completed sequentially, pass by pass.

use crate::{completer::Completer, estimator::PairEstimator};
use rdmfill_core::{
    completion::Completion,
    error::CompletionResult,
    types::{DMatrix, Scalar},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl<T, E> Completer<T, E>
where
    T: Scalar,
    E: PairEstimator<T>,
{
    /// Completes every matrix, in parallel when the `parallel` feature is
    /// enabled.
    ///
    /// Results are returned in input order. A matrix that fails validation
    /// yields an error in its slot without affecting the others.
    pub fn complete_many(&self, matrices: &[DMatrix<T>]) -> Vec<CompletionResult<Completion<T>>> {
        #[cfg(feature = "parallel")]
        {
            matrices.par_iter().map(|matrix| self.complete(matrix)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            matrices.iter().map(|matrix| self.complete(matrix)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdmfill_core::matrix::MISSING;

    #[test]
    fn test_complete_many_keeps_order() {
        let good = DMatrix::from_row_slice(
            4,
            4,
            &[
                0.0, 1.0, MISSING, 2.0, //
                1.0, 0.0, 1.5, MISSING, //
                MISSING, 1.5, 0.0, 1.2, //
                2.0, MISSING, 1.2, 0.0,
            ],
        );
        let bad = DMatrix::from_element(3, 3, MISSING);
        let inputs = vec![good.clone(), bad, good];

        let completer = Completer::<f64>::new();
        let results = completer.complete_many(&inputs);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());

        let first = results[0].as_ref().unwrap();
        let last = results[2].as_ref().unwrap();
        assert_eq!(first.matrix, last.matrix);
    }
}
