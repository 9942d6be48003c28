//! Reconstruction accuracy on synthetic planar distance matrices.
//!
//! Distances between random points in the plane are masked at increasing
//! fractions and completed. The correlation between the completed and the
//! true distances must be high when few entries are missing and must
//! degrade as more are removed.

use rand::{rngs::StdRng, SeedableRng};
use rdmfill_core::{
    matrix::to_condensed,
    test_utils::{mask_random, pearson_correlation, random_planar_distances},
    types::DMatrix,
};
use rdmfill_engine::Completer;

/// Correlation between the truth and the completion of a masked copy.
fn reconstruction_accuracy(truth: &DMatrix<f64>, fraction: f64, seed: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    let masked = mask_random(truth, fraction, &mut rng);
    let completion = Completer::new().complete(&masked).unwrap();

    let expected = to_condensed(truth).unwrap();
    let actual = to_condensed(&completion.matrix).unwrap();
    pearson_correlation(&expected, &actual).unwrap()
}

#[test]
fn test_accuracy_is_high_with_few_missing_entries() {
    let truth = random_planar_distances(100, 1);
    let accuracy = reconstruction_accuracy(&truth, 0.05, 2);
    assert!(accuracy > 0.95, "accuracy {accuracy} too low at 5% missing");
}

#[test]
fn test_accuracy_degrades_with_missing_fraction() {
    let truth = random_planar_distances(100, 1);

    let low = reconstruction_accuracy(&truth, 0.05, 2);
    let high = reconstruction_accuracy(&truth, 0.7, 2);

    assert!(high < low, "accuracy {high} at 70% should be below {low} at 5%");
    assert!(high > 0.0);
}

#[test]
fn test_completion_fills_everything_at_moderate_fractions() {
    let truth = random_planar_distances(60, 4);
    for (step, fraction) in [0.1, 0.3, 0.5].into_iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(100 + step as u64);
        let masked = mask_random(&truth, fraction, &mut rng);
        let completion = Completer::new().complete(&masked).unwrap();
        assert!(completion.is_complete(), "entries left missing at {fraction}");
    }
}
