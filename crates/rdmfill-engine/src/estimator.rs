//! Estimation rules for a single missing pair.
//!
//! Given the known distances `a_k = d(i, k)` and `b_k = d(j, k)` to every
//! reference index `k`, two triangulation hypotheses bound `d(i, j)`:
//!
//! - **Right angle** at `k`: `d1_k = sqrt(a_k² + b_k²)`, leaning high
//! - **Collinear** `i`, `j`, `k`: `d2_k = sqrt(|a_k² − b_k²|)`, leaning low
//!
//! Either value can be a poor approximation for any single reference. The
//! default [`PooledMedian`] pools both hypotheses across all references and
//! takes the median, which damps outlying references without an explicit
//! quality weighting. The relative trust between the two hypotheses is a
//! policy: [`WeightedPooledMedian`] exposes it, and [`RightAngle`] and
//! [`Collinear`] keep a single hypothesis.
//!
//! # Numerical Stability
//!
//! `d1` is computed with `hypot` and `d2` as `sqrt(|a − b|)·sqrt(a + b)`. Both
//! equal the textbook expressions for non-negative inputs but never square a
//! distance, so large distances do not overflow.

use num_traits::Float;
use rdmfill_core::{
    error::{CompletionError, CompletionResult},
    types::{constants, Scalar},
};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Rule that turns the reference distances of a pair into one estimate.
pub trait PairEstimator<T: Scalar>: Debug + Send + Sync {
    /// Human-readable name of the rule, used in logs.
    fn name(&self) -> &str;

    /// Estimates `d(i, j)` from `(d(i, k), d(j, k))` for every reference `k`.
    ///
    /// Returns `None` when `references` is empty.
    fn estimate(&self, references: &[(T, T)]) -> Option<T>;
}

/// Right-angle estimate `sqrt(a² + b²)`.
#[inline]
pub fn right_angle<T: Scalar>(a: T, b: T) -> T {
    Float::hypot(a, b)
}

/// Collinear estimate `sqrt(|a² − b²|)`.
#[inline]
pub fn collinear<T: Scalar>(a: T, b: T) -> T {
    Float::sqrt(Float::abs(a - b)) * Float::sqrt(a + b)
}

/// Median of a sample, averaging the two middle values for an even count.
///
/// Sorts `values` in place. Returns `None` for an empty sample.
pub fn median<T: Scalar>(values: &mut [T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) * constants::half())
    }
}

/// Weighted median of `(value, weight)` samples.
///
/// Samples with a non-positive weight are dropped. When the cumulative
/// weight lands exactly on half of the total, the two neighbouring values
/// are averaged, so equal weights reproduce [`median`].
pub fn weighted_median<T: Scalar>(samples: &mut Vec<(T, T)>) -> Option<T> {
    samples.retain(|&(_, weight)| weight > T::zero());
    if samples.is_empty() {
        return None;
    }
    samples.sort_unstable_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(Ordering::Equal));

    let total = samples.iter().fold(T::zero(), |acc, &(_, weight)| acc + weight);
    let half = total * constants::half();
    let tol = total * T::EPSILON * <T as Scalar>::from_f64(samples.len() as f64);

    let mut cumulative = T::zero();
    for (idx, &(value, weight)) in samples.iter().enumerate() {
        cumulative = cumulative + weight;
        if Float::abs(cumulative - half) <= tol {
            return Some(
                samples
                    .get(idx + 1)
                    .map_or(value, |&(next, _)| (value + next) * constants::half()),
            );
        }
        if cumulative > half {
            return Some(value);
        }
    }
    samples.last().map(|&(value, _)| value)
}

/// Median over the pooled right-angle and collinear estimates.
///
/// Both hypotheses contribute one value per reference, so they are trusted
/// equally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PooledMedian;

impl<T: Scalar> PairEstimator<T> for PooledMedian {
    fn name(&self) -> &str {
        "Pooled Median"
    }

    fn estimate(&self, references: &[(T, T)]) -> Option<T> {
        let mut pooled: Vec<T> = references
            .iter()
            .flat_map(|&(a, b)| [right_angle(a, b), collinear(a, b)])
            .collect();
        median(&mut pooled)
    }
}

/// Weighted median over the pooled estimates.
///
/// Every right-angle value carries `right_angle_weight` and every collinear
/// value `collinear_weight`. Equal weights give the same result as
/// [`PooledMedian`]; a zero weight removes that hypothesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPooledMedian<T> {
    right_angle_weight: T,
    collinear_weight: T,
}

impl<T: Scalar> WeightedPooledMedian<T> {
    /// Creates a weighted estimator.
    ///
    /// Both weights must be finite and non-negative, and at least one must
    /// be positive.
    pub fn new(right_angle_weight: T, collinear_weight: T) -> CompletionResult<Self> {
        for (name, weight) in [
            ("right_angle_weight", right_angle_weight),
            ("collinear_weight", collinear_weight),
        ] {
            if !Float::is_finite(weight) || weight < T::zero() {
                return Err(CompletionError::invalid_configuration(
                    "weight must be finite and non-negative",
                    name,
                    weight.to_string(),
                ));
            }
        }
        if right_angle_weight + collinear_weight <= T::zero() {
            return Err(CompletionError::invalid_configuration(
                "at least one weight must be positive",
                "right_angle_weight + collinear_weight",
                (right_angle_weight + collinear_weight).to_string(),
            ));
        }
        Ok(Self {
            right_angle_weight,
            collinear_weight,
        })
    }

    /// Weight of each right-angle estimate.
    pub fn right_angle_weight(&self) -> T {
        self.right_angle_weight
    }

    /// Weight of each collinear estimate.
    pub fn collinear_weight(&self) -> T {
        self.collinear_weight
    }
}

impl<T: Scalar> PairEstimator<T> for WeightedPooledMedian<T> {
    fn name(&self) -> &str {
        "Weighted Pooled Median"
    }

    fn estimate(&self, references: &[(T, T)]) -> Option<T> {
        let mut samples: Vec<(T, T)> = references
            .iter()
            .flat_map(|&(a, b)| {
                [
                    (right_angle(a, b), self.right_angle_weight),
                    (collinear(a, b), self.collinear_weight),
                ]
            })
            .collect();
        weighted_median(&mut samples)
    }
}

/// Median of the right-angle estimates alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RightAngle;

impl<T: Scalar> PairEstimator<T> for RightAngle {
    fn name(&self) -> &str {
        "Right Angle"
    }

    fn estimate(&self, references: &[(T, T)]) -> Option<T> {
        let mut values: Vec<T> = references.iter().map(|&(a, b)| right_angle(a, b)).collect();
        median(&mut values)
    }
}

/// Median of the collinear estimates alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collinear;

impl<T: Scalar> PairEstimator<T> for Collinear {
    fn name(&self) -> &str {
        "Collinear"
    }

    fn estimate(&self, references: &[(T, T)]) -> Option<T> {
        let mut values: Vec<T> = references.iter().map(|&(a, b)| collinear(a, b)).collect();
        median(&mut values)
    }
}
