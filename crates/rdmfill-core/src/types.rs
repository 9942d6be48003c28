//! Type definitions and aliases for distance-matrix completion.
//!
//! This module provides the scalar trait shared by every crate in the
//! workspace, matrix type aliases and numerical constants.

use nalgebra::{Dyn, OMatrix, OVector, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used to store distances (f32 or f64).
///
/// The missing marker is the scalar's NaN, so the type must be a
/// floating-point number.
pub trait Scalar:
    NalgebraScalar + Float + FromPrimitive + Display + Debug + Default + Copy + Send + Sync + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default tolerance when comparing the two triangles of a matrix.
    const SYMMETRY_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const SYMMETRY_TOLERANCE: Self = 1e-5;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const SYMMETRY_TOLERANCE: Self = 1e-10;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// An unordered index pair `(i, j)` with `i < j`, addressing the upper triangle.
pub type Pair = (usize, usize);

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get the default symmetry tolerance.
    pub fn symmetry_tolerance<T: Scalar>() -> T {
        T::SYMMETRY_TOLERANCE
    }

    /// One half, used by the median of an even-sized sample.
    pub fn half<T: Scalar>() -> T {
        <T as Scalar>::from_f64(0.5)
    }
}
