//! Floating-point abstraction shared by every series and indicator.

use core::fmt::Debug;
use num_traits::{Float, FromPrimitive, ToPrimitive};

/// Floating-point element type of quotes and indicator outputs.
///
/// Implemented for `f32` and `f64`. NaN is the warm-up sentinel throughout the
/// library.
///
/// # Example
///
/// ```rust
/// use qta_core::TaFloat;
///
/// fn percent<T: TaFloat>(part: T, whole: T) -> T {
///     if whole == T::ZERO {
///         return T::NAN;
///     }
///     T::HUNDRED * part / whole
/// }
///
/// assert_eq!(percent(1.0f64, 4.0), 25.0);
/// assert!(percent(1.0f64, 0.0).is_nan());
/// ```
pub trait TaFloat:
    Float + FromPrimitive + ToPrimitive + Debug + Default + Send + Sync + 'static
{
    /// Not-a-number value.
    const NAN: Self;
    /// Zero value.
    const ZERO: Self;
    /// One value.
    const ONE: Self;
    /// Two value.
    const TWO: Self;
    /// Hundred value.
    const HUNDRED: Self;

    /// Convert from `f64`, rounding if the type is narrower.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert a count or period to this type.
    #[must_use]
    fn from_usize(value: usize) -> Self;
}

impl TaFloat for f32 {
    const NAN: Self = f32::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }
}

impl TaFloat for f64 {
    const NAN: Self = f64::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }
}
