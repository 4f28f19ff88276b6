//! Moving-average engine.
//!
//! [`ma_calculate`] implements every smoothing method an indicator can
//! request through its `ma_type` parameter. All methods share one alignment
//! contract so indicators can mix engine output with raw series of the same
//! length:
//!
//! - the output has the input's length;
//! - leading NaN cells of the input are skipped and stay NaN;
//! - counting from the first non-NaN input cell `s`, the cells before
//!   `s + period - 1` are NaN and every method defines `s + period - 1`
//!   onwards (NaN inside the input still propagates naturally).
//!
//! For an input without leading NaN the first defined index is therefore
//! `period - 1` for every method.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::TaFloat;
use crate::series::Series;

/// Smoothing method of [`ma_calculate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaType {
    /// Simple moving average over the trailing `period` values.
    Sma,
    /// Exponential average, `alpha = 2 / (period + 1)`, seeded with the mean
    /// of the first `period` values.
    Ema,
    /// Wilder's modified average, `alpha = 1 / period`, seeded with the mean
    /// of the first `period` values.
    Mma,
    /// [`MaType::Ema`] seeded with zero.
    Ema0,
    /// [`MaType::Mma`] seeded with zero.
    Mma0,
}

impl MaType {
    /// Every smoothing method.
    pub const ALL: [MaType; 5] = [Self::Sma, Self::Ema, Self::Mma, Self::Ema0, Self::Mma0];

    /// Parameter spelling of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Mma => "mma",
            Self::Ema0 => "ema0",
            Self::Mma0 => "mma0",
        }
    }

    /// Parse an `ma_type` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] naming `ma_type` for an
    /// unknown method.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qta_core::MaType;
    ///
    /// assert_eq!(MaType::cast("mma0").unwrap(), MaType::Mma0);
    /// assert!(MaType::cast("wma").is_err());
    /// ```
    pub fn cast(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == name)
            .ok_or_else(|| {
                IndicatorError::bad_parameter(
                    "ma_type",
                    name,
                    "must be one of ['sma', 'ema', 'mma', 'ema0', 'mma0']",
                )
            })
    }

    /// Whether the recursion starts from zero instead of the warm-up mean.
    #[must_use]
    pub fn is_zero_seeded(self) -> bool {
        matches!(self, Self::Ema0 | Self::Mma0)
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaType {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::cast(s)
    }
}

/// Smooth `values` with `method` over `period`.
///
/// `period` must be at least 1; indicators validate it before calling. A zero
/// period yields an all-NaN series.
///
/// # Example
///
/// ```rust
/// use qta_core::{ma_calculate, MaType};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// let sma = ma_calculate::<f64>(&data, 3, MaType::Sma);
/// assert!(sma[1].is_nan());
/// assert_eq!(&sma[2..], &[2.0, 3.0, 4.0]);
///
/// // alpha = 0.5, seeded with the mean of 1, 2, 3
/// let ema = ma_calculate::<f64>(&data, 3, MaType::Ema);
/// assert_eq!(&ema[2..], &[2.0, 3.0, 4.0]);
/// ```
#[must_use]
pub fn ma_calculate<T: TaFloat>(values: &[T], period: usize, method: MaType) -> Series<T> {
    debug_assert!(period > 0, "moving average period must be > 0");

    let len = values.len();
    let mut out = vec![T::NAN; len];
    if period == 0 {
        return Series::from_vec(out);
    }
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return Series::from_vec(out);
    };
    let first = start + period - 1;
    if first >= len {
        return Series::from_vec(out);
    }

    let n = <T as TaFloat>::from_usize(period);
    match method {
        MaType::Sma => rolling_mean(values, start, period, &mut out),
        MaType::Ema | MaType::Ema0 => {
            let alpha = T::TWO / (n + T::ONE);
            recurse(values, start, period, method, &mut out, |prev, v| {
                alpha * v + (T::ONE - alpha) * prev
            });
        }
        MaType::Mma | MaType::Mma0 => {
            recurse(values, start, period, method, &mut out, |prev, v| {
                prev + (v - prev) / n
            });
        }
    }

    Series::from_vec(out)
}

/// Windowed mean from `start`; a window holding NaN yields NaN.
fn rolling_mean<T: TaFloat>(values: &[T], start: usize, period: usize, out: &mut [T]) {
    let n = <T as TaFloat>::from_usize(period);
    let mut sum = T::ZERO;
    let mut nans = 0usize;

    for i in start..values.len() {
        let v = values[i];
        if v.is_nan() {
            nans += 1;
        } else {
            sum = sum + v;
        }

        if i >= start + period {
            let old = values[i - period];
            if old.is_nan() {
                nans -= 1;
            } else {
                sum = sum - old;
            }
        }

        if i + 1 >= start + period {
            out[i] = if nans == 0 { sum / n } else { T::NAN };
        }
    }
}

/// Recursive smoothing shared by the ema and mma families.
fn recurse<T, F>(values: &[T], start: usize, period: usize, method: MaType, out: &mut [T], step: F)
where
    T: TaFloat,
    F: Fn(T, T) -> T,
{
    let first = start + period - 1;

    if method.is_zero_seeded() {
        let mut prev = T::ZERO;
        for i in start..values.len() {
            prev = step(prev, values[i]);
            if i >= first {
                out[i] = prev;
            }
        }
        return;
    }

    let seed = values[start..=first]
        .iter()
        .fold(T::ZERO, |acc, &v| acc + v)
        / <T as TaFloat>::from_usize(period);
    out[first] = seed;

    let mut prev = seed;
    for i in (first + 1)..values.len() {
        prev = step(prev, values[i]);
        out[i] = prev;
    }
}
