//! Series helpers shared by indicators.
//!
//! Each helper returns a series as long as its input with NaN wherever a
//! value has no defined history.

use crate::num::TaFloat;
use crate::series::Series;

/// True Range per bar.
///
/// `TR = max(high - low, |high - prev_close|, |low - prev_close|)`. The first
/// bar has no previous close and is NaN.
///
/// ```rust
/// use qta_core::utils::true_range;
///
/// let tr = true_range::<f64>(&[10.0, 12.0, 11.0], &[8.0, 9.0, 7.0], &[9.0, 11.0, 8.0]);
/// assert!(tr[0].is_nan());
/// assert_eq!(&tr[1..], &[3.0, 4.0]);
/// ```
#[must_use]
pub fn true_range<T: TaFloat>(high: &[T], low: &[T], close: &[T]) -> Series<T> {
    let len = high.len().min(low.len()).min(close.len());
    if len == 0 {
        return Series::new();
    }

    let mut result = Vec::with_capacity(len);
    result.push(T::NAN);
    for i in 1..len {
        let prev_close = close[i - 1];
        let hl = high[i] - low[i];
        let hc = (high[i] - prev_close).abs();
        let lc = (low[i] - prev_close).abs();
        result.push(hl.max(hc).max(lc));
    }

    Series::from_vec(result)
}

/// First difference `x[i] - x[i - 1]`, NaN at index 0.
#[must_use]
pub fn diff<T: TaFloat>(data: &[T]) -> Series<T> {
    if data.is_empty() {
        return Series::new();
    }

    let mut result = Vec::with_capacity(data.len());
    result.push(T::NAN);
    result.extend(data.windows(2).map(|w| w[1] - w[0]));
    Series::from_vec(result)
}

/// Rolling standard deviation over `window` values.
///
/// `ddof` is the delta degrees of freedom: 0 for the population deviation,
/// 1 for the sample deviation. The first `window - 1` values are NaN.
/// A window of identical values yields exactly 0.
#[must_use]
pub fn rolling_std<T: TaFloat>(data: &[T], window: usize, ddof: usize) -> Series<T> {
    let len = data.len();
    if window == 0 || window <= ddof {
        return Series::nan(len);
    }

    let divisor = <T as TaFloat>::from_usize(window - ddof);
    let size = <T as TaFloat>::from_usize(window);
    let mut result = vec![T::NAN; len];

    for end in window..=len {
        let slice = &data[end - window..end];
        if slice.iter().all(|&v| v == slice[0]) {
            result[end - 1] = T::ZERO;
            continue;
        }
        let mean = slice.iter().fold(T::ZERO, |acc, &v| acc + v) / size;
        let sum_sq = slice.iter().fold(T::ZERO, |acc, &v| {
            let d = v - mean;
            acc + d * d
        });
        result[end - 1] = (sum_sq / divisor).sqrt();
    }

    Series::from_vec(result)
}

/// Prepend `count` NaN cells to `values`.
#[must_use]
pub fn nan_padded<T: TaFloat>(count: usize, values: &[T]) -> Series<T> {
    let mut result = Vec::with_capacity(count + values.len());
    result.resize(count, T::NAN);
    result.extend_from_slice(values);
    Series::from_vec(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_true_range_gap() {
        // gap up: prev close 10, bar 15..14 -> |15 - 10| dominates
        let tr = true_range::<f64>(&[11.0, 15.0], &[9.0, 14.0], &[10.0, 14.5]);
        assert!(tr[0].is_nan());
        assert_eq!(tr[1], 5.0);
    }

    #[test]
    fn test_true_range_empty() {
        assert!(true_range::<f64>(&[], &[], &[]).is_empty());
    }

    #[test]
    fn test_diff() {
        let result = diff::<f64>(&[1.0, 3.0, 6.0, 10.0]);
        assert!(result[0].is_nan());
        assert_eq!(&result[1..], &[2.0, 3.0, 4.0]);
        assert!(diff::<f64>(&[]).is_empty());
    }

    #[test]
    fn test_rolling_std_population() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = rolling_std(&data, 8, 0);
        assert_eq!(result.nan_count(), 7);
        assert_relative_eq!(result[7], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_std_sample() {
        let data = [2.0, 4.0, 4.0];
        let result = rolling_std(&data, 3, 1);
        assert_relative_eq!(result[2], (4.0f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_eq!(rolling_std(&data, 1, 1).nan_count(), 3);
    }

    #[test]
    fn test_rolling_std_flat_window_is_exact_zero() {
        let result = rolling_std(&[0.1, 0.1, 0.1, 0.1, 0.7], 3, 0);
        assert_eq!(&result[2..4], &[0.0, 0.0]);
        assert!(result[4] > 0.0);

        let with_nan = rolling_std(&[f64::NAN, f64::NAN, f64::NAN], 3, 0);
        assert!(with_nan[2].is_nan());
    }

    #[test]
    fn test_nan_padded() {
        let result = nan_padded::<f64>(2, &[0.5, 0.25]);
        assert_eq!(result.len(), 4);
        assert!(result[0].is_nan() && result[1].is_nan());
        assert_eq!(&result[2..], &[0.5, 0.25]);
    }
}
