//! Common test utilities for quotes-ta.
//!
//! NaN-aware float comparison and deterministic synthetic quotes.

#![allow(dead_code)]

use qta_core::Quotes;

/// Tiered float comparison with tolerance levels.
///
/// - NaN only matches NaN
/// - For values near zero (|expected| < 1e-10): absolute tolerance
/// - Otherwise: relative tolerance
pub fn assert_float_eq(actual: f64, expected: f64, epsilon: f64, context: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{context}: Expected NaN but got {actual}");
        return;
    }

    if actual.is_nan() {
        panic!("{context}: Got NaN but expected {expected}");
    }

    if expected.abs() < 1e-10 {
        let diff = (actual - expected).abs();
        assert!(
            diff < epsilon,
            "{context}: Expected {expected} but got {actual} (diff: {diff})"
        );
        return;
    }

    let rel_diff = ((actual - expected) / expected).abs();
    assert!(
        rel_diff < epsilon,
        "{context}: Expected {expected} but got {actual} (rel diff: {rel_diff:.2e})"
    );
}

/// Assert two series are equal with tolerance.
pub fn assert_series_eq(actual: &[f64], expected: &[f64], epsilon: f64, name: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{name}: Length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );

    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert_float_eq(a, e, epsilon, &format!("{name}[{i}]"));
    }
}

/// Generate linear price series.
pub fn generate_linear(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Generate random walk price series with deterministic seed.
pub fn generate_random_walk(start: f64, volatility: f64, len: usize, seed: u64) -> Vec<f64> {
    // LCG, mapped to [-1, 1]
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut prices = Vec::with_capacity(len);
    let mut last = start;
    for i in 0..len {
        if i > 0 {
            last = (last + next() * volatility).max(0.01);
        }
        prices.push(last);
    }
    prices
}

/// Build quotes from close prices: open is the previous close and the bar
/// extends `range_pct` of the close beyond the body. Volume is included.
pub fn quotes_from_close(close: &[f64], range_pct: f64) -> Quotes<f64> {
    let mut open = Vec::with_capacity(close.len());
    let mut high = Vec::with_capacity(close.len());
    let mut low = Vec::with_capacity(close.len());
    let mut volume = Vec::with_capacity(close.len());

    for (i, &c) in close.iter().enumerate() {
        let range = c * range_pct;
        let o = if i == 0 { c } else { close[i - 1] };
        open.push(o);
        high.push(c.max(o) + range * 0.5);
        low.push(c.min(o) - range * 0.5);
        volume.push(1000.0 + i as f64 * 100.0);
    }

    Quotes::from_arrays(&open, &high, &low, close)
        .and_then(|quotes| quotes.with_volume(&volume))
        .unwrap()
}

/// A deterministic 200-bar random-walk market.
pub fn sample_quotes() -> Quotes<f64> {
    quotes_from_close(&generate_random_walk(100.0, 1.5, 200, 42), 0.02)
}
