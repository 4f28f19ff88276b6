//! # qta-indicators
//!
//! Technical indicators for the quotes-ta library.
//!
//! Indicators are grouped into three categories:
//!
//! - **Trend**: ADX, SMA, EMA
//! - **Momentum**: ROC
//! - **Volatility**: ATR, Bollinger Bands
//!
//! Each indicator is a pure function of a [`Quotes`](qta_core::Quotes) input
//! and its `*Config`. The [`registry`] runs any of them by name with
//! [`Params`](qta_core::Params).
//!
//! # Example
//!
//! ```
//! use qta_core::prelude::*;
//! use qta_indicators::prelude::*;
//!
//! let close: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
//! let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
//! let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
//! let quotes = Quotes::from_arrays(&close, &high, &low, &close).unwrap();
//!
//! let adx = Adx::<f64>::new(AdxConfig::default());
//! let output = adx.calculate(&quotes).unwrap();
//! assert!(output.adx[26].is_nan());
//! assert!(output.adx[27] > 99.0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod output;

pub mod momentum;
pub mod registry;
pub mod trend;
pub mod volatility;

pub mod prelude;

pub use prelude::*;
