//! Volatility indicators.
//!
//! - [`Atr`] - Average True Range
//! - [`BollingerBands`] - Bollinger Bands

pub mod atr;
pub mod bollinger;

pub use atr::{Atr, AtrConfig, AtrOutput};
pub use bollinger::{BollingerBands, BollingerConfig, BollingerOutput};
