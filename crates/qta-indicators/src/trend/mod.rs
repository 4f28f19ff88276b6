//! Trend indicators.
//!
//! - [`Adx`] - Average Directional Index with +DI and -DI
//! - [`Sma`] - Simple Moving Average
//! - [`Ema`] - Exponential Moving Average

pub mod adx;
pub mod ema;
pub mod sma;

pub use adx::{Adx, AdxConfig, AdxOutput};
pub use ema::{Ema, EmaConfig, EmaOutput};
pub use sma::{Sma, SmaConfig, SmaOutput};
