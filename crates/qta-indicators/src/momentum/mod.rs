//! Momentum indicators.
//!
//! - [`Roc`] - Rate of Change

pub mod roc;

pub use roc::{Roc, RocConfig, RocOutput};
