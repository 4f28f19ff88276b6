//! Prelude for qta-indicators.
//!
//! This module re-exports all commonly used types and traits.

// Momentum indicators
pub use crate::momentum::{Roc, RocConfig, RocOutput};

// Trend indicators
pub use crate::trend::{
    Adx, AdxConfig, AdxOutput,
    Ema, EmaConfig, EmaOutput,
    Sma, SmaConfig, SmaOutput,
};

// Volatility indicators
pub use crate::volatility::{
    Atr, AtrConfig, AtrOutput,
    BollingerBands, BollingerConfig, BollingerOutput,
};

// Name-based dispatch
pub use crate::registry::{IndicatorFn, RegistryEntry};
