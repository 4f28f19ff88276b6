//! Name-based indicator dispatch.
//!
//! The registry is a static, read-only table built at compile time, so
//! lookups need no initialization and are safe from any thread.
//!
//! ```rust
//! use qta_core::{FieldAccess, Params, Quotes};
//! use qta_indicators::registry;
//!
//! let close: Vec<f64> = (1..=20).map(f64::from).collect();
//! let quotes = Quotes::from_arrays(&close, &close, &close, &close).unwrap();
//!
//! let result = registry::call("roc", &quotes, &Params::new().with("period", 5)).unwrap();
//! assert_eq!(result.field_names(), vec!["roc", "smooth_roc"]);
//! ```

use qta_core::{
    error::{IndicatorError, Result},
    params::Params,
    quotes::Quotes,
    traits::{Indicator, IndicatorConfig},
    FieldAccess, IndicatorResult,
};
use tracing::debug;

use crate::momentum::Roc;
use crate::trend::{Adx, Ema, Sma};
use crate::volatility::{Atr, BollingerBands};

/// Signature shared by every registered indicator.
pub type IndicatorFn = fn(&Quotes<f64>, &Params) -> Result<IndicatorResult<f64>>;

/// One registered indicator.
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    /// Registry name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Accepted parameters with their defaults.
    pub signature: &'static str,
    compute: IndicatorFn,
}

impl RegistryEntry {
    /// Run the indicator on `quotes`.
    ///
    /// # Errors
    ///
    /// Propagates parameter and data-length errors of the indicator.
    pub fn call(&self, quotes: &Quotes<f64>, params: &Params) -> Result<IndicatorResult<f64>> {
        (self.compute)(quotes, params)
    }
}

impl core::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

fn run<I: Indicator<f64>>(quotes: &Quotes<f64>, params: &Params) -> Result<IndicatorResult<f64>> {
    let config = I::Config::from_params(params)?;
    let output = I::new(config).calculate(quotes)?;
    Ok(output.into())
}

// Sorted by name.
static ENTRIES: &[RegistryEntry] = &[
    RegistryEntry {
        name: <Adx<f64> as Indicator<f64>>::NAME,
        description: "Average Directional Index with +DI and -DI",
        signature: "period=14, smooth=14, ma_type='mma'",
        compute: run::<Adx<f64>>,
    },
    RegistryEntry {
        name: <Atr<f64> as Indicator<f64>>::NAME,
        description: "Average True Range, absolute and as percent of close",
        signature: "smooth=14, ma_type='mma'",
        compute: run::<Atr<f64>>,
    },
    RegistryEntry {
        name: <BollingerBands<f64> as Indicator<f64>>::NAME,
        description: "Bollinger Bands with z-score",
        signature: "period=20, deviation=2.0, deviation_up=deviation, \
                    deviation_down=deviation, ma_type='sma', value='close'",
        compute: run::<BollingerBands<f64>>,
    },
    RegistryEntry {
        name: <Ema<f64> as Indicator<f64>>::NAME,
        description: "Exponential Moving Average",
        signature: "period, value='close'",
        compute: run::<Ema<f64>>,
    },
    RegistryEntry {
        name: <Roc<f64> as Indicator<f64>>::NAME,
        description: "Rate of Change with a smoothed line",
        signature: "period=14, ma_period=14, ma_type='sma', value='close'",
        compute: run::<Roc<f64>>,
    },
    RegistryEntry {
        name: <Sma<f64> as Indicator<f64>>::NAME,
        description: "Simple Moving Average",
        signature: "period, value='close'",
        compute: run::<Sma<f64>>,
    },
];

/// Every registered indicator, sorted by name.
pub fn entries() -> &'static [RegistryEntry] {
    ENTRIES
}

/// Registered indicator names, sorted.
pub fn names() -> Vec<&'static str> {
    ENTRIES.iter().map(|entry| entry.name).collect()
}

/// Look up an indicator by name.
///
/// # Errors
///
/// Returns [`IndicatorError::IndicatorNotFound`] for an unknown name.
pub fn get(name: &str) -> Result<&'static RegistryEntry> {
    ENTRIES
        .iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| IndicatorError::IndicatorNotFound(name.to_string()))
}

/// Look up `name` and run it on `quotes` with `params`.
///
/// # Errors
///
/// Returns `IndicatorNotFound` for an unknown name, otherwise the
/// indicator's own parameter or data-length error.
pub fn call(name: &str, quotes: &Quotes<f64>, params: &Params) -> Result<IndicatorResult<f64>> {
    let entry = get(name).map_err(|err| {
        debug!(indicator = name, "unknown indicator");
        err
    })?;

    debug!(indicator = name, bars = quotes.len(), params = params.len(), "dispatching indicator");
    let result = entry.call(quotes, params);
    if let Err(err) = &result {
        debug!(indicator = name, error = %err, "indicator rejected input");
    }
    result
}
