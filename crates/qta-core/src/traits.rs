//! Indicator trait definitions.
//!
//! Every indicator is a pure function of a [`Quotes`] input and a config:
//! it validates the config, checks the data length and returns a freshly
//! allocated output. No state survives between calls, so one indicator value
//! can be shared across threads.

use core::fmt::Debug;

use crate::data_series::{FieldAccess, IndicatorResult};
use crate::error::Result;
use crate::num::TaFloat;
use crate::params::Params;
use crate::quotes::Quotes;

/// Configuration of an indicator.
pub trait IndicatorConfig: Clone + Debug + Send + Sync + Sized {
    /// Build a config from named parameters, defaults filling the gaps.
    ///
    /// # Errors
    ///
    /// Returns `BadParameterValue` for unknown names, mistyped values or a
    /// missing required parameter.
    fn from_params(params: &Params) -> Result<Self>;

    /// Check every parameter against its domain.
    ///
    /// # Errors
    ///
    /// Returns `BadParameterValue` naming the first offending parameter.
    fn validate(&self) -> Result<()>;
}

/// Core trait for technical indicators.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl<T: TaFloat> Indicator<T> for Roc<T> {
///     type Output = RocOutput<T>;
///     type Config = RocConfig;
///     const NAME: &'static str = "roc";
///
///     fn new(config: RocConfig) -> Self { /* ... */ }
///     fn config(&self) -> &RocConfig { &self.config }
///     fn min_periods(&self) -> usize { self.config.period }
///     fn calculate(&self, quotes: &Quotes<T>) -> Result<RocOutput<T>> { /* ... */ }
/// }
/// ```
pub trait Indicator<T: TaFloat>: Send + Sync {
    /// Typed output, convertible to the generic result container.
    type Output: FieldAccess<T> + Into<IndicatorResult<T>>;

    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Registry name of the indicator.
    const NAME: &'static str;

    /// Create a new indicator with the given configuration.
    fn new(config: Self::Config) -> Self;

    /// Get a reference to the current configuration.
    fn config(&self) -> &Self::Config;

    /// Minimum number of bars accepted by [`Indicator::calculate`].
    fn min_periods(&self) -> usize;

    /// Compute the indicator over the full quote history.
    ///
    /// # Errors
    ///
    /// Returns `BadParameterValue` for an invalid config and `TooLittleData`
    /// when `quotes` is shorter than [`Indicator::min_periods`].
    fn calculate(&self, quotes: &Quotes<T>) -> Result<Self::Output>;
}
