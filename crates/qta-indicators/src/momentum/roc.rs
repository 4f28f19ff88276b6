//! Rate of Change (ROC) indicator.

use core::marker::PhantomData;

use qta_core::{
    error::{IndicatorError, Result},
    ma::{ma_calculate, MaType},
    num::TaFloat,
    params::Params,
    quotes::{PriceField, Quotes},
    series::Series,
    traits::{Indicator, IndicatorConfig},
    utils::nan_padded,
    FieldAccess,
};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::output::output_fields;

/// Configuration for the ROC indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RocConfig {
    /// Lookback period (default: 14).
    pub period: usize,
    /// Period of the smoothed ROC (default: 14).
    pub ma_period: usize,
    /// Smoothing method (default: `sma`).
    pub ma_type: MaType,
    /// Price field the change is measured on (default: close).
    pub value: PriceField,
}

impl Default for RocConfig {
    fn default() -> Self {
        Self {
            period: 14,
            ma_period: 14,
            ma_type: MaType::Sma,
            value: PriceField::Close,
        }
    }
}

impl RocConfig {
    /// Create a new ROC configuration with the given lookback period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Set the smoothing period.
    pub fn with_ma_period(mut self, ma_period: usize) -> Self {
        self.ma_period = ma_period;
        self
    }

    /// Set the smoothing method.
    pub fn with_ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    /// Set the price field.
    pub fn with_value(mut self, value: PriceField) -> Self {
        self.value = value;
        self
    }
}

impl IndicatorConfig for RocConfig {
    fn from_params(params: &Params) -> Result<Self> {
        params.ensure_known(&["period", "ma_period", "ma_type", "value"])?;
        let defaults = Self::default();
        let period = params.usize_or("period", defaults.period)?;
        let ma_period = params.usize_or("ma_period", defaults.ma_period)?;
        let value = PriceField::cast(params.str_or("value", defaults.value.as_str())?)?;
        let ma_type = MaType::cast(params.str_or("ma_type", defaults.ma_type.as_str())?)?;
        Ok(Self {
            period,
            ma_period,
            ma_type,
            value,
        })
    }

    fn validate(&self) -> Result<()> {
        IndicatorError::ensure_positive("period", self.period)?;
        IndicatorError::ensure_positive("ma_period", self.ma_period)
    }
}

/// ROC output.
#[derive(Debug, Clone, PartialEq)]
pub struct RocOutput<T: TaFloat> {
    /// Fractional change over `period` bars.
    pub roc: Series<T>,
    /// `roc` smoothed over `ma_period`.
    pub smooth_roc: Series<T>,
}

output_fields!(RocOutput { roc, smooth_roc });

/// Rate of Change indicator.
///
/// `ROC[i] = (x[i] - x[i - period]) / x[i - period]`, reported as a fraction
/// and 0 where `x[i - period]` is 0. Both outputs carry `period` leading NaN
/// cells; the smoothed line adds the warm-up of its moving average.
#[derive(Debug, Clone)]
pub struct Roc<T: TaFloat> {
    config: RocConfig,
    _marker: PhantomData<T>,
}

impl<T: TaFloat> Indicator<T> for Roc<T> {
    type Output = RocOutput<T>;
    type Config = RocConfig;

    const NAME: &'static str = "roc";

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn min_periods(&self) -> usize {
        self.config.period
    }

    fn calculate(&self, quotes: &Quotes<T>) -> Result<Self::Output> {
        self.config.validate()?;
        IndicatorError::ensure_len(self.min_periods(), quotes.len())?;

        let RocConfig {
            period,
            ma_period,
            ma_type,
            value,
        } = *self.config();
        trace!(period, ma_period, ma_type = %ma_type, value = %value, "computing roc");

        let series = quotes.price(value);
        let change: Vec<T> = series[period..]
            .iter()
            .zip(series.iter())
            .map(|(&current, &past)| {
                if past == T::ZERO {
                    T::ZERO
                } else {
                    (current - past) / past
                }
            })
            .collect();
        let smoothed = ma_calculate(&change, ma_period, ma_type);

        Ok(RocOutput {
            roc: nan_padded(period, &change),
            smooth_roc: nan_padded(period, &smoothed),
        })
    }
}
