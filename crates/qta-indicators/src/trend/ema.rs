//! Exponential Moving Average (EMA) indicator.

use core::marker::PhantomData;

use qta_core::{
    error::{IndicatorError, Result},
    ma::{ma_calculate, MaType},
    num::TaFloat,
    params::Params,
    quotes::{PriceField, Quotes},
    series::Series,
    traits::{Indicator, IndicatorConfig},
    FieldAccess,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::output::output_fields;

/// Configuration for the EMA indicator. There is no default period.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmaConfig {
    /// Smoothing period; `alpha = 2 / (period + 1)`.
    pub period: usize,
    /// Price field to smooth (default: close).
    pub value: PriceField,
}

impl EmaConfig {
    /// Create a new EMA configuration with the given period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            value: PriceField::Close,
        }
    }

    /// Set the price field.
    pub fn with_value(mut self, value: PriceField) -> Self {
        self.value = value;
        self
    }
}

impl IndicatorConfig for EmaConfig {
    fn from_params(params: &Params) -> Result<Self> {
        params.ensure_known(&["period", "value"])?;
        Ok(Self {
            period: params.required_usize("period")?,
            value: PriceField::cast(params.str_or("value", PriceField::Close.as_str())?)?,
        })
    }

    fn validate(&self) -> Result<()> {
        IndicatorError::ensure_positive("period", self.period)
    }
}

/// EMA output.
#[derive(Debug, Clone, PartialEq)]
pub struct EmaOutput<T: TaFloat> {
    /// Exponential average of the selected price.
    pub ema: Series<T>,
}

output_fields!(EmaOutput { ema });

/// Exponential Moving Average indicator, seeded with the SMA of the first
/// `period` values.
#[derive(Debug, Clone)]
pub struct Ema<T: TaFloat> {
    config: EmaConfig,
    _marker: PhantomData<T>,
}

impl<T: TaFloat> Indicator<T> for Ema<T> {
    type Output = EmaOutput<T>;
    type Config = EmaConfig;

    const NAME: &'static str = "ema";

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

        let ema = ma_calculate(quotes.price(self.config.value), self.config.period, MaType::Ema);
        Ok(EmaOutput { ema })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ema_basic() {
        let close = [1.0, 2.0, 3.0, 4.0, 5.0, 10.0];
        let quotes = Quotes::from_arrays(&close, &close, &close, &close).unwrap();
        let output = Ema::<f64>::new(EmaConfig::new(3)).calculate(&quotes).unwrap();

        assert!(output.ema[1].is_nan());
        assert_relative_eq!(output.ema[2], 2.0);
        assert_relative_eq!(output.ema[3], 3.0);
        assert_relative_eq!(output.ema[4], 4.0);
        // 0.5 * 10 + 0.5 * 4
        assert_relative_eq!(output.ema[5], 7.0);
    }

    #[test]
    fn test_ema_too_little_data() {
        let close = [1.0, 2.0];
        let quotes = Quotes::from_arrays(&close, &close, &close, &close).unwrap();
        let err = Ema::<f64>::new(EmaConfig::new(3)).calculate(&quotes).unwrap_err();
        assert_eq!(err, IndicatorError::TooLittleData { required: 3, actual: 2 });
    }
}
