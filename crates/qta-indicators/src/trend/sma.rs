//! Simple Moving Average (SMA) indicator.

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

/// Configuration for the SMA indicator. There is no default period.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmaConfig {
    /// Number of periods to average.
    pub period: usize,
    /// Price field to average (default: close).
    pub value: PriceField,
}

impl SmaConfig {
    /// Create a new SMA configuration with the given period.
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

impl IndicatorConfig for SmaConfig {
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

/// SMA output.
#[derive(Debug, Clone, PartialEq)]
pub struct SmaOutput<T: TaFloat> {
    /// Moving average of the selected price.
    pub sma: Series<T>,
}

output_fields!(SmaOutput { sma });

/// Simple Moving Average indicator.
#[derive(Debug, Clone)]
pub struct Sma<T: TaFloat> {
    config: SmaConfig,
    _marker: PhantomData<T>,
}

impl<T: TaFloat> Indicator<T> for Sma<T> {
    type Output = SmaOutput<T>;
    type Config = SmaConfig;

    const NAME: &'static str = "sma";

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

        let sma = ma_calculate(quotes.price(self.config.value), self.config.period, MaType::Sma);
        Ok(SmaOutput { sma })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_basic() {
        let close = [1.0, 2.0, 3.0, 4.0, 5.0];
        let quotes = Quotes::from_arrays(&close, &close, &close, &close).unwrap();
        let output = Sma::<f64>::new(SmaConfig::new(3)).calculate(&quotes).unwrap();

        assert!(output.sma[0].is_nan());
        assert!(output.sma[1].is_nan());
        assert_eq!(&output.sma[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_period_required() {
        let err = SmaConfig::from_params(&Params::new()).unwrap_err();
        assert!(matches!(err, IndicatorError::BadParameterValue { name: "period", .. }));

        let config = SmaConfig::from_params(&Params::new().with("period", 5)).unwrap();
        assert_eq!(config, SmaConfig::new(5));
    }
}
