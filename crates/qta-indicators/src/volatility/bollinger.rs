//! Bollinger Bands indicator.
//!
//! A moving-average middle line with bands placed a number of population
//! standard deviations above and below it.

use core::marker::PhantomData;

use qta_core::{
    error::{IndicatorError, Result},
    ma::{ma_calculate, MaType},
    num::TaFloat,
    params::Params,
    quotes::{PriceField, Quotes},
    series::Series,
    traits::{Indicator, IndicatorConfig},
    utils::rolling_std,
    FieldAccess,
};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::output::output_fields;

/// Configuration for Bollinger Bands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BollingerConfig {
    /// Window of the middle line and the deviation (default: 20).
    pub period: usize,
    /// Deviations above the middle line (default: 2.0).
    pub deviation_up: f64,
    /// Deviations below the middle line (default: 2.0).
    pub deviation_down: f64,
    /// Middle-line method (default: `sma`).
    pub ma_type: MaType,
    /// Price field (default: close).
    pub value: PriceField,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            deviation_up: 2.0,
            deviation_down: 2.0,
            ma_type: MaType::Sma,
            value: PriceField::Close,
        }
    }
}

impl BollingerConfig {
    /// Create a configuration with symmetric bands.
    pub fn new(period: usize, deviation: f64) -> Self {
        Self {
            period,
            deviation_up: deviation,
            deviation_down: deviation,
            ..Self::default()
        }
    }

    /// Set the upper and lower band multipliers separately.
    pub fn with_deviations(mut self, up: f64, down: f64) -> Self {
        self.deviation_up = up;
        self.deviation_down = down;
        self
    }

    /// Set the middle-line method.
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

impl IndicatorConfig for BollingerConfig {
    /// `deviation` sets both bands; `deviation_up` and `deviation_down`
    /// override one side each.
    fn from_params(params: &Params) -> Result<Self> {
        params.ensure_known(&[
            "period",
            "deviation",
            "deviation_up",
            "deviation_down",
            "ma_type",
            "value",
        ])?;
        let defaults = Self::default();
        let deviation = params.f64_or("deviation", defaults.deviation_up)?;
        Ok(Self {
            period: params.usize_or("period", defaults.period)?,
            deviation_up: params.f64_or("deviation_up", deviation)?,
            deviation_down: params.f64_or("deviation_down", deviation)?,
            ma_type: MaType::cast(params.str_or("ma_type", defaults.ma_type.as_str())?)?,
            value: PriceField::cast(params.str_or("value", defaults.value.as_str())?)?,
        })
    }

    fn validate(&self) -> Result<()> {
        IndicatorError::ensure_positive("period", self.period)?;
        for (name, deviation) in [
            ("deviation_up", self.deviation_up),
            ("deviation_down", self.deviation_down),
        ] {
            if !deviation.is_finite() || deviation < 0.0 {
                return Err(IndicatorError::bad_parameter(
                    name,
                    deviation,
                    "must be a finite number >= 0",
                ));
            }
        }
        Ok(())
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput<T: TaFloat> {
    /// Moving average of the price.
    pub mid_line: Series<T>,
    /// `mid_line + deviation_up * std`.
    pub up_line: Series<T>,
    /// `mid_line - deviation_down * std`.
    pub down_line: Series<T>,
    /// `(price - mid_line) / std`, 0 where the window is flat.
    pub z_score: Series<T>,
}

output_fields!(BollingerOutput {
    mid_line,
    up_line,
    down_line,
    z_score,
});

/// Bollinger Bands indicator.
#[derive(Debug, Clone)]
pub struct BollingerBands<T: TaFloat> {
    config: BollingerConfig,
    _marker: PhantomData<T>,
}

impl<T: TaFloat> Indicator<T> for BollingerBands<T> {
    type Output = BollingerOutput<T>;
    type Config = BollingerConfig;

    const NAME: &'static str = "bollinger_bands";

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

        let config = self.config();
        trace!(period = config.period, ma_type = %config.ma_type, "computing bollinger bands");

        let price = quotes.price(config.value);
        let mid_line = ma_calculate(price, config.period, config.ma_type);
        let std = rolling_std(price, config.period, 0);

        let up = T::from_f64_lossy(config.deviation_up);
        let down = T::from_f64_lossy(config.deviation_down);
        let up_line = mid_line.zip_with(&std, |mid, sd| mid + up * sd);
        let down_line = mid_line.zip_with(&std, |mid, sd| mid - down * sd);

        let z_score = price
            .iter()
            .zip(mid_line.iter())
            .zip(std.iter())
            .map(|((&v, &mid), &sd)| if sd == T::ZERO { T::ZERO } else { (v - mid) / sd })
            .collect();

        Ok(BollingerOutput {
            mid_line,
            up_line,
            down_line,
            z_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quotes(close: &[f64]) -> Quotes<f64> {
        Quotes::from_arrays(close, close, close, close).unwrap()
    }

    #[test]
    fn test_bollinger_default_config() {
        let config = BollingerConfig::default();
        assert_eq!(config.period, 20);
        assert_eq!(config.deviation_up, 2.0);
        assert_eq!(config.deviation_down, 2.0);
        assert_eq!(config.ma_type, MaType::Sma);
    }

    #[test]
    fn test_bollinger_bands() {
        let bands = BollingerBands::<f64>::new(BollingerConfig::new(3, 2.0));
        let output = bands.calculate(&quotes(&[1.0, 2.0, 3.0, 3.0])).unwrap();

        assert!(output.mid_line[1].is_nan());
        assert!(output.z_score[1].is_nan());

        // window 1, 2, 3: mean 2, population std sqrt(2/3)
        let sd = (2.0f64 / 3.0).sqrt();
        assert_relative_eq!(output.mid_line[2], 2.0);
        assert_relative_eq!(output.up_line[2], 2.0 + 2.0 * sd, epsilon = 1e-12);
        assert_relative_eq!(output.down_line[2], 2.0 - 2.0 * sd, epsilon = 1e-12);
        assert_relative_eq!(output.z_score[2], 1.0 / sd, epsilon = 1e-12);
    }

    #[test]
    fn test_bollinger_flat_window() {
        let bands = BollingerBands::<f64>::new(BollingerConfig::new(2, 2.0));
        let output = bands.calculate(&quotes(&[5.0, 5.0, 5.0])).unwrap();

        assert_eq!(output.up_line[2], 5.0);
        assert_eq!(output.down_line[2], 5.0);
        assert_eq!(output.z_score[2], 0.0);
    }

    #[test]
    fn test_bollinger_flat_inexact_decimal() {
        // 0.1 has no exact binary form, so the window mean drifts off 0.1
        let bands = BollingerBands::<f64>::new(BollingerConfig::new(3, 2.0));
        let output = bands.calculate(&quotes(&[0.1; 6])).unwrap();

        for i in 2..6 {
            assert_eq!(output.z_score[i], 0.0);
            assert_eq!(output.up_line[i], output.mid_line[i]);
            assert_eq!(output.down_line[i], output.mid_line[i]);
        }
    }

    #[test]
    fn test_bollinger_asymmetric_params() {
        let params = Params::new().with("deviation", 1.5).with("deviation_down", 3);
        let config = BollingerConfig::from_params(&params).unwrap();
        assert_eq!(config.deviation_up, 1.5);
        assert_eq!(config.deviation_down, 3.0);
    }

    #[test]
    fn test_bollinger_validation() {
        let config = BollingerConfig::new(2, 2.0).with_deviations(-1.0, 2.0);
        let err = BollingerBands::<f64>::new(config)
            .calculate(&quotes(&[1.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, IndicatorError::BadParameterValue { name: "deviation_up", .. }));

        let config = BollingerConfig::new(2, f64::NAN);
        assert!(config.validate().is_err());
    }
}
