//! Average True Range (ATR) indicator.
//!
//! ATR measures market volatility by smoothing the True Range.

use core::marker::PhantomData;

use qta_core::{
    error::{IndicatorError, Result},
    ma::{ma_calculate, MaType},
    num::TaFloat,
    params::Params,
    quotes::Quotes,
    series::Series,
    traits::{Indicator, IndicatorConfig},
    utils::true_range,
    FieldAccess,
};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::output::output_fields;

/// Configuration for the ATR indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtrConfig {
    /// Smoothing period (default: 14).
    pub smooth: usize,
    /// Smoothing method (default: `mma`, Wilder's).
    pub ma_type: MaType,
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self {
            smooth: 14,
            ma_type: MaType::Mma,
        }
    }
}

impl AtrConfig {
    /// Create a new ATR configuration with the given smoothing period.
    pub fn new(smooth: usize) -> Self {
        Self {
            smooth,
            ..Self::default()
        }
    }

    /// Set the smoothing method.
    pub fn with_ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }
}

impl IndicatorConfig for AtrConfig {
    fn from_params(params: &Params) -> Result<Self> {
        params.ensure_known(&["smooth", "ma_type"])?;
        let defaults = Self::default();
        Ok(Self {
            smooth: params.usize_or("smooth", defaults.smooth)?,
            ma_type: MaType::cast(params.str_or("ma_type", defaults.ma_type.as_str())?)?,
        })
    }

    fn validate(&self) -> Result<()> {
        IndicatorError::ensure_positive("smooth", self.smooth)
    }
}

/// ATR series output.
#[derive(Debug, Clone, PartialEq)]
pub struct AtrOutput<T: TaFloat> {
    /// True Range, NaN on the first bar.
    pub tr: Series<T>,
    /// Smoothed True Range.
    pub atr: Series<T>,
    /// ATR as a percentage of the close, NaN where the close is zero.
    pub atrp: Series<T>,
}

output_fields!(AtrOutput { tr, atr, atrp });

/// Average True Range indicator.
///
/// # Formula
///
/// TR = max(High - Low, |High - Prev Close|, |Low - Prev Close|)
/// ATR = MA(TR, smooth)
/// ATRP = 100 * ATR / Close
#[derive(Debug, Clone)]
pub struct Atr<T: TaFloat> {
    config: AtrConfig,
    _marker: PhantomData<T>,
}

impl<T: TaFloat> Indicator<T> for Atr<T> {
    type Output = AtrOutput<T>;
    type Config = AtrConfig;

    const NAME: &'static str = "atr";

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
        self.config.smooth
    }

    fn calculate(&self, quotes: &Quotes<T>) -> Result<Self::Output> {
        self.config.validate()?;
        IndicatorError::ensure_len(self.min_periods(), quotes.len())?;
        trace!(smooth = self.config.smooth, ma_type = %self.config.ma_type, "computing atr");

        let close = quotes.close();
        let tr = true_range(quotes.high(), quotes.low(), close);
        let atr = ma_calculate(&tr, self.config.smooth, self.config.ma_type);
        let atrp = atr.zip_with(close, |a, c| {
            if c == T::ZERO {
                T::NAN
            } else {
                T::HUNDRED * a / c
            }
        });

        Ok(AtrOutput { tr, atr, atrp })
    }
}
