//! Average Directional Index (ADX) indicator.
//!
//! ADX measures trend strength regardless of direction, alongside the
//! positive and negative directional indicators (+DI, -DI).

use core::marker::PhantomData;

use qta_core::{
    error::{IndicatorError, Result},
    ma::{ma_calculate, MaType},
    num::TaFloat,
    params::Params,
    quotes::Quotes,
    series::Series,
    traits::{Indicator, IndicatorConfig},
    utils::diff,
    FieldAccess,
};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::output::output_fields;
use crate::volatility::atr::{Atr, AtrConfig};

/// Configuration for the ADX indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdxConfig {
    /// Period for directional movement and ATR smoothing (default: 14).
    pub period: usize,
    /// Period for smoothing DX into ADX (default: 14).
    pub smooth: usize,
    /// Smoothing method used at every stage (default: `mma`).
    pub ma_type: MaType,
}

impl Default for AdxConfig {
    fn default() -> Self {
        Self {
            period: 14,
            smooth: 14,
            ma_type: MaType::Mma,
        }
    }
}

impl AdxConfig {
    /// Create a new ADX configuration with the given DI and ADX periods.
    pub fn new(period: usize, smooth: usize) -> Self {
        Self {
            period,
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

impl IndicatorConfig for AdxConfig {
    fn from_params(params: &Params) -> Result<Self> {
        params.ensure_known(&["period", "smooth", "ma_type"])?;
        let defaults = Self::default();
        Ok(Self {
            period: params.usize_or("period", defaults.period)?,
            smooth: params.usize_or("smooth", defaults.smooth)?,
            ma_type: MaType::cast(params.str_or("ma_type", defaults.ma_type.as_str())?)?,
        })
    }

    fn validate(&self) -> Result<()> {
        IndicatorError::ensure_positive("period", self.period)?;
        IndicatorError::ensure_positive("smooth", self.smooth)
    }
}

/// ADX output with the directional indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct AdxOutput<T: TaFloat> {
    /// Average Directional Index.
    pub adx: Series<T>,
    /// Positive Directional Indicator (+DI).
    pub p_di: Series<T>,
    /// Negative Directional Indicator (-DI).
    pub m_di: Series<T>,
}

output_fields!(AdxOutput { adx, p_di, m_di });

/// Average Directional Index indicator.
///
/// # Formula
///
/// ```text
/// up   = High - Prev High
/// down = Prev Low - Low
/// +DM  = up   if up > down and up > 0, else 0
/// -DM  = down if down > up and down > 0, else 0
/// +DI  = 100 * MA(+DM, period) / ATR(period)
/// -DI  = 100 * MA(-DM, period) / ATR(period)
/// DX   = 100 * |+DI - -DI| / (+DI + -DI), 0 when both DI are 0
/// ADX  = MA(DX, smooth)
/// ```
///
/// On input without NaN gaps, DI is defined from bar `period` and ADX
/// from bar `period + smooth - 1`.
#[derive(Debug, Clone)]
pub struct Adx<T: TaFloat> {
    config: AdxConfig,
    _marker: PhantomData<T>,
}

impl<T: TaFloat> Adx<T> {
    /// Split bar-to-bar moves into (+DM, -DM); the smaller side of each bar
    /// and any non-positive move are zeroed.
    fn directional_movement(high: &[T], low: &[T]) -> (Series<T>, Series<T>) {
        let up = diff(high);
        let down = diff(low).map(|v| -*v);

        let mut p_dm = Vec::with_capacity(up.len());
        let mut m_dm = Vec::with_capacity(up.len());
        for (&u, &d) in up.iter().zip(down.iter()) {
            p_dm.push(if u <= d || u < T::ZERO { T::ZERO } else { u });
            m_dm.push(if d <= u || d < T::ZERO { T::ZERO } else { d });
        }

        (Series::from_vec(p_dm), Series::from_vec(m_dm))
    }
}

impl<T: TaFloat> Indicator<T> for Adx<T> {
    type Output = AdxOutput<T>;
    type Config = AdxConfig;

    const NAME: &'static str = "adx";

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

        let AdxConfig {
            period,
            smooth,
            ma_type,
        } = *self.config();
        trace!(period, smooth, ma_type = %ma_type, "computing adx");

        let (p_dm, m_dm) = Self::directional_movement(quotes.high(), quotes.low());
        let atr = Atr::<T>::new(AtrConfig::new(period).with_ma_type(ma_type))
            .calculate(quotes)?
            .atr;

        let p_di =
            ma_calculate(&p_dm, period, ma_type).zip_with(&atr, |dm, tr| T::HUNDRED * dm / tr);
        let m_di =
            ma_calculate(&m_dm, period, ma_type).zip_with(&atr, |dm, tr| T::HUNDRED * dm / tr);

        let dx = p_di.zip_with(&m_di, |p, m| {
            let total = p + m;
            if total == T::ZERO {
                T::ZERO
            } else {
                T::HUNDRED * (p - m).abs() / total
            }
        });
        let adx = ma_calculate(&dx, smooth, ma_type);

        Ok(AdxOutput { adx, p_di, m_di })
    }
}
