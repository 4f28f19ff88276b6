//! OHLCV quote container, the shared input of every indicator.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::data_series::{FieldAccess, Table};
use crate::error::{IndicatorError, Result};
use crate::num::TaFloat;
use crate::series::Series;

/// Price column selectable as an indicator source (`value` parameter).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriceField {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
}

impl PriceField {
    /// All selectable price fields.
    pub const ALL: [PriceField; 4] = [Self::Open, Self::High, Self::Low, Self::Close];

    /// Field name as used by [`FieldAccess::field`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
        }
    }

    /// Parse a `value` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] naming `value` for
    /// anything other than `open`, `high`, `low` or `close`.
    pub fn cast(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| {
                IndicatorError::bad_parameter(
                    "value",
                    name,
                    "must be one of ['open', 'high', 'low', 'close']",
                )
            })
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceField {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::cast(s)
    }
}

/// Synchronized OHLCV columns with optional volume and timestamps.
///
/// Required fields are always present; every present field has the same
/// length. Inputs are copied into owned storage on construction, and
/// deserialization goes through the same length checks.
///
/// Timestamps are not a series: they are reachable through
/// [`Quotes::time`] only, so `field("time")` fails and `field_names` never
/// lists `time`.
///
/// # Example
///
/// ```rust
/// use qta_core::{FieldAccess, PriceField, Quotes};
///
/// let quotes = Quotes::from_arrays(
///     &[10.0, 11.0],
///     &[12.0, 13.0],
///     &[9.0, 10.5],
///     &[11.5, 12.0],
/// )
/// .unwrap()
/// .with_volume(&[1_000.0, 1_200.0])
/// .unwrap();
///
/// assert_eq!(quotes.len(), 2);
/// assert_eq!(quotes.price(PriceField::High)[1], 13.0);
/// assert_eq!(quotes.field("volume").unwrap()[0], 1_000.0);
/// assert!(quotes.field("time").is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Quotes<T: TaFloat> {
    open: Series<T>,
    high: Series<T>,
    low: Series<T>,
    close: Series<T>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    volume: Option<Series<T>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    time: Option<Vec<i64>>,
}

impl<T: TaFloat> Quotes<T> {
    /// Build quotes from the four price columns.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if the columns differ in
    /// length from `open`.
    pub fn from_arrays(open: &[T], high: &[T], low: &[T], close: &[T]) -> Result<Self> {
        let len = open.len();
        check_len("high", len, high.len())?;
        check_len("low", len, low.len())?;
        check_len("close", len, close.len())?;

        Ok(Self {
            open: Series::from(open),
            high: Series::from(high),
            low: Series::from(low),
            close: Series::from(close),
            volume: None,
            time: None,
        })
    }

    /// Build quotes from a table exposing `open`, `high`, `low`, `close` and
    /// optionally `volume` columns and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::FieldNotFound`] for a missing price column and
    /// [`IndicatorError::LengthMismatch`] for misaligned columns.
    pub fn from_table<S: Table<T> + ?Sized>(table: &S) -> Result<Self> {
        let required = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| IndicatorError::FieldNotFound(name.to_string()))
        };

        let mut quotes = Self::from_arrays(
            required("open")?,
            required("high")?,
            required("low")?,
            required("close")?,
        )?;
        if let Some(volume) = table.column("volume") {
            quotes = quotes.with_volume(volume)?;
        }
        if let Some(time) = table.timestamps() {
            quotes = quotes.with_time(time)?;
        }
        Ok(quotes)
    }

    /// Attach a volume column.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if `volume` is misaligned.
    pub fn with_volume(mut self, volume: &[T]) -> Result<Self> {
        check_len("volume", self.len(), volume.len())?;
        self.volume = Some(Series::from(volume));
        Ok(self)
    }

    /// Attach timestamps (Unix epoch milliseconds).
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if `time` is misaligned.
    pub fn with_time(mut self, time: &[i64]) -> Result<Self> {
        check_len("time", self.len(), time.len())?;
        self.time = Some(time.to_vec());
        Ok(self)
    }

    /// Opening prices.
    #[must_use]
    pub fn open(&self) -> &Series<T> {
        &self.open
    }

    /// High prices.
    #[must_use]
    pub fn high(&self) -> &Series<T> {
        &self.high
    }

    /// Low prices.
    #[must_use]
    pub fn low(&self) -> &Series<T> {
        &self.low
    }

    /// Closing prices.
    #[must_use]
    pub fn close(&self) -> &Series<T> {
        &self.close
    }

    /// Volumes, if supplied.
    #[must_use]
    pub fn volume(&self) -> Option<&Series<T>> {
        self.volume.as_ref()
    }

    /// Timestamps, if supplied.
    #[must_use]
    pub fn time(&self) -> Option<&[i64]> {
        self.time.as_deref()
    }

    /// The price column selected by `field`.
    #[must_use]
    pub fn price(&self, field: PriceField) -> &Series<T> {
        match field {
            PriceField::Open => &self.open,
            PriceField::High => &self.high,
            PriceField::Low => &self.low,
            PriceField::Close => &self.close,
        }
    }
}

impl<T: TaFloat> FieldAccess<T> for Quotes<T> {
    fn field(&self, name: &str) -> Result<&Series<T>> {
        let series = match name {
            "volume" => self.volume.as_ref(),
            _ => PriceField::cast(name).ok().map(|field| self.price(field)),
        };
        series.ok_or_else(|| IndicatorError::FieldNotFound(name.to_string()))
    }

    fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = PriceField::ALL.iter().map(|f| f.as_str()).collect();
        if self.volume.is_some() {
            names.push("volume");
        }
        names
    }

    fn len(&self) -> usize {
        self.close.len()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: TaFloat + Deserialize<'de>> Deserialize<'de> for Quotes<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Columns<T> {
            open: Vec<T>,
            high: Vec<T>,
            low: Vec<T>,
            close: Vec<T>,
            #[serde(default)]
            volume: Option<Vec<T>>,
            #[serde(default)]
            time: Option<Vec<i64>>,
        }

        let columns = Columns::<T>::deserialize(deserializer)?;
        let build = || -> Result<Self> {
            let mut quotes =
                Self::from_arrays(&columns.open, &columns.high, &columns.low, &columns.close)?;
            if let Some(volume) = &columns.volume {
                quotes = quotes.with_volume(volume)?;
            }
            if let Some(time) = &columns.time {
                quotes = quotes.with_time(time)?;
            }
            Ok(quotes)
        };
        build().map_err(de::Error::custom)
    }
}

fn check_len(field: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(IndicatorError::LengthMismatch {
            field: field.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_series::DataSeries;
    use std::collections::HashMap;

    fn sample() -> Quotes<f64> {
        Quotes::from_arrays(
            &[100.0, 102.0, 101.0],
            &[105.0, 106.0, 104.0],
            &[99.0, 101.0, 100.0],
            &[102.0, 103.0, 101.0],
        )
        .unwrap()
    }

    #[test]
    fn test_price_field_cast() {
        assert_eq!(PriceField::cast("high").unwrap(), PriceField::High);
        assert_eq!("close".parse::<PriceField>().unwrap(), PriceField::Close);
        assert!(matches!(
            PriceField::cast("bogus"),
            Err(IndicatorError::BadParameterValue { name: "value", .. })
        ));
        assert_eq!(PriceField::default().to_string(), "close");
    }

    #[test]
    fn test_from_arrays() {
        let quotes = sample();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes.close().as_slice(), &[102.0, 103.0, 101.0]);
        assert!(quotes.volume().is_none());
        assert!(quotes.time().is_none());
        assert_eq!(quotes.field_names(), vec!["open", "high", "low", "close"]);
    }

    #[test]
    fn test_from_arrays_length_mismatch() {
        let err = Quotes::from_arrays(&[1.0, 2.0], &[1.0, 2.0], &[1.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::LengthMismatch {
                field: "low".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_optional_fields() {
        let quotes = sample()
            .with_volume(&[10.0, 20.0, 30.0])
            .unwrap()
            .with_time(&[1, 2, 3])
            .unwrap();
        assert_eq!(quotes.field("volume").unwrap()[2], 30.0);
        assert_eq!(quotes.time(), Some(&[1, 2, 3][..]));
        assert!(quotes.field_names().contains(&"volume"));

        assert!(sample().with_volume(&[1.0]).is_err());
        assert!(sample().with_time(&[1, 2]).is_err());
    }

    #[test]
    fn test_time_is_not_a_field() {
        let quotes = sample().with_time(&[1, 2, 3]).unwrap();
        assert_eq!(quotes.time(), Some(&[1, 2, 3][..]));
        assert_eq!(
            quotes.field("time"),
            Err(IndicatorError::FieldNotFound("time".to_string()))
        );
        assert_eq!(quotes.field_names(), vec!["open", "high", "low", "close"]);
    }

    #[test]
    fn test_field_not_found() {
        let quotes = sample();
        assert_eq!(
            quotes.field("volume"),
            Err(IndicatorError::FieldNotFound("volume".to_string()))
        );
        assert!(quotes.field("vwap").is_err());
    }

    #[test]
    fn test_from_table() {
        let frame = DataSeries::from_columns(vec![
            ("open".to_string(), Series::from_vec(vec![1.0, 2.0])),
            ("high".to_string(), Series::from_vec(vec![2.0, 3.0])),
            ("low".to_string(), Series::from_vec(vec![0.5, 1.5])),
            ("close".to_string(), Series::from_vec(vec![1.5, 2.5])),
            ("volume".to_string(), Series::from_vec(vec![100.0, 200.0])),
        ])
        .unwrap();

        let quotes = Quotes::from_table(&frame).unwrap();
        assert_eq!(quotes.low().as_slice(), &[0.5, 1.5]);
        assert_eq!(quotes.volume().unwrap().as_slice(), &[100.0, 200.0]);
    }

    #[test]
    fn test_from_table_missing_column() {
        let mut table: HashMap<String, Vec<f64>> = HashMap::new();
        table.insert("open".to_string(), vec![1.0]);
        table.insert("high".to_string(), vec![1.0]);
        table.insert("close".to_string(), vec![1.0]);

        assert_eq!(
            Quotes::from_table(&table),
            Err(IndicatorError::FieldNotFound("low".to_string()))
        );
    }
}
