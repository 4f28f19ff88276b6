//! Named, aligned series containers.
//!
//! [`DataSeries`] maps field names to equally long [`Series`] and keeps
//! insertion order (backed by `IndexMap`), so results serialize and iterate
//! deterministically. Indicator results are plain `DataSeries` under the
//! [`IndicatorResult`] name.

use std::collections::HashMap;

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::TaFloat;
use crate::series::Series;

/// Read access to the named series of a container.
///
/// Implemented by [`DataSeries`], [`Quotes`](crate::Quotes) and the typed
/// output structs of every indicator, so callers can address fields by name
/// regardless of the concrete container.
pub trait FieldAccess<T: TaFloat> {
    /// Look up a field by name.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::FieldNotFound`] if no such field exists.
    fn field(&self, name: &str) -> Result<&Series<T>>;

    /// Names of the fields present, in their canonical order.
    fn field_names(&self) -> Vec<&str>;

    /// Common length of every field.
    fn len(&self) -> usize;

    /// Returns `true` if the fields hold no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Column source for [`Quotes::from_table`](crate::Quotes::from_table).
pub trait Table<T: TaFloat> {
    /// Values of the named column, if present.
    fn column(&self, name: &str) -> Option<&[T]>;

    /// Timestamps (Unix epoch milliseconds), if the table carries them.
    fn timestamps(&self) -> Option<&[i64]> {
        None
    }
}

/// An ordered mapping from field name to equally long series.
///
/// # Example
///
/// ```rust
/// use qta_core::{DataSeries, FieldAccess, Series};
///
/// let data = DataSeries::from_columns(vec![
///     ("adx".to_string(), Series::from_vec(vec![f64::NAN, 25.0])),
///     ("p_di".to_string(), Series::from_vec(vec![f64::NAN, 30.0])),
/// ])
/// .unwrap();
///
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.field("p_di").unwrap()[1], 30.0);
/// assert!(data.field("m_di").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DataSeries<T: TaFloat> {
    fields: IndexMap<String, Series<T>>,
}

/// Output container of an indicator invocation.
pub type IndicatorResult<T> = DataSeries<T>;

#[cfg(feature = "serde")]
impl<'de, T: TaFloat + Deserialize<'de>> Deserialize<'de> for DataSeries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let fields = IndexMap::<String, Series<T>>::deserialize(deserializer)?;
        Self::from_columns(fields.into_iter().collect()).map_err(de::Error::custom)
    }
}

impl<T: TaFloat> DataSeries<T> {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Build a container from `(name, series)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if the series differ in
    /// length.
    pub fn from_columns(columns: Vec<(String, Series<T>)>) -> Result<Self> {
        let mut data = Self::new();
        for (name, series) in columns {
            data.insert(name, series)?;
        }
        Ok(data)
    }

    /// Build a container from series that the caller has already aligned.
    ///
    /// Used by indicator outputs whose fields are all derived from the same
    /// input length. Duplicate names keep the last series.
    #[must_use]
    pub fn aligned<const N: usize>(columns: [(&str, Series<T>); N]) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].1.len() == w[1].1.len()),
            "aligned columns must share a length"
        );
        Self {
            fields: columns
                .into_iter()
                .map(|(name, series)| (name.to_string(), series))
                .collect(),
        }
    }

    /// Add a field, enforcing the shared length.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] if `series` differs in
    /// length from the fields already present.
    pub fn insert(&mut self, name: String, series: Series<T>) -> Result<()> {
        if let Some(existing) = self.fields.values().next() {
            if existing.len() != series.len() {
                return Err(IndicatorError::LengthMismatch {
                    field: name,
                    expected: existing.len(),
                    actual: series.len(),
                });
            }
        }
        self.fields.insert(name, series);
        Ok(())
    }

    /// Number of fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if a field with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate over `(name, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series<T>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T: TaFloat> FieldAccess<T> for DataSeries<T> {
    fn field(&self, name: &str) -> Result<&Series<T>> {
        self.fields
            .get(name)
            .ok_or_else(|| IndicatorError::FieldNotFound(name.to_string()))
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn len(&self) -> usize {
        self.fields.values().next().map_or(0, Series::len)
    }
}

impl<T: TaFloat> Table<T> for DataSeries<T> {
    fn column(&self, name: &str) -> Option<&[T]> {
        self.fields.get(name).map(Series::as_slice)
    }
}

impl<T: TaFloat> Table<T> for HashMap<String, Vec<T>> {
    fn column(&self, name: &str) -> Option<&[T]> {
        self.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSeries<f64> {
        DataSeries::from_columns(vec![
            ("roc".to_string(), Series::from_vec(vec![f64::NAN, 0.5, 0.25])),
            ("smooth_roc".to_string(), Series::nan(3)),
        ])
        .unwrap()
    }

    #[test]
    fn test_field_lookup() {
        let data = sample();
        assert_eq!(data.len(), 3);
        assert_eq!(data.field_count(), 2);
        assert_eq!(data.field("roc").unwrap()[1], 0.5);
        assert_eq!(
            data.field("close"),
            Err(IndicatorError::FieldNotFound("close".to_string()))
        );
    }

    #[test]
    fn test_field_order_is_insertion_order() {
        let data = sample();
        assert_eq!(data.field_names(), vec!["roc", "smooth_roc"]);
        let names: Vec<&str> = data.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["roc", "smooth_roc"]);
    }

    #[test]
    fn test_length_enforced() {
        let err = DataSeries::from_columns(vec![
            ("a".to_string(), Series::from_vec(vec![1.0, 2.0])),
            ("b".to_string(), Series::from_vec(vec![1.0])),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            IndicatorError::LengthMismatch {
                field: "b".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_aligned() {
        let data = DataSeries::aligned([
            ("up", Series::from_vec(vec![2.0, 3.0])),
            ("down", Series::from_vec(vec![0.0, 1.0])),
        ]);
        assert_eq!(data.field_names(), vec!["up", "down"]);
        assert!(data.contains("down"));
        assert!(!data.is_empty());
    }

    #[test]
    fn test_hashmap_table() {
        let mut table: HashMap<String, Vec<f64>> = HashMap::new();
        table.insert("close".to_string(), vec![1.0, 2.0]);
        assert_eq!(table.column("close"), Some(&[1.0, 2.0][..]));
        assert!(table.column("open").is_none());
        assert!(Table::<f64>::timestamps(&table).is_none());
    }
}
