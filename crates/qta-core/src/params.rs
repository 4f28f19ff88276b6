//! Named indicator parameters.
//!
//! [`Params`] carries keyword-style arguments (`period=14`, `ma_type="mma"`)
//! from dynamic callers such as the registry or a command line into an
//! indicator's typed config.

use core::fmt;

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};

/// A single parameter value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    /// Integer value (periods).
    Int(i64),
    /// Floating-point value (deviations).
    Float(f64),
    /// String value (`ma_type`, `value`).
    Str(String),
}

impl ParamValue {
    /// Interpret raw text as an integer, then a float, then a string.
    ///
    /// ```rust
    /// use qta_core::ParamValue;
    ///
    /// assert_eq!(ParamValue::parse("14"), ParamValue::Int(14));
    /// assert_eq!(ParamValue::parse("2.5"), ParamValue::Float(2.5));
    /// assert_eq!(ParamValue::parse("mma"), ParamValue::Str("mma".into()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if let Ok(v) = raw.parse::<i64>() {
            Self::Int(v)
        } else if let Ok(v) = raw.parse::<f64>() {
            Self::Float(v)
        } else {
            Self::Str(raw.to_string())
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Ordered parameter map, keyed by parameter name.
///
/// # Example
///
/// ```rust
/// use qta_core::Params;
///
/// let params = Params::new().with("period", 10).with("ma_type", "ema");
/// assert_eq!(params.usize_or("period", 14).unwrap(), 10);
/// assert_eq!(params.usize_or("smooth", 14).unwrap(), 14);
/// assert_eq!(params.str_or("ma_type", "mma").unwrap(), "ema");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Params {
    values: IndexMap<String, ParamValue>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter (builder form).
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reject parameter names outside `known`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] for the first unknown name.
    pub fn ensure_known(&self, known: &[&str]) -> Result<()> {
        match self.values.keys().find(|key| !known.contains(&key.as_str())) {
            Some(key) => Err(IndicatorError::bad_parameter(
                "params",
                key,
                format!("unknown parameter, expected one of {known:?}"),
            )),
            None => Ok(()),
        }
    }

    /// Integer parameter, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] if the value is not a
    /// non-negative integer.
    pub fn usize_or(&self, name: &'static str, default: usize) -> Result<usize> {
        match self.values.get(name) {
            None => Ok(default),
            Some(value) => as_usize(name, value),
        }
    }

    /// Integer parameter without a default.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] if the parameter is
    /// missing or not a non-negative integer.
    pub fn required_usize(&self, name: &'static str) -> Result<usize> {
        match self.values.get(name) {
            None => Err(IndicatorError::bad_parameter(name, "<missing>", "is required")),
            Some(value) => as_usize(name, value),
        }
    }

    /// Numeric parameter, or `default` when absent. Integers are widened.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] for a string value.
    pub fn f64_or(&self, name: &'static str, default: f64) -> Result<f64> {
        match self.values.get(name) {
            None => Ok(default),
            Some(ParamValue::Int(v)) => Ok(*v as f64),
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(other) => Err(IndicatorError::bad_parameter(name, other, "must be a number")),
        }
    }

    /// String parameter, or `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] for a numeric value.
    pub fn str_or<'a>(&'a self, name: &'static str, default: &'a str) -> Result<&'a str> {
        match self.values.get(name) {
            None => Ok(default),
            Some(ParamValue::Str(v)) => Ok(v.as_str()),
            Some(other) => Err(IndicatorError::bad_parameter(name, other, "must be a string")),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn as_usize(name: &'static str, value: &ParamValue) -> Result<usize> {
    match value {
        ParamValue::Int(v) if *v > 0 => usize::try_from(*v)
            .map_err(|_| IndicatorError::bad_parameter(name, v, "is too large")),
        ParamValue::Int(v) => Err(IndicatorError::bad_parameter(
            name,
            v,
            "must be greater than 0",
        )),
        other => Err(IndicatorError::bad_parameter(name, other, "must be an integer")),
    }
}
