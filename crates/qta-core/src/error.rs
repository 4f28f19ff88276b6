//! Error types for indicator computation and data access.
//!
//! Every error is raised before any output is allocated; indicators never
//! return partial results.

use thiserror::Error;

/// Result type alias for indicator operations that may fail.
pub type Result<T> = core::result::Result<T, IndicatorError>;

/// Errors that can occur while building quotes or computing indicators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// A parameter is outside its domain or does not name a known variant.
    #[error("Bad value for parameter '{name}': {value} ({reason})")]
    BadParameterValue {
        /// Name of the parameter.
        name: &'static str,
        /// Provided value as string.
        value: String,
        /// What was expected instead.
        reason: String,
    },

    /// The input series is shorter than the requested period(s) allow.
    #[error("Too little data: need {required} points, got {actual}")]
    TooLittleData {
        /// Minimum number of data points.
        required: usize,
        /// Number of data points provided.
        actual: usize,
    },

    /// A named series is absent from a quotes or result container.
    #[error("Data series not found: '{0}'")]
    FieldNotFound(String),

    /// No indicator is registered under the requested name.
    #[error("Indicator not found: '{0}'")]
    IndicatorNotFound(String),

    /// A series does not match the length of its container.
    #[error("Series length mismatch for '{field}': expected {expected}, got {actual}")]
    LengthMismatch {
        /// Name of the offending series.
        field: String,
        /// Length shared by the container.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },
}

impl IndicatorError {
    /// Shorthand for [`IndicatorError::BadParameterValue`].
    #[must_use]
    pub fn bad_parameter(
        name: &'static str,
        value: impl core::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::BadParameterValue {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Check that a period-like parameter is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::BadParameterValue`] when `value == 0`.
    pub fn ensure_positive(name: &'static str, value: usize) -> Result<()> {
        if value == 0 {
            return Err(Self::bad_parameter(name, value, "must be greater than 0"));
        }
        Ok(())
    }

    /// Check that `actual` data points satisfy a minimum of `required`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::TooLittleData`] when `actual < required`.
    pub fn ensure_len(required: usize, actual: usize) -> Result<()> {
        if actual < required {
            return Err(Self::TooLittleData { required, actual });
        }
        Ok(())
    }
}
