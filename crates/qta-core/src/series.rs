//! A single aligned numeric column.
//!
//! [`Series`] is the unit every quote field and indicator output is stored
//! in. Once built it is only read; indicators produce fresh series rather than
//! mutating their inputs.

use core::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::num::TaFloat;

/// A contiguous column of floating-point values, NaN marking undefined cells.
///
/// # Example
///
/// ```rust
/// use qta_core::Series;
///
/// let series: Series<f64> = Series::from_vec(vec![f64::NAN, 1.0, 2.0]);
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.nan_count(), 1);
/// assert_eq!(series.first_valid_index(), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Series<T: TaFloat> {
    data: Vec<T>,
}

impl<T: TaFloat> Series<T> {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Wrap an existing vector.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// A series of `len` NaN values.
    #[must_use]
    pub fn nan(len: usize) -> Self {
        Self {
            data: vec![T::NAN; len],
        }
    }

    /// Number of cells, NaN included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the series, returning the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Number of NaN cells.
    #[must_use]
    pub fn nan_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }

    /// Index of the first non-NaN cell, if any.
    #[must_use]
    pub fn first_valid_index(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_nan())
    }

    /// Apply `f` to every cell, producing a new series of the same length.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(&T) -> T,
    {
        Self {
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Combine two series cell by cell.
    ///
    /// The result has the length of the shorter operand; callers combine
    /// series of one container, which share a length.
    #[must_use]
    pub fn zip_with<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(T, T) -> T,
    {
        Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl<T: TaFloat> Deref for Series<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: TaFloat> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T: TaFloat> From<Vec<T>> for Series<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: TaFloat> From<&[T]> for Series<T> {
    fn from(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }
}

impl<'a, T: TaFloat> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
