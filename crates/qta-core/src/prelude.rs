//! Prelude module for convenient imports.
//!
//! ```rust
//! use qta_core::prelude::*;
//!
//! let quotes: Quotes<f64> = Quotes::from_arrays(&[1.0], &[2.0], &[0.5], &[1.5]).unwrap();
//! assert_eq!(quotes.len(), 1);
//! ```

pub use crate::data_series::{DataSeries, FieldAccess, IndicatorResult, Table};
pub use crate::error::{IndicatorError, Result};
pub use crate::ma::{ma_calculate, MaType};
pub use crate::num::TaFloat;
pub use crate::params::{ParamValue, Params};
pub use crate::quotes::{PriceField, Quotes};
pub use crate::series::Series;
pub use crate::traits::{Indicator, IndicatorConfig};
pub use crate::utils::{diff, nan_padded, rolling_std, true_range};
