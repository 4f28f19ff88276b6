//! # qta-core
//!
//! Core types for the quotes-ta technical analysis library.
//!
//! - [`TaFloat`] - Trait for numeric types (f32/f64)
//! - [`Series`] - One aligned numeric column
//! - [`DataSeries`] / [`IndicatorResult`] - Named, equally long columns
//! - [`Quotes`] - OHLCV input shared by every indicator
//! - [`ma_calculate`] and [`MaType`] - The moving-average engine
//! - [`Params`] - Named indicator parameters
//! - [`Indicator`] - Indicator computation trait
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```rust
//! use qta_core::prelude::*;
//!
//! let closes = [100.0, 101.5, 99.8, 102.3, 101.0];
//! let smoothed = ma_calculate::<f64>(&closes, 3, MaType::Mma);
//! assert!(smoothed[1].is_nan());
//! assert!(!smoothed[2].is_nan());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod data_series;
pub mod error;
pub mod ma;
pub mod num;
pub mod params;
pub mod prelude;
pub mod quotes;
pub mod series;
pub mod traits;
pub mod utils;

pub use data_series::{DataSeries, FieldAccess, IndicatorResult, Table};
pub use error::{IndicatorError, Result};
pub use ma::{ma_calculate, MaType};
pub use num::TaFloat;
pub use params::{ParamValue, Params};
pub use quotes::{PriceField, Quotes};
pub use series::Series;
pub use traits::{Indicator, IndicatorConfig};
