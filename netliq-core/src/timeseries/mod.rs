//! Time-series utilities shared by sources and the orchestrator.
//!
//! Modules include:
//! - `table`: the date-indexed, append-only-by-column `Table`
//! - `resample`: forward-fill sparse series onto a daily calendar
//! - `merge`: join provider tables and align them to a lookback window
//! - `rolling`: trailing window statistics
//! - `infer`: native cadence detection
use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Cadence inference helpers.
pub mod infer;
/// Column-wise merge and calendar alignment.
pub mod merge;
/// Daily resampling with forward fill.
pub mod resample;
/// Trailing window statistics.
pub mod rolling;
/// The `Table` type.
pub mod table;
pub(crate) mod util;

/// A raw, possibly sparse series of observations keyed by date.
pub type Series = BTreeMap<NaiveDate, f64>;
