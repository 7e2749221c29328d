//! netliq-core
//!
//! Core types, traits, and utilities shared across the netliq workspace.
//!
//! - `types`: re-exports of the shared records from `netliq-types`.
//! - `source`: the `SeriesSource` trait implemented by data providers and the
//!   `collect` helper that turns one provider's catalog into a daily table.
//! - `timeseries`: the `Table` type plus resampling, merging, alignment,
//!   rolling statistics, and cadence inference.
//!
//! Sources are async (`async-trait`); everything in `timeseries` is pure and
//! synchronous.
#![warn(missing_docs)]

/// Series source trait and provider collection.
pub mod source;
/// Calendar-aligned tables and time-series utilities.
pub mod timeseries;
pub mod types;

pub use source::{SeriesSource, SeriesSpec, collect, tag_err};
pub use timeseries::infer::estimate_step_days;
pub use timeseries::merge::{align, drop_leading_incomplete, merge_tables};
pub use timeseries::resample::{daily_calendar, forward_fill, resample_to_daily};
pub use timeseries::rolling::rolling_mean;
pub use timeseries::table::Table;
pub use timeseries::Series;
pub use types::*;
