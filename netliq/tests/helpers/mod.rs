// Shared fixtures for the netliq integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use netliq::{Field, Row, Series, SeriesSource, SeriesSpec, Table};
use netliq_mock::{DynamicMockController, DynamicMockSource};

pub use netliq_mock::MockBehavior;

/// Build a `NaiveDate` without unwrap noise in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

/// `n` consecutive calendar days starting at `start`.
pub fn days(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| start + TimeDelta::days(i64::try_from(i).expect("small")))
        .collect()
}

/// Table on a contiguous calendar starting at `start`. Every column must have
/// the same length.
pub fn table(start: NaiveDate, cols: &[(Field, Vec<Option<f64>>)]) -> Table {
    let n = cols.first().map_or(0, |(_, c)| c.len());
    let columns: BTreeMap<Field, Vec<Option<f64>>> = cols.iter().cloned().collect();
    Table::from_columns(days(start, n), columns).expect("valid table")
}

/// Wrap defined values.
pub fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Macro components held constant for `n` rows.
pub fn flat_macro(start: NaiveDate, n: usize, walcl: f64, rrp: f64, tga: f64) -> Table {
    table(
        start,
        &[
            (Field::Walcl, vec![Some(walcl); n]),
            (Field::Rrp, vec![Some(rrp); n]),
            (Field::Tga, vec![Some(tga); n]),
        ],
    )
}

/// A row with the given defined cells.
pub fn row(date: NaiveDate, cells: &[(Field, f64)]) -> Row {
    Row {
        date,
        values: cells.iter().map(|(f, v)| (*f, Some(*v))).collect(),
    }
}

/// Daily series with a constant value over `[start, start + n)`.
pub fn flat_series(start: NaiveDate, n: usize, value: f64) -> Series {
    days(start, n).into_iter().map(|d| (d, value)).collect()
}

pub fn macro_catalog() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new(Field::Walcl, "WALCL"),
        SeriesSpec::new(Field::Rrp, "RRPONTSYD"),
        SeriesSpec::new(Field::Tga, "WTREGEN"),
    ]
}

pub fn market_catalog() -> Vec<SeriesSpec> {
    vec![
        SeriesSpec::new(Field::Spy, "SPY"),
        SeriesSpec::new(Field::Vix, "^VIX"),
        SeriesSpec::new(Field::Move, "^MOVE"),
    ]
}

/// Dynamic macro and market sources plus their controllers.
pub fn dynamic_sources() -> (
    Arc<dyn SeriesSource>,
    DynamicMockController,
    Arc<dyn SeriesSource>,
    DynamicMockController,
) {
    let (macro_src, macro_ctl) = DynamicMockSource::new_with_controller("dyn-macro", macro_catalog());
    let (market_src, market_ctl) =
        DynamicMockSource::new_with_controller("dyn-market", market_catalog());
    (macro_src, macro_ctl, market_src, market_ctl)
}

/// Make every series of both dynamic sources return daily data covering the
/// `days_back` days up to and including `today`.
pub async fn serve_daily(
    macro_ctl: &DynamicMockController,
    market_ctl: &DynamicMockController,
    today: NaiveDate,
    days_back: usize,
) {
    let start = today - TimeDelta::days(i64::try_from(days_back).expect("small") - 1);
    macro_ctl
        .set_behavior("WALCL", MockBehavior::Return(flat_series(start, days_back, 7_000_000.0)))
        .await;
    macro_ctl
        .set_behavior("RRPONTSYD", MockBehavior::Return(flat_series(start, days_back, 400.0)))
        .await;
    macro_ctl
        .set_behavior("WTREGEN", MockBehavior::Return(flat_series(start, days_back, 750.0)))
        .await;
    market_ctl
        .set_fallback_behavior(MockBehavior::Return(flat_series(start, days_back, 18.0)))
        .await;
}
