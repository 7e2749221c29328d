use chrono::{Datelike, Days, NaiveDate, Weekday};
use netliq_core::Series;

mod macro_data;
mod market;

/// Calendar days of history served before the fixture end date.
const HISTORY_DAYS: u64 = 480;

/// Last date covered by every fixture series (a Friday).
#[must_use]
pub fn fixture_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

pub fn by_series_id(id: &str) -> Option<Series> {
    macro_data::by_series_id(id).or_else(|| market::by_series_id(id))
}

/// `(day number, date)` for every calendar day of the fixture window.
fn calendar() -> impl Iterator<Item = (u32, NaiveDate)> {
    let first = fixture_end()
        .checked_sub_days(Days::new(HISTORY_DAYS - 1))
        .unwrap();
    first
        .iter_days()
        .take_while(|d| *d <= fixture_end())
        .zip(0u32..)
        .map(|(d, i)| (i, d))
}

fn is_business_day(d: NaiveDate) -> bool {
    !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

fn build(keep: impl Fn(NaiveDate) -> bool, value: impl Fn(f64) -> f64) -> Series {
    calendar()
        .filter(|(_, d)| keep(*d))
        .map(|(i, d)| (d, value(f64::from(i))))
        .collect()
}

fn business_days(value: impl Fn(f64) -> f64) -> Series {
    build(is_business_day, value)
}

fn wednesdays(value: impl Fn(f64) -> f64) -> Series {
    build(|d| d.weekday() == Weekday::Wed, value)
}

fn every_day(value: impl Fn(f64) -> f64) -> Series {
    build(|_| true, value)
}
