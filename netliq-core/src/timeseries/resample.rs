use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::Series;
use super::table::Table;
use crate::Field;

/// Every calendar day from `start` through `end`, inclusive.
///
/// Returns an empty vector when `start > end`.
#[must_use]
pub fn daily_calendar(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Carry the last defined value forward over undefined cells, in place.
///
/// Leading undefined cells stay undefined.
pub fn forward_fill(cells: &mut [Option<f64>]) {
    let mut last = None;
    for c in cells {
        match c {
            Some(v) if v.is_finite() => last = Some(*v),
            _ => *c = last,
        }
    }
}

/// Place a sparse series onto `calendar`, carrying the most recent observation
/// forward to each day.
fn fill_onto(calendar: &[NaiveDate], series: &Series) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(calendar.len());
    let mut obs = series.iter().peekable();
    let mut last = None;
    for day in calendar {
        while let Some((d, v)) = obs.peek() {
            if *d > day {
                break;
            }
            if v.is_finite() {
                last = Some(**v);
            }
            obs.next();
        }
        out.push(last);
    }
    out
}

/// Resample one provider's series onto a contiguous daily calendar.
///
/// The calendar spans from the earliest observation of any series to the
/// latest. Each column carries its most recent observation forward; days
/// before a series' first observation are undefined. A series without
/// observations still becomes a column, undefined on every day.
#[must_use]
pub fn resample_to_daily(series: BTreeMap<Field, Series>) -> Table {
    let start = series.values().filter_map(|s| s.keys().next()).min().copied();
    let end = series
        .values()
        .filter_map(|s| s.keys().next_back())
        .max()
        .copied();
    let (Some(start), Some(end)) = (start, end) else {
        let columns = series.into_keys().map(|f| (f, Vec::new())).collect();
        return Table::from_parts(Vec::new(), columns);
    };
    let calendar = daily_calendar(start, end);
    let columns = series
        .iter()
        .map(|(field, s)| (*field, fill_onto(&calendar, s)))
        .collect();
    Table::from_parts(calendar, columns)
}
