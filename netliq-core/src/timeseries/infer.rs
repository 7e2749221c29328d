use super::Series;

/// Estimate a series' native cadence in days from adjacent observation gaps.
///
/// Prefer the mode (most frequent gap); if there is no unique mode, return the
/// lower median.
///
/// ```
/// use chrono::NaiveDate;
/// use netliq_core::{Series, estimate_step_days};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// // Gaps: 7, 7, 7, 14  => unique mode is 7
/// let weekly: Series = [(d(1), 1.0), (d(8), 1.0), (d(15), 1.0), (d(22), 1.0)]
///     .into_iter()
///     .chain([(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(), 1.0)])
///     .collect();
/// assert_eq!(estimate_step_days(&weekly), Some(7));
/// ```
///
/// Returns `None` if fewer than two observations are present.
#[must_use]
pub fn estimate_step_days(series: &Series) -> Option<i64> {
    let dates: Vec<_> = series.keys().collect();
    let mut gaps: Vec<i64> = dates
        .windows(2)
        .map(|w| (*w[1] - *w[0]).num_days())
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_unstable();

    let mut best_gap = gaps[0];
    let mut best_count = 0usize;
    let mut tied = false;
    let mut i = 0;
    while i < gaps.len() {
        let g = gaps[i];
        let run = gaps[i..].iter().take_while(|&&x| x == g).count();
        if run > best_count {
            best_gap = g;
            best_count = run;
            tied = false;
        } else if run == best_count {
            tied = true;
        }
        i += run;
    }

    if tied {
        Some(gaps[(gaps.len() - 1) / 2])
    } else {
        Some(best_gap)
    }
}
