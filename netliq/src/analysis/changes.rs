use std::collections::BTreeMap;

use netliq_core::{Change, ChangeRecord, Field, Table};

/// Fields reported by the change analyzer, in report order.
pub const TRACKED_FIELDS: [Field; 7] = [
    Field::NetLiquidity,
    Field::Spy,
    Field::Vix,
    Field::Dxy,
    Field::Btc,
    Field::Move,
    Field::Us10y,
];

/// Row offsets behind the nominal one-week, two-week, and one-month windows.
pub const WINDOW_ROWS: [usize; 3] = [7, 14, 30];

/// Change between the latest cell and the cell `rows` positions back.
///
/// The reference is the `rows`-th cell counting back from the end, the latest
/// being the first. Returns [`Change::ZERO`] for a zero offset, and also when
/// the column has no more than `rows` cells or either endpoint is undefined.
#[must_use]
pub fn change_over(cells: &[Option<f64>], rows: usize) -> Change {
    let n = cells.len();
    if rows == 0 || n <= rows {
        return Change::ZERO;
    }
    let (Some(current), Some(previous)) = (cells[n - 1], cells[n - rows]) else {
        return Change::ZERO;
    };
    let delta = current - previous;
    let pct = if previous == 0.0 {
        0.0
    } else {
        delta / previous * 100.0
    };
    Change { delta, pct }
}

/// Change records for every tracked field present in `table`.
///
/// Absent fields are omitted.
#[must_use]
pub fn compute_changes(table: &Table) -> BTreeMap<Field, ChangeRecord> {
    TRACKED_FIELDS
        .into_iter()
        .filter_map(|field| {
            let cells = table.column(field)?;
            let [w1, w2, m1] = WINDOW_ROWS.map(|k| change_over(cells, k));
            Some((
                field,
                ChangeRecord {
                    current: cells.last().copied().flatten(),
                    one_week: w1,
                    two_weeks: w2,
                    one_month: m1,
                },
            ))
        })
        .collect()
}
