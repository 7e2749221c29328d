use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;

use super::resample::{daily_calendar, forward_fill};
use super::table::Table;

/// Concatenate tables column-wise on one contiguous daily calendar.
///
/// The calendar spans the union of the inputs' date ranges. Cells for dates a
/// table does not cover are undefined, so columns of a table without rows are
/// undefined throughout. When two tables carry the same column, the first
/// table wins.
#[must_use]
pub fn merge_tables<I>(tables: I) -> Table
where
    I: IntoIterator<Item = Table>,
{
    let tables: Vec<Table> = tables.into_iter().collect();
    let start = tables.iter().filter_map(Table::first_date).min();
    let end = tables.iter().filter_map(Table::last_date).max();
    let calendar = match (start, end) {
        (Some(start), Some(end)) => daily_calendar(start, end),
        _ => Vec::new(),
    };

    let mut columns = BTreeMap::new();
    for t in tables {
        let (index, cols) = t.into_parts();
        for (field, cells) in cols {
            let Entry::Vacant(slot) = columns.entry(field) else {
                continue;
            };
            let mut placed = vec![None; calendar.len()];
            for (date, cell) in index.iter().zip(cells) {
                if let Some(pos) = start.and_then(|s| offset(s, *date)) {
                    placed[pos] = cell;
                }
            }
            slot.insert(placed);
        }
    }
    Table::from_parts(calendar, columns)
}

fn offset(start: NaiveDate, date: NaiveDate) -> Option<usize> {
    usize::try_from((date - start).num_days()).ok()
}

/// Drop leading rows until every column is defined.
///
/// Applied after forward fill, undefined cells can only be leading, so the
/// result has no undefined cells. When no row is complete the result has no
/// rows but keeps its columns.
#[must_use]
pub fn drop_leading_incomplete(table: Table) -> Table {
    let (index, columns) = table.into_parts();
    let first_complete = (0..index.len())
        .find(|&i| columns.values().all(|cells| cells[i].is_some()))
        .unwrap_or(index.len());
    if first_complete == 0 {
        return Table::from_parts(index, columns);
    }
    Table::from_parts(
        index[first_complete..].to_vec(),
        columns
            .into_iter()
            .map(|(f, cells)| (f, cells[first_complete..].to_vec()))
            .collect(),
    )
}

/// Merge per-provider tables into one complete, windowed table.
///
/// Steps: merge column-wise on the union daily calendar, forward fill every
/// column, drop leading rows that are still incomplete, then keep rows dated
/// on or after `cutoff` when one is given.
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "netliq_core::merge::align", skip_all, fields(cutoff = ?cutoff))
)]
pub fn align<I>(tables: I, cutoff: Option<NaiveDate>) -> Table
where
    I: IntoIterator<Item = Table>,
{
    let (index, mut columns) = merge_tables(tables).into_parts();
    for cells in columns.values_mut() {
        forward_fill(cells);
    }
    let complete = drop_leading_incomplete(Table::from_parts(index, columns));
    #[cfg(feature = "tracing")]
    tracing::debug!(rows = complete.len(), "aligned tables");
    match cutoff {
        Some(c) => complete.since(c),
        None => complete,
    }
}
