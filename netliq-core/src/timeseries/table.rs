use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::util::{ensure_strictly_ascending, finite};
use crate::{Field, NetliqError, Row};

/// A date-indexed table of named numeric columns.
///
/// The index is strictly ascending and every column has exactly one cell per
/// index entry. `None` marks an undefined cell; non-finite inputs are stored as
/// `None`. Once built, existing cells never change: later stages only append
/// new columns via [`Table::with_column`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    index: Vec<NaiveDate>,
    columns: BTreeMap<Field, Vec<Option<f64>>>,
}

impl Table {
    /// An empty table with no rows and no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from an index and its columns.
    ///
    /// # Errors
    /// Returns `Data` if the index is not strictly ascending or any column's
    /// length differs from the index length.
    pub fn from_columns(
        index: Vec<NaiveDate>,
        columns: BTreeMap<Field, Vec<Option<f64>>>,
    ) -> Result<Self, NetliqError> {
        ensure_strictly_ascending(&index)?;
        for (field, cells) in &columns {
            if cells.len() != index.len() {
                return Err(NetliqError::Data(format!(
                    "column {field} has {} cells for {} rows",
                    cells.len(),
                    index.len()
                )));
            }
        }
        Ok(Self::from_parts(index, columns))
    }

    /// Assemble a table whose shape is already known to be valid.
    pub(crate) fn from_parts(
        index: Vec<NaiveDate>,
        mut columns: BTreeMap<Field, Vec<Option<f64>>>,
    ) -> Self {
        for cells in columns.values_mut() {
            for c in cells.iter_mut() {
                *c = finite(*c);
            }
        }
        Self { index, columns }
    }

    pub(crate) fn into_parts(self) -> (Vec<NaiveDate>, BTreeMap<Field, Vec<Option<f64>>>) {
        (self.index, self.columns)
    }

    /// Dates of the rows, ascending.
    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Columns present, in field order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.columns.keys().copied()
    }

    /// Whether `field` is a column of the table.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    /// Cells of one column, or `None` when the column is absent.
    #[must_use]
    pub fn column(&self, field: Field) -> Option<&[Option<f64>]> {
        self.columns.get(&field).map(Vec::as_slice)
    }

    /// First date of the index.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.index.first().copied()
    }

    /// Last date of the index.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.index.last().copied()
    }

    /// Row at position `pos`.
    #[must_use]
    pub fn row(&self, pos: usize) -> Option<Row> {
        let date = *self.index.get(pos)?;
        let values = self
            .columns
            .iter()
            .map(|(f, cells)| (*f, cells[pos]))
            .collect();
        Some(Row { date, values })
    }

    /// The latest row.
    #[must_use]
    pub fn latest(&self) -> Option<Row> {
        self.len().checked_sub(1).and_then(|p| self.row(p))
    }

    /// Append a new column.
    ///
    /// # Errors
    /// Returns `Data` if the column already exists or its length differs from
    /// the number of rows.
    pub fn with_column(
        mut self,
        field: Field,
        cells: Vec<Option<f64>>,
    ) -> Result<Self, NetliqError> {
        if self.columns.contains_key(&field) {
            return Err(NetliqError::Data(format!("column {field} already present")));
        }
        if cells.len() != self.index.len() {
            return Err(NetliqError::Data(format!(
                "column {field} has {} cells for {} rows",
                cells.len(),
                self.index.len()
            )));
        }
        self.columns
            .insert(field, cells.into_iter().map(finite).collect());
        Ok(self)
    }

    /// Keep only rows dated on or after `cutoff`.
    #[must_use]
    pub fn since(self, cutoff: NaiveDate) -> Self {
        let skip = self.index.partition_point(|d| *d < cutoff);
        if skip == 0 {
            return self;
        }
        let (index, columns) = self.into_parts();
        Self {
            index: index[skip..].to_vec(),
            columns: columns
                .into_iter()
                .map(|(f, cells)| (f, cells[skip..].to_vec()))
                .collect(),
        }
    }
}
