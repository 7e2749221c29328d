//! On-disk persistence of the merged table.
//!
//! A single CSV artifact per cache directory: a `date` column followed by one
//! column per field, undefined cells left empty. Freshness is judged by the
//! file's last-write date in local time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use netliq_core::{Field, NetliqError, Table};

/// File name of the persisted table inside the cache directory.
pub const CACHE_FILE_NAME: &str = "macro_data.csv";

const DATE_HEADER: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads and writes the persisted merged table.
#[derive(Debug, Clone)]
pub struct TableCache {
    dir: PathBuf,
}

impl TableCache {
    /// A cache rooted at `dir`. Nothing is touched until the first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the artifact.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the artifact.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    /// Local calendar date of the artifact's last write, if it exists.
    #[must_use]
    pub fn modified_on(&self) -> Option<NaiveDate> {
        let modified = fs::metadata(self.path()).ok()?.modified().ok()?;
        Some(DateTime::<Local>::from(modified).date_naive())
    }

    /// Whether the artifact was written on `today`.
    #[must_use]
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.modified_on() == Some(today)
    }

    /// Read the persisted table. Returns `Ok(None)` when there is none.
    ///
    /// # Errors
    /// Returns `Cache` when the file cannot be read and `Data` when its
    /// content is not a valid table.
    pub fn load(&self) -> Result<Option<Table>, NetliqError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| NetliqError::Cache(format!("open {}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| NetliqError::Cache(format!("read header: {e}")))?
            .clone();
        let mut names = headers.iter();
        if names.next() != Some(DATE_HEADER) {
            return Err(NetliqError::Data(format!(
                "cache header must start with `{DATE_HEADER}`"
            )));
        }
        let fields = names
            .map(str::parse::<Field>)
            .collect::<Result<Vec<_>, _>>()?;

        let mut index = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); fields.len()];
        for record in reader.records() {
            let record = record.map_err(|e| NetliqError::Cache(format!("read row: {e}")))?;
            let mut cells = record.iter();
            let raw_date = cells.next().unwrap_or_default();
            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
                .map_err(|e| NetliqError::Data(format!("bad cache date {raw_date:?}: {e}")))?;
            index.push(date);
            for (col, raw) in columns.iter_mut().zip(cells) {
                col.push(parse_cell(raw)?);
            }
        }

        let columns: BTreeMap<Field, Vec<Option<f64>>> = fields.into_iter().zip(columns).collect();
        Table::from_columns(index, columns).map(Some)
    }

    /// Persist `table`, replacing any previous artifact.
    ///
    /// The table is written to a sibling temporary file first and then renamed
    /// over the artifact.
    ///
    /// # Errors
    /// Returns `Cache` when the directory or file cannot be written.
    pub fn store(&self, table: &Table) -> Result<(), NetliqError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| NetliqError::Cache(format!("create {}: {e}", self.dir.display())))?;
        let tmp = self.dir.join(format!("{CACHE_FILE_NAME}.tmp"));
        write_csv(&tmp, table)?;
        fs::rename(&tmp, self.path())
            .map_err(|e| NetliqError::Cache(format!("replace cache file: {e}")))
    }
}

fn parse_cell(raw: &str) -> Result<Option<f64>, NetliqError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|e| NetliqError::Data(format!("bad cache value {raw:?}: {e}")))
}

fn write_csv(path: &Path, table: &Table) -> Result<(), NetliqError> {
    let cache_err = |e: csv::Error| NetliqError::Cache(format!("write {}: {e}", path.display()));
    let mut writer = csv::Writer::from_path(path).map_err(cache_err)?;

    let fields: Vec<Field> = table.fields().collect();
    let header = std::iter::once(DATE_HEADER).chain(fields.iter().map(|f| f.as_str()));
    writer.write_record(header).map_err(cache_err)?;

    let columns: Vec<&[Option<f64>]> = fields.iter().filter_map(|f| table.column(*f)).collect();
    for (pos, date) in table.index().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(date.format(DATE_FORMAT).to_string());
        record.extend(
            columns
                .iter()
                .map(|c| c[pos].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record).map_err(cache_err)?;
    }
    writer
        .flush()
        .map_err(|e| NetliqError::Cache(format!("flush {}: {e}", path.display())))
}
