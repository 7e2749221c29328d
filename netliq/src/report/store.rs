use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use netliq_core::{NetliqError, ReportContext, ReportKey, StoredReport};

/// Directory of generated reports, one JSON file per `(date, language)`.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

fn file_name(date: NaiveDate, language: &str) -> String {
    format!("{date}_{language}.json")
}

fn parse_file_name(name: &str) -> Option<ReportKey> {
    let stem = name.strip_suffix(".json")?;
    let (date, language) = stem.split_once('_')?;
    if language.is_empty() {
        return None;
    }
    Some(ReportKey {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?,
        language: language.to_string(),
    })
}

fn ensure_language_code(language: &str) -> Result<(), NetliqError> {
    let ok = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if ok {
        Ok(())
    } else {
        Err(NetliqError::InvalidArg(format!(
            "invalid language code: {language:?}"
        )))
    }
}

impl ReportStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the reports.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a report, replacing any previous one for the same key.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a language code that is not alphanumeric (plus
    /// `-`), `Data` when the context cannot be serialized, and `Cache` when the
    /// file cannot be written.
    pub fn save(
        &self,
        date: NaiveDate,
        language: &str,
        content: &str,
        context: Option<&ReportContext>,
    ) -> Result<StoredReport, NetliqError> {
        ensure_language_code(language)?;
        let context_data = context
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| NetliqError::Data(format!("serialize report context: {e}")))?;
        let report = StoredReport {
            date,
            language: language.to_string(),
            content: content.to_string(),
            context_data,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| NetliqError::Data(format!("serialize report: {e}")))?;

        fs::create_dir_all(&self.dir)
            .map_err(|e| NetliqError::Cache(format!("create {}: {e}", self.dir.display())))?;
        let path = self.dir.join(file_name(date, language));
        fs::write(&path, json)
            .map_err(|e| NetliqError::Cache(format!("write {}: {e}", path.display())))?;
        Ok(report)
    }

    /// Load a report. Missing or unreadable files yield `None`.
    #[must_use]
    pub fn load(&self, date: NaiveDate, language: &str) -> Option<StoredReport> {
        ensure_language_code(language).ok()?;
        let raw = fs::read_to_string(self.dir.join(file_name(date, language))).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Every stored `(date, language)` pair, newest date first and languages
    /// ascending within a date.
    ///
    /// Files that are not named `<YYYY-MM-DD>_<language>.json` are skipped.
    #[must_use]
    pub fn list(&self) -> Vec<ReportKey> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut keys: Vec<ReportKey> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|e| parse_file_name(e.file_name().to_str()?))
            .collect();
        keys.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.language.cmp(&b.language))
        });
        keys
    }
}
