//! Report envelopes exchanged with the report writer and report storage.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{ChangeRecord, Row, SignalRecord};
use crate::field::Field;

/// Serializable snapshot handed to the report writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    /// Classifier output for the latest row.
    pub signals: SignalRecord,
    /// Change records keyed by tracked field.
    pub metrics: BTreeMap<Field, ChangeRecord>,
    /// Latest row of the analyzed table, if any.
    pub latest_values: Option<Row>,
}

/// A persisted report keyed by `(date, language)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    /// Report date.
    pub date: NaiveDate,
    /// Language code (e.g. "en").
    pub language: String,
    /// Report body (Markdown).
    pub content: String,
    /// Context the report was generated from.
    pub context_data: Option<serde_json::Value>,
    /// When the report was saved.
    pub timestamp: DateTime<Utc>,
}

/// Identity of a stored report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportKey {
    /// Report date.
    pub date: NaiveDate,
    /// Language code.
    pub language: String,
}
