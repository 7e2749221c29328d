//! Configuration types passed explicitly into the pipeline entry point.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lookback window in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Extra calendar days requested from sources beyond the lookback window so
/// rolling statistics have leading history.
pub const REFRESH_MARGIN_DAYS: i64 = 30;

/// How the cache gatekeeper treats the persisted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RefreshMode {
    /// Reuse the persisted table when it was written today; otherwise refresh.
    #[default]
    ReuseFresh,
    /// Skip the freshness check and refresh from the sources. A persisted table
    /// is still used as a fallback when the refresh fails.
    ForceRemote,
    /// Never contact the sources; return the persisted table regardless of age.
    Offline,
}

/// Output language for generated reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Language {
    /// Short language code used in report file names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Full language name used when instructing the report writer.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Zh => "Chinese (Simplified)",
        }
    }

    /// Resolve a language code; unknown codes fall back to English.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh" => Self::Zh,
            _ => Self::En,
        }
    }
}

/// Top-level configuration for the `Netliq` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetliqConfig {
    /// Calendar days of history kept in the merged table, counted back from today.
    pub lookback_days: u32,
    /// Cache reuse policy.
    pub refresh: RefreshMode,
    /// Directory holding the persisted merged table.
    pub cache_dir: PathBuf,
    /// Optional deadline for the remote refresh (both sources together).
    pub request_timeout: Option<Duration>,
    /// Language for generated reports.
    pub language: Language,
}

impl Default for NetliqConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            refresh: RefreshMode::default(),
            cache_dir: PathBuf::from("data_cache"),
            request_timeout: None,
            language: Language::default(),
        }
    }
}
