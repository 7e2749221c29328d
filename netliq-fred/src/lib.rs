//! netliq-fred
//!
//! Series source backed by the FRED `series/observations` endpoint. Serves the
//! three macro components of net liquidity in their native cadence and unit:
//! the central-bank balance sheet (weekly, millions), overnight reverse repo
//! (business days, billions), and the treasury general account (weekly,
//! billions).
#![warn(missing_docs)]

mod wire;

use async_trait::async_trait;
use chrono::NaiveDate;
use netliq_core::{Field, NetliqError, Series, SeriesSource, SeriesSpec};
use url::Url;

/// Default FRED API host.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org";

/// Environment variable holding the FRED API key.
pub const API_KEY_ENV: &str = "FRED_API_KEY";

static CATALOG: [SeriesSpec; 3] = [
    SeriesSpec::new(Field::Walcl, "WALCL"),
    SeriesSpec::new(Field::Rrp, "RRPONTSYD"),
    SeriesSpec::new(Field::Tga, "WTREGEN"),
];

/// Public source type. Production users will construct with `FredSource::new_default()`.
pub struct FredSource {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Default for FredSource {
    fn default() -> Self {
        Self::new_default()
    }
}

impl FredSource {
    /// Stable source name used in logs and error tags.
    pub const NAME: &'static str = "netliq-fred";

    /// Build a source that reads its API key from `FRED_API_KEY`.
    ///
    /// A missing key is reported as a configuration error on the first fetch.
    #[must_use]
    pub fn new_default() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok();
        Self::from_parts(reqwest::Client::new(), api_key)
    }

    /// Build a source with an explicit API key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::from_parts(reqwest::Client::new(), Some(api_key.into()))
    }

    /// Build from a provided `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self::from_parts(http, api_key)
    }

    fn from_parts(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Point the source at a different host (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn observations_url(
        &self,
        series_id: &str,
        api_key: &str,
        start: Option<NaiveDate>,
    ) -> Result<Url, NetliqError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| NetliqError::InvalidArg(format!("bad FRED base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| NetliqError::InvalidArg("FRED base url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["fred", "series", "observations"]);
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("series_id", series_id)
                .append_pair("api_key", api_key)
                .append_pair("file_type", "json");
            if let Some(s) = start {
                q.append_pair("observation_start", &s.format("%Y-%m-%d").to_string());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SeriesSource for FredSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "FRED"
    }

    fn catalog(&self) -> &[SeriesSpec] {
        &CATALOG
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "netliq_fred::fetch",
            skip_all,
            fields(series_id = series_id, start = ?start),
        )
    )]
    async fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
    ) -> Result<Series, NetliqError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| NetliqError::configuration(Self::NAME, format!("{API_KEY_ENV} not set")))?;
        let url = self.observations_url(series_id, api_key, start)?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| NetliqError::remote(Self::NAME, e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| NetliqError::remote(Self::NAME, e.to_string()))?;
        if !status.is_success() {
            let detail = wire::error_message(&body).unwrap_or_else(|| status.to_string());
            return Err(NetliqError::remote(
                Self::NAME,
                format!("{series_id}: {detail}"),
            ));
        }

        let series = wire::parse_observations(&body)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(points = series.len(), "parsed observations");
        Ok(series)
    }
}
