//! netliq-yahoo
//!
//! Series source backed by the Yahoo Finance v8 chart endpoint. Serves daily
//! closes for the market series tracked alongside net liquidity.
#![warn(missing_docs)]

mod wire;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use netliq_core::{Field, NetliqError, Series, SeriesSource, SeriesSpec};
use url::Url;

use wire::Decoded;

/// Default chart API host.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Range requested when no start date is given.
const DEFAULT_RANGE: &str = "1y";

static CATALOG: [SeriesSpec; 9] = [
    SeriesSpec::new(Field::Spy, "SPY"),
    SeriesSpec::new(Field::Vix, "^VIX"),
    SeriesSpec::new(Field::Move, "^MOVE"),
    SeriesSpec::new(Field::Hyg, "HYG"),
    SeriesSpec::new(Field::Dxy, "DX-Y.NYB"),
    SeriesSpec::new(Field::Gold, "GC=F"),
    SeriesSpec::new(Field::Oil, "CL=F"),
    SeriesSpec::new(Field::Btc, "BTC-USD"),
    SeriesSpec::new(Field::Us10y, "^TNX"),
];

/// Public source type. Production users will construct with `YahooSource::new_default()`.
pub struct YahooSource {
    http: reqwest::Client,
    base_url: String,
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::new_default()
    }
}

impl YahooSource {
    /// Stable source name used in logs and error tags.
    pub const NAME: &'static str = "netliq-yahoo";

    /// Build a source with a default HTTP client.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Build from a provided `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
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

    fn chart_url(&self, symbol: &str, start: Option<NaiveDate>) -> Result<Url, NetliqError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| NetliqError::InvalidArg(format!("bad chart base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| NetliqError::InvalidArg("chart base url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("interval", "1d");
            match start {
                Some(s) => {
                    let period1 = s.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
                    let period2 = Utc::now().timestamp();
                    q.append_pair("period1", &period1.to_string())
                        .append_pair("period2", &period2.to_string());
                }
                None => {
                    q.append_pair("range", DEFAULT_RANGE);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SeriesSource for YahooSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo"
    }

    fn catalog(&self) -> &[SeriesSpec] {
        &CATALOG
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "netliq_yahoo::fetch",
            skip_all,
            fields(symbol = series_id, start = ?start),
        )
    )]
    async fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
    ) -> Result<Series, NetliqError> {
        let url = self.chart_url(series_id, start)?;
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| NetliqError::remote(Self::NAME, e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| NetliqError::remote(Self::NAME, e.to_string()))?;

        // Error envelopes arrive with non-success statuses; prefer their detail.
        match wire::decode_chart(&body) {
            Ok(Decoded::ProviderError(detail)) => Err(NetliqError::remote(
                Self::NAME,
                format!("{series_id}: {detail}"),
            )),
            _ if !status.is_success() => Err(NetliqError::remote(
                Self::NAME,
                format!("{series_id}: {status}"),
            )),
            Ok(Decoded::Closes(series)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(points = series.len(), "parsed chart closes");
                Ok(series)
            }
            Err(e) => Err(e),
        }
    }
}
