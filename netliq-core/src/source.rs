use async_trait::async_trait;
use chrono::NaiveDate;

use crate::timeseries::Series;
use crate::timeseries::resample::resample_to_daily;
use crate::timeseries::table::Table;
use crate::{Field, NetliqError};

/// One series a source knows how to fetch and the column it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesSpec {
    /// Destination column.
    pub field: Field,
    /// Provider-side identifier (e.g. "WALCL", "^VIX").
    pub series_id: &'static str,
}

impl SeriesSpec {
    /// Pair a column with its provider-side identifier.
    #[must_use]
    pub const fn new(field: Field, series_id: &'static str) -> Self {
        Self { field, series_id }
    }
}

/// A remote (or fixture) provider of dated observations.
///
/// Implementations fetch one series per call and report it in the series'
/// native cadence and unit. Resampling and alignment happen downstream.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g. "netliq-fred").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Series this source serves, in the order they should be fetched.
    fn catalog(&self) -> &[SeriesSpec];

    /// Fetch observations for `series_id` on or after `start`.
    ///
    /// `start = None` asks for the provider's default window.
    ///
    /// # Errors
    /// Returns `Configuration` when credentials are missing and `RemoteFetch`
    /// for transport or provider failures.
    async fn fetch(&self, series_id: &str, start: Option<NaiveDate>)
    -> Result<Series, NetliqError>;
}

/// Attribute an error to the source that raised it.
///
/// Errors that already name a provider pass through; anything else is wrapped
/// into `RemoteFetch` tagged with `source`.
#[must_use]
pub fn tag_err(source: &str, e: NetliqError) -> NetliqError {
    match e {
        e @ (NetliqError::Configuration { .. }
        | NetliqError::RemoteFetch { .. }
        | NetliqError::RequestTimeout { .. }) => e,
        other => NetliqError::RemoteFetch {
            provider: source.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Fetch every series in a source's catalog and resample them onto one daily
/// calendar with forward fill.
///
/// A series that comes back empty still gets a column, undefined on every
/// day, so downstream alignment sees that the source reported nothing. Any
/// failed fetch aborts the collection.
///
/// # Errors
/// Returns the first fetch error, tagged with the source name.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "netliq_core::source::collect",
        skip_all,
        fields(source = source.name(), vendor = source.vendor(), start = ?start),
    )
)]
pub async fn collect(
    source: &dyn SeriesSource,
    start: Option<NaiveDate>,
) -> Result<Table, NetliqError> {
    let mut fetched = std::collections::BTreeMap::new();
    for spec in source.catalog() {
        let series = source
            .fetch(spec.series_id, start)
            .await
            .map_err(|e| tag_err(source.name(), e))?;
        #[cfg(feature = "tracing")]
        if series.is_empty() {
            tracing::warn!(
                source = source.name(),
                series_id = spec.series_id,
                "series returned no observations; column left undefined"
            );
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            series_id = spec.series_id,
            points = series.len(),
            step_days = ?crate::timeseries::infer::estimate_step_days(&series),
            "fetched series"
        );
        fetched.insert(spec.field, series);
    }
    Ok(resample_to_daily(fetched))
}
