//! Chart endpoint payloads.

use chrono::DateTime;
use netliq_core::{NetliqError, Series};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Meta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Outcome of decoding a chart body.
pub(crate) enum Decoded {
    /// Daily closes keyed by exchange-local date.
    Closes(Series),
    /// The provider reported an error in the envelope.
    ProviderError(String),
}

/// Decode a chart body into daily closes.
///
/// Bars are dated in the exchange's local calendar (`gmtoffset`). Null closes
/// are skipped. When two bars land on the same date the later one wins.
pub(crate) fn decode_chart(body: &str) -> Result<Decoded, NetliqError> {
    let env: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| NetliqError::Data(format!("malformed chart payload: {e}")))?;
    if let Some(err) = env.chart.error {
        let detail = err
            .description
            .map_or_else(|| err.code.clone(), |d| format!("{}: {d}", err.code));
        return Ok(Decoded::ProviderError(detail));
    }
    let Some(result) = env.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Decoded::Closes(Series::new()));
    };

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();
    let mut series = Series::new();
    for (ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close.filter(|c| c.is_finite()) else {
            continue;
        };
        let local = ts
            .checked_add(result.meta.gmtoffset)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| NetliqError::Data(format!("timestamp out of range: {ts}")))?;
        series.insert(local.date_naive(), close);
    }
    Ok(Decoded::Closes(series))
}
