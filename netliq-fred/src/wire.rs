//! FRED observation payloads.

use chrono::NaiveDate;
use netliq_core::{NetliqError, Series};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_message: String,
}

/// Parse a `series/observations` body into a series.
///
/// FRED reports missing observations as `"."`; those (and any other
/// non-numeric value) are skipped rather than treated as errors.
pub(crate) fn parse_observations(body: &str) -> Result<Series, NetliqError> {
    let parsed: ObservationsResponse = serde_json::from_str(body)
        .map_err(|e| NetliqError::Data(format!("malformed observations payload: {e}")))?;
    let mut series = Series::new();
    for obs in parsed.observations {
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| NetliqError::Data(format!("bad observation date {:?}: {e}", obs.date)))?;
        match obs.value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => {
                series.insert(date, v);
            }
            _ => {}
        }
    }
    Ok(series)
}

/// Extract the provider's error message from a non-success body, if present.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error_message)
}
