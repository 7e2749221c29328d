//! Shared helpers for table invariants.

use chrono::NaiveDate;

use crate::NetliqError;

/// Ensure an index is strictly ascending (sorted, no duplicates).
///
/// # Errors
/// Returns `Err(NetliqError::Data)` naming the first offending date.
pub fn ensure_strictly_ascending(index: &[NaiveDate]) -> Result<(), NetliqError> {
    match index.windows(2).find(|w| w[0] >= w[1]) {
        Some(w) => Err(NetliqError::Data(format!(
            "index not strictly ascending at {}",
            w[1]
        ))),
        None => Ok(()),
    }
}

/// Treat NaN and infinities as undefined.
#[inline]
pub fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
