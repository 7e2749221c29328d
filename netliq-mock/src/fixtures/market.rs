use netliq_core::Series;

use super::{business_days, every_day};

pub fn by_series_id(id: &str) -> Option<Series> {
    match id {
        "SPY" => Some(business_days(|t| 390.0 + 0.32 * t + 8.0 * (t / 9.0).sin())),
        "^VIX" => Some(business_days(|t| 15.0 + 3.5 * (t / 11.0).sin())),
        "^MOVE" => Some(business_days(|t| 112.0 + 14.0 * (t / 17.0).sin())),
        "HYG" => Some(business_days(|t| 74.0 + 0.006 * t + 0.8 * (t / 13.0).sin())),
        "DX-Y.NYB" => Some(business_days(|t| 104.0 + 2.2 * (t / 23.0).sin())),
        "GC=F" => Some(business_days(|t| 1_920.0 + 0.9 * t)),
        "CL=F" => Some(business_days(|t| 78.0 + 6.0 * (t / 19.0).sin())),
        "BTC-USD" => Some(every_day(|t| 27_000.0 + 85.0 * t + 1_500.0 * (t / 7.0).sin())),
        "^TNX" => Some(business_days(|t| 4.3 + 0.35 * (t / 29.0).sin())),
        _ => None,
    }
}
