use netliq_core::Series;

use super::{business_days, wednesdays};

pub fn by_series_id(id: &str) -> Option<Series> {
    match id {
        // Millions of USD, slow balance sheet runoff
        "WALCL" => Some(wednesdays(|t| {
            7_700_000.0 - 1_050.0 * t + 15_000.0 * (t / 45.0).sin()
        })),
        // Billions of USD, draining toward a floor
        "RRPONTSYD" => Some(business_days(|t| (2_100.0 - 4.2 * t).max(350.0))),
        // Billions of USD, oscillating around tax dates
        "WTREGEN" => Some(wednesdays(|t| 740.0 + 60.0 * (t / 30.0).sin())),
        _ => None,
    }
}
