//! Records produced by the analysis stages.

use core::fmt;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A single dated row of a table.
///
/// `values` holds one entry per column present in the table; `None` marks an
/// undefined cell (e.g. the moving average before 20 observations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Calendar date of the row.
    pub date: NaiveDate,
    /// Cell values keyed by column.
    pub values: BTreeMap<Field, Option<f64>>,
}

impl Row {
    /// Defined value of `field`, or `None` when the column is absent or undefined.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied().flatten()
    }

    /// Whether the column is present in the row (defined or not).
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }
}

/// Absolute and percentage change over one lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Change {
    /// `current - previous`.
    pub delta: f64,
    /// `delta / previous * 100`, or `0` when `previous` is zero.
    pub pct: f64,
}

impl Change {
    /// The defined zero-change value used when a window cannot be evaluated.
    pub const ZERO: Self = Self {
        delta: 0.0,
        pct: 0.0,
    };
}

/// Latest value of a tracked field and its changes over the fixed windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Value in the latest row.
    pub current: Option<f64>,
    /// Change over 7 rows.
    #[serde(rename = "1w")]
    pub one_week: Change,
    /// Change over 14 rows.
    #[serde(rename = "2w")]
    pub two_weeks: Change,
    /// Change over 30 rows.
    #[serde(rename = "1m")]
    pub one_month: Change,
}

/// Direction of net liquidity relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidityTrend {
    /// Net liquidity above its moving average.
    Expanding,
    /// Net liquidity at or below its moving average.
    Contracting,
    /// Moving average not yet defined.
    Neutral,
    /// Net liquidity columns unavailable.
    Unknown,
}

/// Volatility regime derived from equity and bond volatility indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRegime {
    /// No volatility stress.
    Normal,
    /// Equity volatility elevated.
    HighVol,
    /// Bond volatility elevated while equity volatility is complacent.
    Danger,
}

/// Overall traffic-light verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficLight {
    /// Supportive regime.
    Green,
    /// Mixed signals.
    Yellow,
    /// Liquidity drag or volatility stress.
    Red,
    /// No data.
    Gray,
}

impl LiquidityTrend {
    /// Upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expanding => "EXPANDING",
            Self::Contracting => "CONTRACTING",
            Self::Neutral => "NEUTRAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl VolatilityRegime {
    /// Upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::HighVol => "HIGH_VOL",
            Self::Danger => "DANGER",
        }
    }
}

impl TrafficLight {
    /// Upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
            Self::Gray => "GRAY",
        }
    }
}

impl fmt::Display for LiquidityTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label together with the rationale that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict<T> {
    /// Classification label.
    pub label: T,
    /// Human-readable rationale.
    pub reason: String,
}

impl<T> Verdict<T> {
    /// Build a verdict from a label and rationale.
    pub fn new(label: T, reason: impl Into<String>) -> Self {
        Self {
            label,
            reason: reason.into(),
        }
    }
}

/// Named judgments over the latest row plus the aggregated verdict.
///
/// The per-dimension judgments are `None` only for the no-data record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Net liquidity trend.
    pub liquidity_trend: Option<Verdict<LiquidityTrend>>,
    /// Volatility regime.
    pub volatility_regime: Option<Verdict<VolatilityRegime>>,
    /// Overall traffic light.
    pub overall: Verdict<TrafficLight>,
}

impl SignalRecord {
    /// The record returned for an empty table.
    #[must_use]
    pub fn no_data() -> Self {
        Self {
            liquidity_trend: None,
            volatility_regime: None,
            overall: Verdict::new(TrafficLight::Gray, "No Data"),
        }
    }
}
