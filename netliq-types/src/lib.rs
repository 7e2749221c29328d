//! Netliq-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod analysis;
mod config;
mod error;
mod field;
mod reports;

pub use analysis::{
    Change, ChangeRecord, LiquidityTrend, Row, SignalRecord, TrafficLight, Verdict,
    VolatilityRegime,
};
pub use config::{
    DEFAULT_LOOKBACK_DAYS, Language, NetliqConfig, REFRESH_MARGIN_DAYS, RefreshMode,
};
pub use error::NetliqError;
pub use field::{Field, Unit};
pub use reports::{ReportContext, ReportKey, StoredReport};
