//! Re-export of foundational types from `netliq-types`.
// Consolidated re-exports so downstream crates can depend on `netliq-core` only

pub use netliq_types::{Field, NetliqError, Unit};

pub use netliq_types::{DEFAULT_LOOKBACK_DAYS, Language, NetliqConfig, REFRESH_MARGIN_DAYS, RefreshMode};

pub use netliq_types::{
    Change, ChangeRecord, LiquidityTrend, Row, SignalRecord, TrafficLight, Verdict,
    VolatilityRegime,
};

pub use netliq_types::{ReportContext, ReportKey, StoredReport};
