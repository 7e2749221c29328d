use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NetliqError;

/// Semantic column names tracked by the pipeline.
///
/// The three macro components come from the macro-data source, the market
/// series from the market-data source, and the two net liquidity columns are
/// derived by the liquidity calculator. Ordering follows declaration order,
/// which is also the column order of persisted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Central-bank balance sheet (total assets).
    #[serde(rename = "WALCL")]
    Walcl,
    /// Overnight reverse-repo balances.
    #[serde(rename = "RRP")]
    Rrp,
    /// Treasury general account cash balance.
    #[serde(rename = "TGA")]
    Tga,
    /// Equity index level (S&P 500 ETF).
    #[serde(rename = "SPY")]
    Spy,
    /// Equity volatility index.
    #[serde(rename = "VIX")]
    Vix,
    /// Bond volatility index.
    #[serde(rename = "MOVE")]
    Move,
    /// High-yield credit proxy.
    #[serde(rename = "HYG")]
    Hyg,
    /// Dollar currency index.
    #[serde(rename = "DXY")]
    Dxy,
    /// Gold front-month future.
    #[serde(rename = "GOLD")]
    Gold,
    /// Crude oil front-month future.
    #[serde(rename = "OIL")]
    Oil,
    /// Bitcoin spot price.
    #[serde(rename = "BTC")]
    Btc,
    /// Ten-year treasury yield.
    #[serde(rename = "US10Y")]
    Us10y,
    /// Derived: normalized balance sheet minus reverse repo minus treasury cash.
    #[serde(rename = "Net Liquidity")]
    NetLiquidity,
    /// Derived: trailing 20-observation mean of `NetLiquidity`.
    #[serde(rename = "Net Liquidity MA20")]
    NetLiquidityMa20,
}

/// Native unit a field is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Millions of US dollars.
    MillionsUsd,
    /// Billions of US dollars.
    BillionsUsd,
    /// Price in US dollars.
    Usd,
    /// Index points.
    Points,
    /// Percent.
    Percent,
}

impl Unit {
    /// Divisor that converts a value in this unit into billions of dollars.
    ///
    /// Returns `None` for units that are not dollar amounts.
    #[must_use]
    pub const fn per_billion(self) -> Option<f64> {
        match self {
            Self::MillionsUsd => Some(1000.0),
            Self::BillionsUsd => Some(1.0),
            Self::Usd | Self::Points | Self::Percent => None,
        }
    }
}

impl Field {
    /// Macro components supplied by the macro-data source.
    pub const MACRO: [Self; 3] = [Self::Walcl, Self::Rrp, Self::Tga];

    /// Market series supplied by the market-data source.
    pub const MARKET: [Self; 9] = [
        Self::Spy,
        Self::Vix,
        Self::Move,
        Self::Hyg,
        Self::Dxy,
        Self::Gold,
        Self::Oil,
        Self::Btc,
        Self::Us10y,
    ];

    /// Every field in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Walcl,
        Self::Rrp,
        Self::Tga,
        Self::Spy,
        Self::Vix,
        Self::Move,
        Self::Hyg,
        Self::Dxy,
        Self::Gold,
        Self::Oil,
        Self::Btc,
        Self::Us10y,
        Self::NetLiquidity,
        Self::NetLiquidityMa20,
    ];

    /// Column name used in tables, caches, and report contexts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walcl => "WALCL",
            Self::Rrp => "RRP",
            Self::Tga => "TGA",
            Self::Spy => "SPY",
            Self::Vix => "VIX",
            Self::Move => "MOVE",
            Self::Hyg => "HYG",
            Self::Dxy => "DXY",
            Self::Gold => "GOLD",
            Self::Oil => "OIL",
            Self::Btc => "BTC",
            Self::Us10y => "US10Y",
            Self::NetLiquidity => "Net Liquidity",
            Self::NetLiquidityMa20 => "Net Liquidity MA20",
        }
    }

    /// Declared native unit of the field.
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::Walcl => Unit::MillionsUsd,
            Self::Rrp | Self::Tga | Self::NetLiquidity | Self::NetLiquidityMa20 => {
                Unit::BillionsUsd
            }
            Self::Spy | Self::Hyg | Self::Gold | Self::Oil | Self::Btc => Unit::Usd,
            Self::Vix | Self::Move | Self::Dxy => Unit::Points,
            Self::Us10y => Unit::Percent,
        }
    }

    /// Whether the field is computed by the pipeline rather than fetched.
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::NetLiquidity | Self::NetLiquidityMa20)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = NetliqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| NetliqError::Data(format!("unknown column: {s}")))
    }
}
