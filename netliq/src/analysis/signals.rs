use netliq_core::{
    Field, LiquidityTrend, Row, SignalRecord, Table, TrafficLight, Verdict, VolatilityRegime,
};

/// Equity volatility below this level reads as complacent.
pub const VIX_COMPLACENT: f64 = 20.0;
/// Equity volatility above this level is a high-volatility regime.
pub const VIX_HIGH: f64 = 30.0;
/// Bond volatility above this level signals bond-market stress.
pub const MOVE_STRESS: f64 = 120.0;

/// Classify the latest row of `table`.
///
/// An empty table yields the grey "No Data" record without evaluating any
/// rule. Never fails.
#[must_use]
pub fn classify(table: &Table) -> SignalRecord {
    match table.latest() {
        Some(row) => classify_row(&row),
        None => SignalRecord::no_data(),
    }
}

/// Classify one row.
#[must_use]
pub fn classify_row(row: &Row) -> SignalRecord {
    let trend = liquidity_trend(row);
    let regime = volatility_regime(row);
    let overall = overall(trend.label, regime.label);
    SignalRecord {
        liquidity_trend: Some(trend),
        volatility_regime: Some(regime),
        overall,
    }
}

fn liquidity_trend(row: &Row) -> Verdict<LiquidityTrend> {
    if !(row.contains(Field::NetLiquidity) && row.contains(Field::NetLiquidityMa20)) {
        return Verdict::new(LiquidityTrend::Unknown, "Net Liquidity Unavailable");
    }
    let Some(ma) = row.get(Field::NetLiquidityMa20) else {
        return Verdict::new(LiquidityTrend::Neutral, "Moving Average Not Yet Defined");
    };
    match row.get(Field::NetLiquidity) {
        Some(net) if net > ma => Verdict::new(LiquidityTrend::Expanding, "Net Liquidity Above MA20"),
        _ => Verdict::new(
            LiquidityTrend::Contracting,
            "Net Liquidity At Or Below MA20",
        ),
    }
}

fn volatility_regime(row: &Row) -> Verdict<VolatilityRegime> {
    let vix = row.get(Field::Vix).unwrap_or(0.0);
    let mv = row.get(Field::Move).unwrap_or(0.0);
    if vix < VIX_COMPLACENT && mv > MOVE_STRESS {
        Verdict::new(
            VolatilityRegime::Danger,
            "Bond Volatility High, Equity Complacent",
        )
    } else if vix > VIX_HIGH {
        Verdict::new(VolatilityRegime::HighVol, "High Equity Volatility")
    } else {
        Verdict::new(VolatilityRegime::Normal, "Normal Volatility")
    }
}

fn overall(trend: LiquidityTrend, regime: VolatilityRegime) -> Verdict<TrafficLight> {
    match (trend, regime) {
        (LiquidityTrend::Expanding, VolatilityRegime::Normal) => {
            Verdict::new(TrafficLight::Green, "Liquidity Supporting Markets")
        }
        (_, VolatilityRegime::Danger) => Verdict::new(
            TrafficLight::Red,
            "Liquidity Drag or Volatility Stress (Bond Stress)",
        ),
        (LiquidityTrend::Contracting, _) | (_, VolatilityRegime::HighVol) => {
            Verdict::new(TrafficLight::Red, "Liquidity Drag or Volatility Stress")
        }
        _ => Verdict::new(TrafficLight::Yellow, "Mixed Signals"),
    }
}
