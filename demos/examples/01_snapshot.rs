use netliq::Field;
use netliq_demos::common::{builder, scratch_dir};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the orchestrator (fixtures in CI when NETLIQ_DEMOS_USE_MOCK is set).
    let netliq = builder().cache_dir(scratch_dir("snapshot")).build()?;

    // 2. Obtain, derive, compare, classify.
    let a = netliq.assess().await?;
    for w in &a.warnings {
        println!("warning: {w}");
    }
    if !a.has_data() {
        println!("No data available.");
        return Ok(());
    }

    // 3. Print the verdicts.
    println!("Origin: {:?}, rows: {}", a.origin, a.table.len());
    if let Some(v) = &a.signals.liquidity_trend {
        println!("Liquidity: {} ({})", v.label, v.reason);
    }
    if let Some(v) = &a.signals.volatility_regime {
        println!("Volatility: {} ({})", v.label, v.reason);
    }
    println!("Overall: {} ({})", a.signals.overall.label, a.signals.overall.reason);

    // 4. Print the tracked changes.
    for (field, rec) in &a.changes {
        println!(
            "{:>18}: {:>12} | 1w {:+.2}% | 2w {:+.2}% | 1m {:+.2}%",
            field.as_str(),
            rec.current.map_or_else(|| "-".into(), |v| format!("{v:.2}")),
            rec.one_week.pct,
            rec.two_weeks.pct,
            rec.one_month.pct,
        );
    }
    if let Some(row) = a.latest() {
        println!("Latest {}: net liquidity {:?}", row.date, row.get(Field::NetLiquidity));
    }

    Ok(())
}
