use netliq_demos::common::{builder, scratch_dir};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,netliq=debug,netliq_core=debug,netliq_fred=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let netliq = builder()
        .cache_dir(scratch_dir("tracing"))
        .lookback_days(90)
        .build()?;

    // Force a refresh, then run the whole pipeline.
    let _ = netliq.obtain_with(90, netliq::RefreshMode::ForceRemote).await?;
    let _ = netliq.assess().await?;

    Ok(())
}
