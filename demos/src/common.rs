use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use netliq::{
    ChatAnalyst, FixedClock, Language, Netliq, NetliqBuilder, NetliqError, ReportContext,
    ReportWriter,
};
use netliq_mock::{MockSource, fixture_end};

/// Whether demos should run against fixture sources instead of the network.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var("NETLIQ_DEMOS_USE_MOCK").is_ok()
}

/// Scratch directory for the demos' cache and report archive.
#[must_use]
pub fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join("netliq-demos").join(name)
}

/// Return a builder wired to the live sources, or to the fixtures in CI.
///
/// The fixture run pins the clock to the last fixture date so the lookback
/// window overlaps the fixture history.
#[must_use]
pub fn builder() -> NetliqBuilder {
    if use_mock() {
        println!("--- (Using Mock Sources for CI) ---");
        Netliq::builder()
            .with_macro_source(Arc::new(MockSource::macro_data()))
            .with_market_source(Arc::new(MockSource::market_data()))
            .clock(Arc::new(FixedClock(fixture_end())))
    } else {
        Netliq::builder()
            .with_macro_source(Arc::new(netliq_fred::FredSource::new_default()))
            .with_market_source(Arc::new(netliq_yahoo::YahooSource::new_default()))
    }
}

/// Writes a short templated report; used when no language model is reachable.
pub struct TemplateWriter;

#[async_trait]
impl ReportWriter for TemplateWriter {
    async fn write_report(
        &self,
        ctx: &ReportContext,
        language: Language,
    ) -> Result<String, NetliqError> {
        let overall = &ctx.signals.overall;
        Ok(format!(
            "# Market Status: {}\n\n## Executive Summary\n{} ({})\n",
            overall.label,
            overall.reason,
            language.display_name()
        ))
    }
}

/// Return the report writer for demos.
#[must_use]
pub fn writer() -> Box<dyn ReportWriter> {
    if use_mock() {
        Box::new(TemplateWriter)
    } else {
        Box::new(ChatAnalyst::new_default())
    }
}
