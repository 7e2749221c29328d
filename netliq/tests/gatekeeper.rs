mod helpers;

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use helpers::{MockBehavior, d, dynamic_sources, flat_macro, serve_daily};
use netliq::{
    Clock, Field, FixedClock, Netliq, NetliqError, Origin, RefreshMode, Series, SeriesSource,
    SystemClock, TableCache, TrafficLight,
};

fn orchestrator(
    dir: &std::path::Path,
    macro_src: Arc<dyn SeriesSource>,
    market_src: Arc<dyn SeriesSource>,
) -> netliq::NetliqBuilder {
    Netliq::builder()
        .with_macro_source(macro_src)
        .with_market_source(market_src)
        .cache_dir(dir)
        .lookback_days(60)
        .clock(Arc::new(FixedClock(d(2024, 6, 28))))
}

#[tokio::test]
async fn refresh_truncates_to_lookback_and_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, kc) = dynamic_sources();
    let today = d(2024, 6, 28);
    serve_daily(&mc, &kc, today, 120).await;
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");

    let snap = netliq.obtain().await.expect("obtain");
    assert_eq!(snap.origin, Origin::Remote);
    assert!(snap.warnings.is_empty());
    assert_eq!(snap.table.first_date(), Some(today - TimeDelta::days(60)));
    assert_eq!(snap.table.last_date(), Some(today));
    assert_eq!(snap.table.len(), 61);

    let persisted = netliq.cache().load().expect("readable").expect("present");
    assert_eq!(persisted, snap.table);
}

#[tokio::test]
async fn sources_are_asked_for_lookback_plus_margin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, kc) = dynamic_sources();
    let today = d(2024, 6, 28);
    serve_daily(&mc, &kc, today, 120).await;
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");
    netliq.obtain().await.expect("obtain");

    let start = Some(today - TimeDelta::days(90));
    let macro_ids: Vec<_> = mc.requests().await;
    assert_eq!(
        macro_ids,
        vec![
            ("WALCL".to_string(), start),
            ("RRPONTSYD".to_string(), start),
            ("WTREGEN".to_string(), start),
        ]
    );
    assert_eq!(kc.requests().await.len(), 3);
}

#[tokio::test]
async fn failed_refresh_falls_back_to_stale_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, kc) = dynamic_sources();
    serve_daily(&mc, &kc, d(2024, 6, 28), 120).await;
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");
    let first = netliq.obtain().await.expect("first refresh");

    mc.clear_all_behaviors().await;
    let err = NetliqError::remote("dyn-macro", "provider down");
    mc.set_fallback_behavior(MockBehavior::Fail(err.clone())).await;

    let snap = netliq
        .obtain_with(60, RefreshMode::ForceRemote)
        .await
        .expect("stale cache stands in");
    assert_eq!(snap.origin, Origin::StaleCache);
    assert_eq!(snap.warnings, vec![err]);
    assert_eq!(snap.table, first.table);
}

#[tokio::test]
async fn failed_refresh_without_cache_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, _kc) = dynamic_sources();
    let err = NetliqError::remote("dyn-macro", "provider down");
    mc.set_fallback_behavior(MockBehavior::Fail(err.clone())).await;
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");

    let got = netliq.obtain().await.expect_err("no fallback");
    assert_eq!(got, err);
    assert!(netliq.cache().load().expect("readable").is_none());
}

#[tokio::test]
async fn untagged_source_errors_are_attributed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, _mc, k, _kc) = dynamic_sources();
    // No behavior configured: the dynamic mock fails with a data error.
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");

    match netliq.obtain().await {
        Err(NetliqError::RemoteFetch { provider, .. }) => assert_eq!(provider, "dyn-macro"),
        other => panic!("expected RemoteFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn table_written_today_is_reused_without_fetching() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cached = flat_macro(d(2024, 1, 1), 5, 8_000_000.0, 2_000.0, 500.0);
    TableCache::new(dir.path()).store(&cached).expect("store");

    let (m, mc, k, kc) = dynamic_sources();
    let netliq = orchestrator(dir.path(), m, k)
        .clock(Arc::new(SystemClock))
        .build()
        .expect("build");

    let snap = netliq.obtain().await.expect("cache hit");
    assert_eq!(snap.origin, Origin::Cache);
    assert_eq!(snap.table, cached);
    assert!(mc.requests().await.is_empty());
    assert!(kc.requests().await.is_empty());
}

#[tokio::test]
async fn force_remote_ignores_fresh_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cached = flat_macro(d(2024, 1, 1), 5, 8_000_000.0, 2_000.0, 500.0);
    TableCache::new(dir.path()).store(&cached).expect("store");

    let (m, mc, k, kc) = dynamic_sources();
    let today = SystemClock.today();
    serve_daily(&mc, &kc, today, 120).await;
    let netliq = orchestrator(dir.path(), m, k)
        .clock(Arc::new(SystemClock))
        .refresh(RefreshMode::ForceRemote)
        .build()
        .expect("build");

    let snap = netliq.obtain().await.expect("refresh");
    assert_eq!(snap.origin, Origin::Remote);
    assert!(snap.table.contains(Field::Spy));
    assert_eq!(mc.requests().await.len(), 3);
}

#[tokio::test]
async fn offline_uses_any_cache_and_never_fetches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, _kc) = dynamic_sources();
    let netliq = orchestrator(dir.path(), m, k)
        .refresh(RefreshMode::Offline)
        .build()
        .expect("build");

    assert!(matches!(netliq.obtain().await, Err(NetliqError::Cache(_))));

    let cached = flat_macro(d(2023, 1, 1), 3, 8_000_000.0, 2_000.0, 500.0);
    netliq.cache().store(&cached).expect("store");
    let snap = netliq.obtain().await.expect("offline hit");
    assert_eq!(snap.origin, Origin::Cache);
    assert_eq!(snap.table, cached);
    assert!(mc.requests().await.is_empty());
}

#[tokio::test]
async fn hung_source_times_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, _kc) = dynamic_sources();
    mc.set_fallback_behavior(MockBehavior::Hang).await;
    let netliq = orchestrator(dir.path(), m, k)
        .request_timeout(Duration::from_millis(50))
        .build()
        .expect("build");

    let err = netliq.obtain().await.expect_err("deadline");
    assert_eq!(err, NetliqError::request_timeout("refresh"));
}

#[tokio::test]
async fn zero_lookback_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, _mc, k, _kc) = dynamic_sources();
    let netliq = orchestrator(dir.path(), m.clone(), k.clone())
        .build()
        .expect("build");
    assert!(matches!(
        netliq.obtain_with(0, RefreshMode::ForceRemote).await,
        Err(NetliqError::InvalidArg(_))
    ));
    assert!(matches!(
        orchestrator(dir.path(), m, k).lookback_days(0).build(),
        Err(NetliqError::InvalidArg(_))
    ));
}

#[test]
fn builder_requires_both_sources() {
    let (m, _mc, _k, _kc) = dynamic_sources();
    let err = Netliq::builder().with_macro_source(m).build();
    assert!(matches!(err, Err(NetliqError::InvalidArg(_))));
}

#[tokio::test]
async fn table_written_on_another_day_is_refreshed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cached = flat_macro(d(2024, 1, 1), 5, 8_000_000.0, 2_000.0, 500.0);
    TableCache::new(dir.path()).store(&cached).expect("store");

    let (m, mc, k, kc) = dynamic_sources();
    serve_daily(&mc, &kc, d(2024, 6, 28), 120).await;
    // The artifact was written today; the clock says 2024-06-28.
    let netliq = orchestrator(dir.path(), m, k)
        .refresh(RefreshMode::ReuseFresh)
        .build()
        .expect("build");

    let snap = netliq.obtain().await.expect("refresh");
    assert_eq!(snap.origin, Origin::Remote);
    assert_ne!(snap.table, cached);
    assert_eq!(mc.requests().await.len(), 3);
    assert_eq!(kc.requests().await.len(), 3);
    assert_eq!(netliq.cache().load().expect("readable"), Some(snap.table));
}

#[tokio::test]
async fn outdated_table_stands_in_when_refresh_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cached = flat_macro(d(2024, 1, 1), 5, 8_000_000.0, 2_000.0, 500.0);
    TableCache::new(dir.path()).store(&cached).expect("store");

    let (m, mc, k, _kc) = dynamic_sources();
    let err = NetliqError::remote("dyn-macro", "provider down");
    mc.set_fallback_behavior(MockBehavior::Fail(err.clone())).await;
    let netliq = orchestrator(dir.path(), m, k)
        .refresh(RefreshMode::ReuseFresh)
        .build()
        .expect("build");

    let snap = netliq.obtain().await.expect("stale cache stands in");
    assert_eq!(snap.origin, Origin::StaleCache);
    assert_eq!(snap.table, cached);
    assert_eq!(snap.warnings, vec![err]);
    assert!(!mc.requests().await.is_empty());
}

#[tokio::test]
async fn empty_macro_series_yields_no_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, kc) = dynamic_sources();
    serve_daily(&mc, &kc, d(2024, 6, 28), 120).await;
    mc.set_behavior("RRPONTSYD", MockBehavior::Return(Series::new()))
        .await;
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");

    let a = netliq.assess().await.expect("no-data assessment");
    assert!(!a.has_data());
    assert!(a.table.contains(Field::Rrp));
    assert_eq!(a.signals.overall.label, TrafficLight::Gray);
    assert_eq!(
        a.warnings,
        vec![NetliqError::Data("dyn-macro: no observations for RRP".into())]
    );
}

#[tokio::test]
async fn empty_bond_volatility_is_not_read_as_calm() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (m, mc, k, kc) = dynamic_sources();
    serve_daily(&mc, &kc, d(2024, 6, 28), 120).await;
    kc.set_behavior("^MOVE", MockBehavior::Return(Series::new()))
        .await;
    let netliq = orchestrator(dir.path(), m, k).build().expect("build");

    let a = netliq.assess().await.expect("no-data assessment");
    assert!(!a.has_data());
    assert!(a.signals.volatility_regime.is_none());
    assert_eq!(a.signals.overall.label, TrafficLight::Gray);
    assert_eq!(
        a.warnings,
        vec![NetliqError::Data("dyn-market: no observations for MOVE".into())]
    );
}
