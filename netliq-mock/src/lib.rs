use async_trait::async_trait;
use chrono::NaiveDate;
use netliq_core::{Field, NetliqError, Series, SeriesSource, SeriesSpec};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::fixture_end;

static MACRO_CATALOG: [SeriesSpec; 3] = [
    SeriesSpec::new(Field::Walcl, "WALCL"),
    SeriesSpec::new(Field::Rrp, "RRPONTSYD"),
    SeriesSpec::new(Field::Tga, "WTREGEN"),
];

static MARKET_CATALOG: [SeriesSpec; 9] = [
    SeriesSpec::new(Field::Spy, "SPY"),
    SeriesSpec::new(Field::Vix, "^VIX"),
    SeriesSpec::new(Field::Move, "^MOVE"),
    SeriesSpec::new(Field::Hyg, "HYG"),
    SeriesSpec::new(Field::Dxy, "DX-Y.NYB"),
    SeriesSpec::new(Field::Gold, "GC=F"),
    SeriesSpec::new(Field::Oil, "CL=F"),
    SeriesSpec::new(Field::Btc, "BTC-USD"),
    SeriesSpec::new(Field::Us10y, "^TNX"),
];

/// Mock source for CI-safe tests and demos. Serves deterministic fixture
/// series ending on [`fixture_end`].
///
/// The macro flavor mimics the central-bank source (weekly balance sheet and
/// treasury cash, business-day reverse repo); the market flavor mimics the
/// market source (business-day closes, daily bitcoin). The series id `"FAIL"`
/// always errors.
pub struct MockSource {
    name: &'static str,
    catalog: &'static [SeriesSpec],
}

impl MockSource {
    /// Mock of the macro-data source.
    #[must_use]
    pub fn macro_data() -> Self {
        Self {
            name: "netliq-mock-macro",
            catalog: &MACRO_CATALOG,
        }
    }

    /// Mock of the market-data source.
    #[must_use]
    pub fn market_data() -> Self {
        Self {
            name: "netliq-mock-market",
            catalog: &MARKET_CATALOG,
        }
    }

    fn maybe_fail(&self, series_id: &str) -> Result<(), NetliqError> {
        match series_id {
            "FAIL" => Err(NetliqError::remote(self.name, "forced failure")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SeriesSource for MockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn catalog(&self) -> &[SeriesSpec] {
        self.catalog
    }

    async fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
    ) -> Result<Series, NetliqError> {
        self.maybe_fail(series_id)?;
        let mut series = fixtures::by_series_id(series_id)
            .ok_or_else(|| NetliqError::Data(format!("unknown series id: {series_id}")))?;
        Ok(match start {
            Some(s) => series.split_off(&s),
            None => series,
        })
    }
}
