use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use netliq_core::{Language, NetliqConfig, NetliqError, RefreshMode, SeriesSource};

use crate::cache::TableCache;
use crate::clock::{Clock, SystemClock};

/// Orchestrator that refreshes, caches, and analyzes the merged table.
pub struct Netliq {
    pub(crate) macro_source: Arc<dyn SeriesSource>,
    pub(crate) market_source: Arc<dyn SeriesSource>,
    pub(crate) cache: TableCache,
    pub(crate) cfg: NetliqConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

/// Builder for constructing a `Netliq` orchestrator with custom configuration.
pub struct NetliqBuilder {
    macro_source: Option<Arc<dyn SeriesSource>>,
    market_source: Option<Arc<dyn SeriesSource>>,
    cfg: NetliqConfig,
    clock: Arc<dyn Clock>,
}

impl Default for NetliqBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetliqBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no sources; register both via [`with_macro_source`] and
    /// [`with_market_source`]. Defaults: 365-day lookback, reuse a cache
    /// written today, cache directory `data_cache`, no refresh deadline,
    /// English reports, system clock.
    ///
    /// [`with_macro_source`]: Self::with_macro_source
    /// [`with_market_source`]: Self::with_market_source
    #[must_use]
    pub fn new() -> Self {
        Self {
            macro_source: None,
            market_source: None,
            cfg: NetliqConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Register the source of the balance sheet, reverse repo, and treasury
    /// cash series.
    #[must_use]
    pub fn with_macro_source(mut self, s: Arc<dyn SeriesSource>) -> Self {
        self.macro_source = Some(s);
        self
    }

    /// Register the source of the market series.
    #[must_use]
    pub fn with_market_source(mut self, s: Arc<dyn SeriesSource>) -> Self {
        self.market_source = Some(s);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: NetliqConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Directory holding the persisted merged table.
    #[must_use]
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.cache_dir = dir.into();
        self
    }

    /// Calendar days of history kept, counted back from today.
    #[must_use]
    pub const fn lookback_days(mut self, days: u32) -> Self {
        self.cfg.lookback_days = days;
        self
    }

    /// Cache reuse policy.
    #[must_use]
    pub const fn refresh(mut self, mode: RefreshMode) -> Self {
        self.cfg.refresh = mode;
        self
    }

    /// Deadline for the whole remote refresh (both sources).
    ///
    /// When exceeded the refresh fails with `RequestTimeout`, which the cache
    /// gatekeeper treats like any other refresh failure.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Language for generated reports.
    #[must_use]
    pub const fn language(mut self, language: Language) -> Self {
        self.cfg.language = language;
        self
    }

    /// Source of "today" (freshness and lookback truncation).
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the `Netliq` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if either source is missing or the lookback is zero.
    pub fn build(self) -> Result<Netliq, NetliqError> {
        let macro_source = self.macro_source.ok_or_else(|| {
            NetliqError::InvalidArg(
                "no macro source registered; add one via with_macro_source(...)".into(),
            )
        })?;
        let market_source = self.market_source.ok_or_else(|| {
            NetliqError::InvalidArg(
                "no market source registered; add one via with_market_source(...)".into(),
            )
        })?;
        if self.cfg.lookback_days == 0 {
            return Err(NetliqError::InvalidArg(
                "lookback_days must be at least 1".into(),
            ));
        }
        Ok(Netliq {
            macro_source,
            market_source,
            cache: TableCache::new(self.cfg.cache_dir.clone()),
            cfg: self.cfg,
            clock: self.clock,
        })
    }
}

impl Netliq {
    /// Start building a new `Netliq` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use netliq::Netliq;
    /// use netliq_fred::FredSource;
    /// use netliq_yahoo::YahooSource;
    ///
    /// let netliq = Netliq::builder()
    ///     .with_macro_source(Arc::new(FredSource::new_default()))
    ///     .with_market_source(Arc::new(YahooSource::new_default()))
    ///     .lookback_days(180)
    ///     .build()?;
    /// let assessment = netliq.assess().await?;
    /// println!("{}", assessment.signals.overall.label);
    /// ```
    #[must_use]
    pub fn builder() -> NetliqBuilder {
        NetliqBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &NetliqConfig {
        &self.cfg
    }

    /// The persisted-table store.
    #[must_use]
    pub const fn cache(&self) -> &TableCache {
        &self.cache
    }

    /// Today's date according to the configured clock.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}
