//! Fetch-or-reuse policy for the merged table.

use chrono::{NaiveDate, TimeDelta};
use netliq_core::{
    NetliqError, REFRESH_MARGIN_DAYS, RefreshMode, SeriesSource, Table, align, collect,
};

use crate::core::Netliq;

/// Where an obtained table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The persisted table, reused because it was written today (or offline).
    Cache,
    /// A fresh remote refresh.
    Remote,
    /// The persisted table, substituted after a failed refresh.
    StaleCache,
}

/// A merged table together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// The merged, aligned table.
    pub table: Table,
    /// Provenance of `table`.
    pub origin: Origin,
    /// Failures that were absorbed while obtaining the table.
    pub warnings: Vec<NetliqError>,
}

impl Snapshot {
    const fn new(table: Table, origin: Origin, warnings: Vec<NetliqError>) -> Self {
        Self {
            table,
            origin,
            warnings,
        }
    }
}

/// One warning per column of `table` that has no defined cell.
fn silent_columns(source: &dyn SeriesSource, table: &Table) -> Vec<NetliqError> {
    table
        .fields()
        .filter(|f| {
            table
                .column(*f)
                .is_some_and(|cells| cells.iter().all(Option::is_none))
        })
        .map(|f| NetliqError::Data(format!("{}: no observations for {f}", source.name())))
        .collect()
}

fn days_before(today: NaiveDate, days: i64) -> Result<NaiveDate, NetliqError> {
    today
        .checked_sub_signed(TimeDelta::days(days))
        .ok_or_else(|| NetliqError::InvalidArg(format!("{days} days before {today} is out of range")))
}

impl Netliq {
    /// Obtain the merged table using the configured lookback and refresh mode.
    ///
    /// # Errors
    /// See [`Netliq::obtain_with`].
    pub async fn obtain(&self) -> Result<Snapshot, NetliqError> {
        self.obtain_with(self.cfg.lookback_days, self.cfg.refresh)
            .await
    }

    /// Obtain the merged table for `lookback_days`.
    ///
    /// - `ReuseFresh`: return the persisted table when it was written today;
    ///   otherwise refresh.
    /// - `ForceRemote`: refresh regardless of freshness.
    /// - `Offline`: return the persisted table regardless of age.
    ///
    /// A refresh fetches both sources from `today - (lookback + margin)`,
    /// aligns them, keeps rows from `today - lookback` on, and persists the
    /// result (overwriting the previous table). When the refresh fails and a
    /// persisted table exists, that table is returned with the failure as a
    /// warning. A failed persist is also reported as a warning, as is every
    /// series that came back without observations (such a column empties the
    /// aligned table).
    ///
    /// # Errors
    /// Returns `InvalidArg` for a zero lookback, the refresh error when no
    /// persisted table can stand in for it, and `Cache` when offline without a
    /// persisted table.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "netliq::gatekeeper::obtain",
            skip(self),
            fields(today = %self.clock.today()),
        )
    )]
    pub async fn obtain_with(
        &self,
        lookback_days: u32,
        mode: RefreshMode,
    ) -> Result<Snapshot, NetliqError> {
        if lookback_days == 0 {
            return Err(NetliqError::InvalidArg(
                "lookback_days must be at least 1".into(),
            ));
        }
        let today = self.clock.today();
        let mut warnings = Vec::new();

        if mode == RefreshMode::Offline {
            return match self.cache.load()? {
                Some(table) => Ok(Snapshot::new(table, Origin::Cache, warnings)),
                None => Err(NetliqError::Cache(format!(
                    "offline and no persisted table in {}",
                    self.cache.dir().display()
                ))),
            };
        }

        if mode == RefreshMode::ReuseFresh && self.cache.is_fresh(today) {
            match self.cache.load() {
                Ok(Some(table)) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(rows = table.len(), "reusing table persisted today");
                    return Ok(Snapshot::new(table, Origin::Cache, warnings));
                }
                Ok(None) => {}
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, "persisted table unreadable; refreshing");
                    warnings.push(e);
                }
            }
        }

        match self.refresh(today, lookback_days).await {
            Ok((table, silent)) => {
                #[cfg(feature = "tracing")]
                for w in &silent {
                    tracing::warn!(warning = %w, "refresh returned an empty series");
                }
                warnings.extend(silent);
                if let Err(e) = self.cache.store(&table) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, "failed to persist refreshed table");
                    warnings.push(e);
                }
                Ok(Snapshot::new(table, Origin::Remote, warnings))
            }
            Err(e) => match self.cache.load() {
                Ok(Some(stale)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, "refresh failed; using persisted table");
                    warnings.push(e);
                    Ok(Snapshot::new(stale, Origin::StaleCache, warnings))
                }
                _ => Err(e),
            },
        }
    }

    /// Fetch both sources and align them to the lookback window. Also returns a
    /// warning per series that had no observations.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "netliq::gatekeeper::refresh", skip(self))
    )]
    async fn refresh(
        &self,
        today: NaiveDate,
        lookback_days: u32,
    ) -> Result<(Table, Vec<NetliqError>), NetliqError> {
        let lookback = i64::from(lookback_days);
        let start = days_before(today, lookback + REFRESH_MARGIN_DAYS)?;
        let cutoff = days_before(today, lookback)?;

        let fetch_all = async {
            let macro_table = collect(self.macro_source.as_ref(), Some(start)).await?;
            let market_table = collect(self.market_source.as_ref(), Some(start)).await?;
            let mut silent = silent_columns(self.macro_source.as_ref(), &macro_table);
            silent.extend(silent_columns(self.market_source.as_ref(), &market_table));
            let aligned = align([macro_table, market_table], Some(cutoff));
            Ok::<_, NetliqError>((aligned, silent))
        };
        match self.cfg.request_timeout {
            Some(deadline) => tokio::time::timeout(deadline, fetch_all)
                .await
                .unwrap_or_else(|_| Err(NetliqError::request_timeout("refresh"))),
            None => fetch_all.await,
        }
    }
}
