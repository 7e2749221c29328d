//! Pipeline entry point: obtain, derive, compare, classify.

use std::collections::BTreeMap;

use netliq_core::{ChangeRecord, Field, NetliqError, ReportContext, Row, SignalRecord, Table};

use crate::analysis::analyze;
use crate::core::Netliq;
use crate::gatekeeper::Origin;

/// Result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Merged table with the derived net liquidity columns.
    pub table: Table,
    /// Change records keyed by tracked field.
    pub changes: BTreeMap<Field, ChangeRecord>,
    /// Regime classification of the latest row.
    pub signals: SignalRecord,
    /// Where the merged table came from.
    pub origin: Origin,
    /// Failures absorbed while obtaining the table (stale cache, persist).
    pub warnings: Vec<NetliqError>,
}

impl Assessment {
    /// Whether the merged table has any rows. When false, `signals` is the
    /// grey "No Data" record.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.table.is_empty()
    }

    /// Latest row of the analyzed table.
    #[must_use]
    pub fn latest(&self) -> Option<Row> {
        self.table.latest()
    }

    /// Context handed to the report writer.
    #[must_use]
    pub fn report_context(&self) -> ReportContext {
        ReportContext {
            signals: self.signals.clone(),
            metrics: self.changes.clone(),
            latest_values: self.latest(),
        }
    }
}

impl Netliq {
    /// Run the whole pipeline once.
    ///
    /// The derived columns, changes, and signals are recomputed on every call;
    /// only the merged table is cached.
    ///
    /// # Errors
    /// Propagates errors from [`Netliq::obtain`] and `MissingField` from the
    /// liquidity calculator.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "netliq::pipeline::assess", skip(self))
    )]
    pub async fn assess(&self) -> Result<Assessment, NetliqError> {
        let snapshot = self.obtain().await?;
        let analysis = analyze(snapshot.table)?;
        #[cfg(feature = "tracing")]
        tracing::info!(
            rows = analysis.table.len(),
            overall = %analysis.signals.overall.label,
            origin = ?snapshot.origin,
            "assessment complete"
        );
        Ok(Assessment {
            table: analysis.table,
            changes: analysis.changes,
            signals: analysis.signals,
            origin: snapshot.origin,
            warnings: snapshot.warnings,
        })
    }
}
