//! Liquidity calculator, change analyzer, and signal classifier.
//!
//! Every stage is a pure function of its input table. [`analyze`] chains them.

use std::collections::BTreeMap;

use netliq_core::{ChangeRecord, Field, NetliqError, SignalRecord, Table};

/// Fixed-row-offset changes per tracked field.
pub mod changes;
/// Net liquidity and its moving average.
pub mod liquidity;
/// Regime classification over the latest row.
pub mod signals;

pub use changes::{TRACKED_FIELDS, WINDOW_ROWS, change_over, compute_changes};
pub use liquidity::{MA_WINDOW, with_net_liquidity};
pub use signals::{MOVE_STRESS, VIX_COMPLACENT, VIX_HIGH, classify, classify_row};

/// Output of the three analysis stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Input table with the derived net liquidity columns appended.
    pub table: Table,
    /// Change records keyed by tracked field.
    pub changes: BTreeMap<Field, ChangeRecord>,
    /// Regime classification of the latest row.
    pub signals: SignalRecord,
}

/// Run the liquidity calculator, change analyzer, and signal classifier.
///
/// An empty table short-circuits: no columns are derived, no changes are
/// reported, and the signals are the grey "No Data" record.
///
/// # Errors
/// Returns `MissingField` when a non-empty table lacks a macro component.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "netliq::analysis::analyze", skip_all, fields(rows = table.len()))
)]
pub fn analyze(table: Table) -> Result<Analysis, NetliqError> {
    if table.is_empty() {
        return Ok(Analysis {
            table,
            changes: BTreeMap::new(),
            signals: SignalRecord::no_data(),
        });
    }
    let table = with_net_liquidity(table)?;
    let changes = compute_changes(&table);
    let signals = classify(&table);
    Ok(Analysis {
        table,
        changes,
        signals,
    })
}
