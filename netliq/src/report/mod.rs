//! Report generation and storage.

/// Chat-completions report writer.
pub mod analyst;
/// JSON report archive.
pub mod store;

pub use analyst::{ChatAnalyst, ReportWriter, generate_report, system_prompt};
pub use store::ReportStore;
