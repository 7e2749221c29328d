//! Netliq tracks the US dollar net liquidity regime.
//!
//! Overview
//! - Pulls the Fed balance sheet (WALCL), overnight reverse repo (RRP), and
//!   Treasury General Account (TGA) from a macro source, and equity, rates,
//!   volatility, FX, gold, and bitcoin closes from a market source.
//! - Resamples every series to a daily calendar with forward fill and aligns
//!   both sources on one index.
//! - Derives net liquidity (`WALCL - RRP - TGA`, in billions of USD) and its
//!   20-row moving average.
//! - Reports 1w/2w/1m changes for the tracked fields and classifies the latest
//!   row into a liquidity trend, a volatility regime, and an overall traffic
//!   light.
//! - Persists the merged table once per day and reuses it; a failed refresh
//!   falls back to the last persisted table.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use netliq::{ChatAnalyst, Netliq, ReportStore, generate_report};
//! use netliq_fred::FredSource;
//! use netliq_yahoo::YahooSource;
//!
//! let netliq = Netliq::builder()
//!     .with_macro_source(Arc::new(FredSource::new_default()))
//!     .with_market_source(Arc::new(YahooSource::new_default()))
//!     .build()?;
//! let assessment = netliq.assess().await?;
//!
//! let ctx = assessment.report_context();
//! let language = netliq.config().language;
//! let text = generate_report(&ChatAnalyst::new_default(), &ctx, language).await;
//! ReportStore::new("reports").save(netliq.today(), language.code(), &text, Some(&ctx))?;
//! ```
#![warn(missing_docs)]

pub mod analysis;
mod cache;
mod clock;
mod core;
mod gatekeeper;
mod pipeline;
pub mod report;

pub use analysis::{Analysis, analyze};
pub use cache::{CACHE_FILE_NAME, TableCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use crate::core::{Netliq, NetliqBuilder};
pub use gatekeeper::{Origin, Snapshot};
pub use pipeline::Assessment;
pub use report::{ChatAnalyst, ReportStore, ReportWriter, generate_report};

pub use netliq_core::*;
