use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::Field;

/// Unified error type for the netliq workspace.
///
/// Configuration and missing-field errors are fatal for the stage that raises
/// them. Remote fetch failures are recoverable only inside the cache
/// gatekeeper, which may substitute a previously persisted table.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NetliqError {
    /// A source or collaborator was invoked without its credentials/config.
    #[error("{provider} is not configured: {msg}")]
    Configuration {
        /// Name of the unconfigured provider (e.g. "netliq-fred").
        provider: String,
        /// What is missing.
        msg: String,
    },

    /// Required columns are absent from a table.
    #[error("missing required fields: {}", join_fields(.fields))]
    MissingField {
        /// Every absent column, in catalog order.
        fields: Vec<Field>,
    },

    /// A provider call failed at the transport or provider level.
    #[error("{provider} fetch failed: {msg}")]
    RemoteFetch {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Malformed payloads or tables.
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Reading or writing the persisted table failed.
    #[error("cache failure: {0}")]
    Cache(String),

    /// The overall refresh exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl NetliqError {
    /// Helper: build a `Configuration` error for a provider.
    pub fn configuration(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Configuration {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RemoteFetch` error for a provider.
    pub fn remote(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RemoteFetch {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MissingField` error.
    #[must_use]
    pub const fn missing(fields: Vec<Field>) -> Self {
        Self::MissingField { fields }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }
}
