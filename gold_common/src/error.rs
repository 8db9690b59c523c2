//! Error types shared across the workspace.
//!
//! The `ReporterError` enum covers the whole failure taxonomy of a run: a single
//! upstream source being unavailable (recovered locally by the caller), every
//! price source failing, missing configuration and relay delivery failures, plus
//! the plumbing errors (JSON, HTTP transport) they are built from.
use thiserror::Error;

/// Unified error type shared by the reporter and its shared model crate.
#[derive(Error, Debug)]
pub enum ReporterError {
    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport-level HTTP failure (timeout, DNS, connection refused, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A single price source or news feed could not produce usable data.
    #[error("Source unavailable: {source_name}: {reason}")]
    SourceUnavailable {
        /// Human-readable source label or feed URL.
        source_name: String,
        /// Why the source was skipped.
        reason: String,
    },

    /// Every configured price source failed; the run cannot build a payload.
    #[error("All price sources exhausted")]
    AllSourcesExhausted,

    /// A required configuration value is absent or empty.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// A command-line or environment value could not be parsed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The relay rejected the payload or could not be reached.
    #[error("Delivery failure (status {status:?}): {body}")]
    DeliveryFailure {
        /// HTTP status when the relay answered, `None` when unreachable.
        status: Option<u16>,
        /// Response body or transport error text.
        body: String,
    },
}

impl ReporterError {
    /// Shorthand for building a [`ReporterError::SourceUnavailable`].
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ReporterError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
