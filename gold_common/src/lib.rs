//!
//! Common types and utilities shared by the gold reporter.
//!
//! This crate aggregates:
//! - `error` — unified error type `ReporterError` used across the workspace.
//! - `result` — handy `Result<T, ReporterError>` alias.
//! - `market` — the normalized `MarketQuote` every price source produces.
//! - `payload` — the outbound relay payload and its builder.
//! - `sources` — the `SourceKind` enum naming the supported price vendors.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod market;
pub mod net;
pub mod payload;
pub mod result;
pub mod sources;

pub use error::ReporterError;
pub use market::{MarketQuote, PriceLevel};
pub use payload::OutboundPayload;
pub use result::Result;
pub use sources::SourceKind;
