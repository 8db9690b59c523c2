//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `ReporterError`, so functions can simply return `Result<T>`.
use crate::error::ReporterError;

/// Workspace-wide `Result` alias with `ReporterError` as the default error.
pub type Result<T, E = ReporterError> = std::result::Result<T, E>;
