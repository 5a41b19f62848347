//! Shorthand for fallible fetch, send and configuration operations.
use crate::error::MonitorError;

/// `Result` whose error side is a tagged `MonitorError` unless stated otherwise.
pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
