//! Error types shared between the price source, notifier and monitor.
//!
//! The `MonitorError` enum covers every way a single attempt can fail. Each
//! failure is handled at the boundary where it occurs: logged with its
//! `FailureKind` tag and turned into a plain success/failure result.
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Unified error type shared by all components.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Missing or invalid credentials, recipient or settings. Detected locally.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Price request transport failure, timeout or non-2xx status.
    #[error("Network error: {0}")]
    Network(String),

    /// Price payload that is not a JSON object.
    #[error("Parse error: {0}")]
    Parse(String),

    /// SMTP server rejected the credentials.
    #[error("SMTP authentication failed: {0}")]
    Auth(String),

    /// SMTP server answered with an error reply.
    #[error("SMTP protocol error: {0}")]
    Protocol(String),

    /// Any other mail transport failure (connect, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Schedule interval below one minute.
    #[error("Schedule interval must be at least 1 minute, got {0}")]
    InvalidInterval(u64),

    /// Schedule interval too large to represent as a duration.
    #[error("Schedule interval of {0} minutes is too large")]
    IntervalTooLarge(u64),

    /// Interrupt handler could not be installed.
    #[error("Signal handler error: {0}")]
    Signal(String),
}

/// Short tag naming the failure class, used in log lines.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Display, EnumString, Eq, PartialEq)]
pub enum FailureKind {
    ConfigurationError,
    NetworkError,
    ParseError,
    AuthError,
    ProtocolError,
    TransportError,
    InvalidInterval,
    SignalError,
}

impl MonitorError {
    /// Failure class of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            MonitorError::Configuration(_) => FailureKind::ConfigurationError,
            MonitorError::Network(_) => FailureKind::NetworkError,
            MonitorError::Parse(_) => FailureKind::ParseError,
            MonitorError::Auth(_) => FailureKind::AuthError,
            MonitorError::Protocol(_) => FailureKind::ProtocolError,
            MonitorError::Transport(_) => FailureKind::TransportError,
            MonitorError::InvalidInterval(_) | MonitorError::IntervalTooLarge(_) => {
                FailureKind::InvalidInterval
            }
            MonitorError::Signal(_) => FailureKind::SignalError,
        }
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(err: serde_json::Error) -> Self {
        MonitorError::Parse(err.to_string())
    }
}
