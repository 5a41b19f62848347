//!
//! Common types and utilities shared by the gold price monitor.
//!
//! This crate aggregates:
//! - `error` — unified error type `MonitorError` and its `FailureKind` tags.
//! - `result` — handy `Result<T, MonitorError>` alias.
//! - `config` — SMTP and recipient settings loaded once from the environment.
//! - `quote` — the normalized `PriceQuote` and the notification message template.
//! - `endpoints` — price API and SMTP constants.
#![warn(missing_docs)]
pub mod config;
pub mod endpoints;
pub mod error;
pub mod quote;
pub mod result;

pub use config::NotificationConfig;
pub use error::{FailureKind, MonitorError};
pub use quote::PriceQuote;
pub use result::Result;
