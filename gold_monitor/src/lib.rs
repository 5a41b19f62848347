//! Gold price monitor: fetch the XAU spot price and relay it by email.
//!
//! - `price_source` — HTTP retrieval and normalization of the spot quote.
//! - `notifier` — SMTP delivery of the rendered message.
//! - `monitor` — validate / send-once / run-on-schedule orchestration.
#![warn(missing_docs)]
pub mod monitor;
pub mod notifier;
pub mod price_source;

pub use monitor::{Monitor, ScheduleState};
pub use notifier::{EmailNotifier, Notifier};
pub use price_source::{GoldApiSource, QuoteSource};
