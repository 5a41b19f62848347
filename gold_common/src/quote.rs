//! Spot price quote model and notification message formatting.
//!
//! A `PriceQuote` is built from the JSON object returned by the price API. Missing
//! fields are filled with defaults (`XAU`, `USD`) and the epoch timestamp is turned
//! into a UTC display string. Quotes are never stored; they live for one fire.
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::endpoints::{DEFAULT_CURRENCY, GOLD_SYMBOL};
use crate::error::MonitorError;
use crate::result::Result;

/// Display string used when the payload carries no usable timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";
/// Message sent when no usable quote is available.
pub const FALLBACK_MESSAGE: &str = "Unable to fetch current gold price data.";
/// Placeholder for a missing price in log lines.
pub const MISSING_PRICE: &str = "N/A";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Single point-in-time price observation for a commodity symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Commodity symbol (e.g., `XAU`).
    pub symbol: String,
    /// Spot price in USD per troy ounce. `None` makes the quote unusable for formatting.
    pub price_usd_per_ounce: Option<f64>,
    /// Quote currency.
    pub currency: String,
    /// Observation time in seconds since the UNIX epoch.
    pub observed_at_unix_seconds: Option<i64>,
    /// `observed_at_unix_seconds` rendered as `YYYY-MM-DD HH:MM:SS UTC`, or `Unknown`.
    pub display_timestamp: String,
    /// Untouched API payload.
    pub raw_payload: Value,
}

impl PriceQuote {
    /// Normalize a decoded API payload.
    ///
    /// Fails with `MonitorError::Parse` when the payload is not a JSON object.
    pub fn from_payload(payload: Value) -> Result<Self> {
        let fields = payload
            .as_object()
            .ok_or_else(|| MonitorError::Parse(format!("expected a JSON object, got: {}", payload)))?;

        let symbol = fields
            .get("symbol")
            .and_then(Value::as_str)
            .unwrap_or(GOLD_SYMBOL)
            .to_string();
        let currency = fields
            .get("currency")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();
        let price_usd_per_ounce = fields.get("price").and_then(Value::as_f64);
        let observed_at_unix_seconds = fields
            .get("timestamp")
            .and_then(|ts| ts.as_i64().or_else(|| ts.as_f64().map(|secs| secs as i64)));

        Ok(Self {
            symbol,
            price_usd_per_ounce,
            currency,
            observed_at_unix_seconds,
            display_timestamp: display_timestamp(observed_at_unix_seconds),
            raw_payload: payload,
        })
    }

    /// Decode and normalize a raw JSON body.
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        let payload: Value = serde_json::from_slice(body)?;
        Self::from_payload(payload)
    }

    /// Whether the quote carries a price.
    pub fn is_usable(&self) -> bool {
        self.price_usd_per_ounce.is_some()
    }

    /// Price as `$1,234.56`, or `N/A` when absent.
    pub fn price_label(&self) -> String {
        match self.price_usd_per_ounce {
            Some(price) => format!("${}", format_thousands(price)),
            None => MISSING_PRICE.to_string(),
        }
    }
}

/// Render epoch seconds as a UTC display string.
pub fn display_timestamp(unix_seconds: Option<i64>) -> String {
    unix_seconds
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string())
}

/// Format a value with two decimals and comma thousands separators.
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Render the notification body for a quote.
///
/// An absent quote or a quote without a price yields [`FALLBACK_MESSAGE`].
pub fn format_message(quote: Option<&PriceQuote>) -> String {
    let Some(quote) = quote else {
        return FALLBACK_MESSAGE.to_string();
    };
    let Some(price) = quote.price_usd_per_ounce else {
        return FALLBACK_MESSAGE.to_string();
    };

    format!(
        "📈 GOLD PRICE UPDATE 📈\n\
         \n\
         Current Gold Price: ${} USD per troy ounce\n\
         Last Updated: {}\n\
         \n\
         Symbol: {}\n\
         Currency: {}\n\
         \n\
         ---\n\
         This is an automated price update from your Gold Price Monitor.",
        format_thousands(price),
        quote.display_timestamp,
        quote.symbol,
        quote.currency,
    )
}
