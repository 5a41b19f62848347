//! Spot price retrieval over HTTP.
//!
//! `GoldApiSource` issues one GET per call to `{base_url}/{symbol}` with a bounded
//! timeout and normalizes the JSON body into a `PriceQuote`. There are no retries:
//! a failed attempt is terminal for that call and is reported as a tagged error.
use gold_common::endpoints::{GOLD_SYMBOL, PRICE_API_BASE_URL, REQUEST_TIMEOUT, price_url};
use gold_common::{MonitorError, PriceQuote, Result};
use log::{debug, error};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Anything that can produce a fresh quote on demand.
pub trait QuoteSource {
    /// Fetch a single quote. Errors are `Network` or `Parse`.
    fn fetch_quote(&self) -> Result<PriceQuote>;
}

/// Price source backed by the public gold price API.
pub struct GoldApiSource {
    client: Client,
    url: String,
}

impl GoldApiSource {
    /// Source for `XAU` at the public API with the default 10s timeout.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(PRICE_API_BASE_URL, GOLD_SYMBOL, REQUEST_TIMEOUT)
    }

    /// Source for `symbol` at an arbitrary base URL.
    pub fn with_endpoint(base_url: &str, symbol: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: price_url(base_url, symbol),
        })
    }

    /// Full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self) -> Result<PriceQuote> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| MonitorError::Network(e.to_string()))?;

        let payload: Value = response.json().map_err(|e| {
            if e.is_decode() {
                MonitorError::Parse(e.to_string())
            } else {
                MonitorError::Network(e.to_string())
            }
        })?;

        let quote = PriceQuote::from_payload(payload)?;
        debug!(
            "Normalized quote: {}",
            serde_json::to_string(&quote).unwrap_or_default()
        );
        Ok(quote)
    }
}

impl QuoteSource for GoldApiSource {
    fn fetch_quote(&self) -> Result<PriceQuote> {
        debug!("GET {}", self.url);
        self.request().inspect_err(|e| {
            error!("Error fetching gold price [{}]: {}", e.kind(), e);
        })
    }
}
