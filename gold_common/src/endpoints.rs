//! Fixed endpoints and delivery defaults used by the price source and notifier.
use std::time::Duration;

/// Base URL of the spot price API; the symbol is appended as a path segment.
pub const PRICE_API_BASE_URL: &str = "https://api.gold-api.com/price";
/// Commodity symbol requested from the price API.
pub const GOLD_SYMBOL: &str = "XAU";
/// Currency assumed when the payload does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";
/// Upper bound for a single price request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP relay used when `EMAIL_SMTP_SERVER` is unset.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// SMTP submission port used when `EMAIL_SMTP_PORT` is unset.
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Subject line of every price notification.
pub const DEFAULT_SUBJECT: &str = "Gold Price Update";

/// Helper to build the price URL like "base/symbol".
pub fn price_url(base_url: &str, symbol: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), symbol)
}
