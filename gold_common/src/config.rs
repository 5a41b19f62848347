//! Notification settings loaded once at process start.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. Library code never reads the environment
//! itself; the entry point builds a `NotificationConfig` and hands it over.
use crate::endpoints::{DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
use crate::error::MonitorError;
use crate::result::Result;

/// SMTP relay host.
pub const ENV_SMTP_SERVER: &str = "EMAIL_SMTP_SERVER";
/// SMTP relay port.
pub const ENV_SMTP_PORT: &str = "EMAIL_SMTP_PORT";
/// SMTP login, also used as the sender address.
pub const ENV_USERNAME: &str = "EMAIL_USERNAME";
/// SMTP password or app password.
pub const ENV_PASSWORD: &str = "EMAIL_PASSWORD";
/// Recipient used when no override is given.
pub const ENV_RECIPIENT: &str = "EMAIL_TO";
/// Price API key. Reserved; the current API is unauthenticated.
pub const ENV_API_KEY: &str = "GOLD_API_KEY";

/// Immutable SMTP and recipient settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// SMTP relay host name.
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS submission port by default).
    pub smtp_port: u16,
    /// SMTP login and sender address.
    pub username: Option<String>,
    /// SMTP password.
    pub password: Option<String>,
    /// Recipient used when `send` gets no explicit recipient.
    pub default_recipient: Option<String>,
    /// Reserved price API key, never sent.
    pub api_key: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            default_recipient: None,
            api_key: None,
        }
    }
}

impl NotificationConfig {
    /// Load `.env` if present, then read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Blank values count as unset. A port that is not a valid `u16` is
    /// reported as a configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let smtp_port = match get(ENV_SMTP_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                MonitorError::Configuration(format!("{}={:?} is not a valid port: {}", ENV_SMTP_PORT, raw, e))
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            smtp_host: get(ENV_SMTP_SERVER).unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
            default_recipient: get(ENV_RECIPIENT),
            api_key: get(ENV_API_KEY),
        })
    }

    /// Name of the first missing setting required for delivery, if any.
    pub fn missing_setting(&self) -> Option<&'static str> {
        if self.username.is_none() {
            Some(ENV_USERNAME)
        } else if self.password.is_none() {
            Some(ENV_PASSWORD)
        } else if self.default_recipient.is_none() {
            Some(ENV_RECIPIENT)
        } else {
            None
        }
    }
}
