//! Email delivery of price notifications over authenticated SMTP.
//!
//! Every `send` opens its own STARTTLS session, authenticates, submits one
//! plain-text message and closes the session when the transport is dropped at
//! the end of the call. Missing credentials or recipient are caught locally,
//! before any connection is attempted.
use gold_common::config::{ENV_PASSWORD, ENV_RECIPIENT, ENV_USERNAME};
use gold_common::{MonitorError, NotificationConfig, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Severity};
use lettre::{Message, SmtpTransport, Transport};
use log::{error, info, warn};
use std::time::Duration;

/// Bound on each SMTP command round-trip.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers a rendered message to a recipient.
pub trait Notifier {
    /// Deliver `message` with `subject`. `recipient` overrides the configured default.
    ///
    /// Returns `true` only if the server accepted the message.
    fn send(&self, message: &str, recipient: Option<&str>, subject: &str) -> bool;

    /// Check that credentials and a default recipient are configured, without connecting.
    fn validate_configuration(&self) -> bool;
}

/// SMTP notifier configured once from `NotificationConfig`.
pub struct EmailNotifier {
    config: NotificationConfig,
}

impl EmailNotifier {
    /// Create a notifier owning its configuration.
    pub fn new(config: NotificationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (self.config.username.as_deref(), self.config.password.as_deref()) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(MonitorError::Configuration(format!(
                "email credentials not configured, set {} and {}",
                ENV_USERNAME, ENV_PASSWORD
            ))),
        }
    }

    fn resolve_recipient<'a>(&'a self, recipient: Option<&'a str>) -> Result<&'a str> {
        recipient
            .filter(|r| !r.trim().is_empty())
            .or(self.config.default_recipient.as_deref())
            .ok_or_else(|| {
                MonitorError::Configuration(format!(
                    "no recipient configured, set {} or pass a recipient",
                    ENV_RECIPIENT
                ))
            })
    }

    /// Deliver one message and report the failure class on error.
    ///
    /// Returns the resolved recipient on success. [`Notifier::send`] wraps this
    /// and logs the error instead of returning it.
    pub fn try_send(&self, message: &str, recipient: Option<&str>, subject: &str) -> Result<String> {
        let (username, password) = self.credentials()?;
        let to = self.resolve_recipient(recipient)?;

        let from: Mailbox = username
            .parse()
            .map_err(|e| MonitorError::Configuration(format!("invalid sender {:?}: {}", username, e)))?;
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| MonitorError::Configuration(format!("invalid recipient {:?}: {}", to, e)))?;

        let email = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.to_string())
            .map_err(|e| MonitorError::Configuration(format!("failed to build message: {}", e)))?;

        let transport = SmtpTransport::starttls_relay(&self.config.smtp_host)
            .map_err(classify_smtp_error)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        transport.send(&email).map_err(classify_smtp_error)?;
        Ok(to.to_string())
    }
}

impl Notifier for EmailNotifier {
    fn send(&self, message: &str, recipient: Option<&str>, subject: &str) -> bool {
        match self.try_send(message, recipient, subject) {
            Ok(to) => {
                info!("Email sent successfully to {}", to);
                true
            }
            Err(e @ MonitorError::Auth(_)) => {
                error!("SMTP authentication failed, check your email credentials [{}]: {}", e.kind(), e);
                false
            }
            Err(e) => {
                error!("Error sending email [{}]: {}", e.kind(), e);
                false
            }
        }
    }

    fn validate_configuration(&self) -> bool {
        match self.config.missing_setting() {
            Some(key) => {
                warn!("{} not configured", key);
                false
            }
            None => {
                info!("Email configuration appears valid");
                true
            }
        }
    }
}

/// Map a transport error onto the failure taxonomy.
///
/// Every `53x` reply counts as an authentication failure: `535` (bad
/// credentials), `534` (mechanism too weak) and `530` (authentication or
/// encryption required), including a `530` sent in answer to STARTTLS. Any
/// other server reply is a protocol failure. Errors without a reply (connect,
/// TLS, timeout, missing STARTTLS support) are transport failures.
fn classify_smtp_error(err: lettre::transport::smtp::Error) -> MonitorError {
    match err.status() {
        Some(code)
            if code.severity == Severity::PermanentNegativeCompletion
                && code.category == Category::Unspecified3 =>
        {
            MonitorError::Auth(err.to_string())
        }
        Some(_) => MonitorError::Protocol(err.to_string()),
        None if err.is_response() => MonitorError::Protocol(err.to_string()),
        None => MonitorError::Transport(err.to_string()),
    }
}
