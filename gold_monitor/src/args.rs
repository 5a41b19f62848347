//! Command-line arguments for the gold price monitor.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;

/// Parsed command-line arguments.
///
/// When several actions are given, the first one in declaration order wins.
#[derive(Debug, Parser)]
#[command(version, about = "Fetch the current gold price and send it by email", long_about = None)]
pub struct Args {
    /// Validate configuration and test connections.
    #[clap(long)]
    pub validate: bool,

    /// Send a price update immediately.
    #[clap(long)]
    pub send_now: bool,

    /// Run on schedule, sending an update every MINUTES (at least 1).
    #[clap(long, value_name = "MINUTES")]
    pub schedule: Option<u64>,

    /// Fetch the price and print the message without sending it.
    #[clap(long)]
    pub preview: bool,

    /// Email address to send to (overrides EMAIL_TO).
    #[clap(long)]
    pub email: Option<String>,
}

/// Action selected from the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Check configuration and probe the price API.
    Validate,
    /// Send one update, optionally to an explicit recipient.
    SendNow(Option<String>),
    /// Send an update every given number of minutes.
    Schedule(u64),
    /// Print the rendered message only.
    Preview,
    /// Print usage.
    Help,
}

impl Args {
    /// Resolve the flags into a single action.
    pub fn action(&self) -> Action {
        if self.validate {
            Action::Validate
        } else if self.send_now {
            Action::SendNow(self.email.clone())
        } else if let Some(minutes) = self.schedule {
            Action::Schedule(minutes)
        } else if self.preview {
            Action::Preview
        } else {
            Action::Help
        }
    }
}
