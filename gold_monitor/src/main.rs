//! Gold Price Monitor — fetches the XAU spot price from the public gold price API
//! and emails it, either once or on a fixed interval until Ctrl+C.
//!
//! Usage example (CLI):
//! ```bash
//! gold_monitor --validate
//! gold_monitor --send-now --email user@example.com
//! gold_monitor --schedule 30
//! ```
//!
//! SMTP settings are read from the environment or a `.env` file
//! (`EMAIL_USERNAME`, `EMAIL_PASSWORD`, `EMAIL_TO`, ...). See `gold_common::config`.
#![warn(missing_docs)]
mod args;

use crate::args::{Action, Args};
use clap::{CommandFactory, Parser};
use gold_common::{MonitorError, NotificationConfig, PriceQuote, Result};
use gold_monitor::{EmailNotifier, GoldApiSource, Monitor};
use log::{error, info};
use std::process::ExitCode;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

const USAGE_EXAMPLES: &str = "\
Examples:
  gold_monitor --validate                       # Test configuration
  gold_monitor --send-now                       # Send price update now
  gold_monitor --schedule 30                    # Monitor every 30 minutes
  gold_monitor --send-now --email user@ex.com   # Send to specific email
  gold_monitor --preview                        # Print the message without sending";

fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    let action = args.action();
    if action == Action::Help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(action) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("[{}] {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(action: Action) -> Result<bool> {
    let config = NotificationConfig::from_env()?;
    let monitor = Monitor::new(GoldApiSource::new()?, EmailNotifier::new(config));

    match action {
        Action::Validate => {
            if monitor.validate() {
                info!("All systems ready!");
                Ok(true)
            } else {
                error!("Configuration issues found. Please check your .env file");
                Ok(false)
            }
        }
        Action::SendNow(recipient) => {
            info!("Sending immediate price update...");
            Ok(monitor.send_once(recipient.as_deref()))
        }
        Action::Schedule(minutes) => {
            let shutdown = Arc::new(AtomicBool::new(false));
            {
                let shutdown = shutdown.clone();
                ctrlc::set_handler(move || {
                    info!("Ctrl+C received. Stopping monitor...");
                    shutdown.store(true, Ordering::SeqCst);
                })
                .map_err(|e| MonitorError::Signal(e.to_string()))?;
            }
            monitor.run_on_schedule(minutes, &shutdown)?;
            Ok(true)
        }
        Action::Preview => match monitor.preview() {
            Some((quote, message)) => {
                println!("{}", render_preview(&quote, &message));
                Ok(true)
            }
            None => {
                error!("Failed to fetch gold price data");
                Ok(false)
            }
        },
        Action::Help => {
            print_usage();
            Ok(true)
        }
    }
}

/// Quote summary followed by the message that would be emailed.
fn render_preview(quote: &PriceQuote, message: &str) -> String {
    let rule = "-".repeat(30);
    format!(
        "Symbol: {}\nPrice: {} {} per troy ounce\nCurrency: {}\nLast Updated: {}\n\n{}\n{}\n{}",
        quote.symbol,
        quote.price_label(),
        quote.currency,
        quote.currency,
        quote.display_timestamp,
        rule,
        message,
        rule,
    )
}

fn print_usage() {
    let mut command = Args::command();
    if let Err(e) = command.print_help() {
        error!("Failed to print help: {}", e);
    }
    println!("\n{}", USAGE_EXAMPLES);
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
