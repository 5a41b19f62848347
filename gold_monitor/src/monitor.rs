//! Fetch → format → notify orchestration.
//!
//! `Monitor` ties a `QuoteSource` to a `Notifier` and exposes the three entry
//! operations: `validate`, `send_once` and `run_on_schedule`. Every call is
//! independent; the only state that outlives a call is the `ScheduleState`
//! owned by the schedule loop while it runs.
use chrono::{DateTime, TimeDelta, Utc};
use gold_common::endpoints::DEFAULT_SUBJECT;
use gold_common::quote::format_message;
use gold_common::{MonitorError, PriceQuote, Result};
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::notifier::Notifier;
use crate::price_source::QuoteSource;

/// Sleep between two schedule checks.
pub const TICK: Duration = Duration::from_secs(1);

/// Wall-clock timer of the schedule loop.
///
/// Fires are best effort: the next fire is planned one interval after the
/// actual fire time, with no catch-up if the loop or the clock drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleState {
    interval: TimeDelta,
    next_fire: DateTime<Utc>,
}

impl ScheduleState {
    /// Timer for `interval_minutes`, counted from `fired_at`.
    pub fn new(interval_minutes: u64, fired_at: DateTime<Utc>) -> Result<Self> {
        if interval_minutes < 1 {
            return Err(MonitorError::InvalidInterval(interval_minutes));
        }
        let minutes = i64::try_from(interval_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .ok_or(MonitorError::IntervalTooLarge(interval_minutes))?;
        let mut state = Self {
            interval: minutes,
            next_fire: fired_at,
        };
        state.mark_fired(fired_at);
        Ok(state)
    }

    /// Whether a fire is due at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_fire
    }

    /// Record a fire at `now` and plan the next one.
    pub fn mark_fired(&mut self, now: DateTime<Utc>) {
        self.next_fire = now
            .checked_add_signed(self.interval)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    /// Planned time of the next fire.
    pub fn next_fire(&self) -> DateTime<Utc> {
        self.next_fire
    }
}

/// Price monitor over a quote source and a notifier.
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
}

impl<S: QuoteSource, N: Notifier> Monitor<S, N> {
    /// Wire a source and a notifier together.
    pub fn new(source: S, notifier: N) -> Self {
        Self { source, notifier }
    }

    /// Underlying quote source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Underlying notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Check the notifier configuration and probe the price API.
    ///
    /// Both checks always run; the probed quote is discarded.
    pub fn validate(&self) -> bool {
        info!("Validating configuration...");
        let email_valid = self.notifier.validate_configuration();

        info!("Testing API connection...");
        let api_valid = self.source.fetch_quote().is_ok();
        if api_valid {
            info!("API connection successful");
        } else {
            error!("API connection failed");
        }

        email_valid && api_valid
    }

    /// Fetch a quote without sending it, returning the quote and its message.
    pub fn preview(&self) -> Option<(PriceQuote, String)> {
        info!("Fetching gold price...");
        let quote = self.source.fetch_quote().ok()?;
        let message = format_message(Some(&quote));
        Some((quote, message))
    }

    /// Fetch, format and deliver one notification.
    ///
    /// Returns `false` without attempting delivery if the fetch fails.
    pub fn send_once(&self, recipient: Option<&str>) -> bool {
        info!("Fetching gold price...");
        let quote = match self.source.fetch_quote() {
            Ok(quote) => quote,
            Err(e) => {
                error!("Failed to fetch gold price [{}]: {}", e.kind(), e);
                return false;
            }
        };

        if quote.is_usable() {
            info!("Gold price fetched: {} {}/oz", quote.price_label(), quote.currency);
        } else {
            warn!("Gold price fetched without a price ({})", quote.price_label());
        }

        let message = format_message(Some(&quote));
        if self.notifier.send(&message, recipient, DEFAULT_SUBJECT) {
            info!("Email notification sent successfully");
            true
        } else {
            error!("Failed to send email notification");
            false
        }
    }

    /// Send now, then again every `interval_minutes` until `shutdown` is set.
    ///
    /// An interval below one minute is rejected before anything is fetched.
    /// Failed fires are logged and the loop keeps going. `shutdown` is checked
    /// once per tick, so an in-flight fetch or send always completes first.
    pub fn run_on_schedule(&self, interval_minutes: u64, shutdown: &AtomicBool) -> Result<()> {
        self.run_loop(interval_minutes, shutdown, TICK, Utc::now)
    }

    /// Schedule loop with an explicit tick and wall clock.
    pub(crate) fn run_loop<C>(
        &self,
        interval_minutes: u64,
        shutdown: &AtomicBool,
        tick: Duration,
        clock: C,
    ) -> Result<()>
    where
        C: Fn() -> DateTime<Utc>,
    {
        let mut schedule = ScheduleState::new(interval_minutes, clock())?;
        info!("Starting scheduled monitoring (every {} minutes)", interval_minutes);
        info!("Press Ctrl+C to stop");

        self.send_once(None);
        schedule.mark_fired(clock());

        while !shutdown.load(Ordering::Relaxed) {
            thread::sleep(tick);
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            if schedule.is_due(clock()) {
                self.send_once(None);
                schedule.mark_fired(clock());
                info!("Next update at {}", schedule.next_fire().format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        info!("Monitoring stopped by user");
        Ok(())
    }
}
