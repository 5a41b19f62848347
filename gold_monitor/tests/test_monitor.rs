mod common;

use common::{FakeSource, RecordingNotifier, gold_payload};
use gold_common::MonitorError;
use gold_common::quote::FALLBACK_MESSAGE;
use gold_monitor::Monitor;
use serde_json::json;
use std::sync::atomic::AtomicBool;

#[test]
fn send_once_delivers_formatted_quote() {
    let monitor = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::accepting());

    assert!(monitor.send_once(None));

    let sent = monitor.notifier().sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.contains("$2,000.12"));
    assert!(sent[0].message.contains("2023-11-14 22:13:20 UTC"));
    assert_eq!(sent[0].subject, "Gold Price Update");
    assert_eq!(sent[0].recipient, None);
}

#[test]
fn send_once_passes_recipient_override() {
    let monitor = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::accepting());
    assert!(monitor.send_once(Some("user@example.com")));
    assert_eq!(
        monitor.notifier().sent()[0].recipient.as_deref(),
        Some("user@example.com")
    );
}

#[test]
fn fetch_failure_skips_delivery() {
    let monitor = Monitor::new(FakeSource::failing(), RecordingNotifier::accepting());

    assert!(!monitor.send_once(None));
    assert_eq!(monitor.source().calls(), 1);
    assert!(monitor.notifier().sent().is_empty());
}

#[test]
fn delivery_failure_is_reported() {
    let monitor = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::rejecting());
    assert!(!monitor.send_once(None));
    assert_eq!(monitor.notifier().sent().len(), 1);
}

#[test]
fn quote_without_price_sends_fallback() {
    let monitor = Monitor::new(
        FakeSource::returning(json!({ "symbol": "XAU" })),
        RecordingNotifier::accepting(),
    );
    assert!(monitor.send_once(None));
    assert_eq!(monitor.notifier().sent()[0].message, FALLBACK_MESSAGE);
}

#[test]
fn validate_requires_config_and_api() {
    let ok = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::accepting());
    assert!(ok.validate());
    assert_eq!(ok.source().calls(), 1);
    assert!(ok.notifier().sent().is_empty());

    let no_api = Monitor::new(FakeSource::failing(), RecordingNotifier::accepting());
    assert!(!no_api.validate());

    let no_config = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::unconfigured());
    assert!(!no_config.validate());
    // The API is still probed so both problems are reported at once.
    assert_eq!(no_config.source().calls(), 1);
}

#[test]
fn preview_does_not_send() {
    let monitor = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::accepting());
    let (quote, message) = monitor.preview().unwrap();
    assert_eq!(quote.symbol, "XAU");
    assert!(message.contains("$2,000.12"));
    assert!(monitor.notifier().sent().is_empty());

    let failing = Monitor::new(FakeSource::failing(), RecordingNotifier::accepting());
    assert!(failing.preview().is_none());
}

#[test]
fn zero_interval_is_rejected_before_fetch() {
    let monitor = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::accepting());
    let shutdown = AtomicBool::new(false);

    let err = monitor.run_on_schedule(0, &shutdown).unwrap_err();

    assert!(matches!(err, MonitorError::InvalidInterval(0)));
    assert_eq!(monitor.source().calls(), 0);
    assert!(monitor.notifier().sent().is_empty());
}

#[test]
fn schedule_fires_immediately_then_stops_on_interrupt() {
    let monitor = Monitor::new(FakeSource::returning(gold_payload()), RecordingNotifier::accepting());
    let shutdown = AtomicBool::new(true);

    monitor.run_on_schedule(60, &shutdown).unwrap();

    assert_eq!(monitor.source().calls(), 1);
    assert_eq!(monitor.notifier().sent().len(), 1);
}

#[test]
fn failed_fire_does_not_abort_schedule() {
    let monitor = Monitor::new(FakeSource::failing(), RecordingNotifier::accepting());
    let shutdown = AtomicBool::new(true);

    assert!(monitor.run_on_schedule(1, &shutdown).is_ok());
    assert_eq!(monitor.source().calls(), 1);
    assert!(monitor.notifier().sent().is_empty());
}
