//! Shared fixtures for the gold monitor integration tests.
//!
//! Provides recording fakes for `QuoteSource` and `Notifier`, plus a one-shot
//! HTTP responder on a local `TcpListener` standing in for the price API.
#![allow(dead_code)]

use gold_common::{MonitorError, PriceQuote, Result};
use gold_monitor::{Notifier, QuoteSource};
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Payload used by the happy-path scenarios.
pub fn gold_payload() -> Value {
    json!({
        "symbol": "XAU",
        "price": 2000.123,
        "currency": "USD",
        "timestamp": 1700000000
    })
}

/// Quote source that replays a fixed payload, or fails with a network error.
pub struct FakeSource {
    payload: Option<Value>,
    calls: Cell<usize>,
}

impl FakeSource {
    pub fn returning(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            payload: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl QuoteSource for FakeSource {
    fn fetch_quote(&self) -> Result<PriceQuote> {
        self.calls.set(self.calls.get() + 1);
        match &self.payload {
            Some(payload) => PriceQuote::from_payload(payload.clone()),
            None => Err(MonitorError::Network("simulated connection refused".to_string())),
        }
    }
}

/// One recorded `send` invocation.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub message: String,
    pub recipient: Option<String>,
    pub subject: String,
}

/// Notifier that records every send and answers with a fixed outcome.
pub struct RecordingNotifier {
    accept: bool,
    configured: bool,
    sent: RefCell<Vec<SentMessage>>,
}

impl RecordingNotifier {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            configured: true,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            ..Self::accepting()
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::accepting()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, message: &str, recipient: Option<&str>, subject: &str) -> bool {
        self.sent.borrow_mut().push(SentMessage {
            message: message.to_string(),
            recipient: recipient.map(String::from),
            subject: subject.to_string(),
        });
        self.accept
    }

    fn validate_configuration(&self) -> bool {
        self.configured
    }
}

/// Serve a single HTTP response on a random local port.
///
/// Returns the base URL and a handle yielding the raw request head.
pub fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let size = stream.read(&mut buf).unwrap();
            if size == 0 {
                break;
            }
            request.extend_from_slice(&buf[..size]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (base_url, handle)
}
