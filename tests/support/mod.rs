//! Test doubles for exercising wires without a network.

use async_trait::async_trait;
use fluent_wire::{Result, Wire, WireResponse};
use http::{HeaderMap, StatusCode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

type Handler = dyn Fn(usize, &str, &str, &HashMap<String, String>, Option<&str>) -> Result<WireResponse>
    + Send
    + Sync;

/// A deterministic wire driven by a closure.
///
/// The handler receives the 1-indexed attempt number plus the full exchange,
/// and returns whatever outcome the test scripts for that attempt. The wire
/// counts every invocation so tests can assert exact attempt totals.
pub struct MockWire {
    handler: Box<Handler>,
    attempts: AtomicUsize,
}

impl MockWire {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(usize, &str, &str, &HashMap<String, String>, Option<&str>) -> Result<WireResponse>
            + Send
            + Sync
            + 'static,
    {
        Self {
            handler: Box::new(handler),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Total number of `send` invocations so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Wire for MockWire {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        (self.handler)(attempt, method, uri, headers, body)
    }
}

/// Builds a bodyless response with the given status code.
pub fn status(code: u16) -> WireResponse {
    WireResponse::new(StatusCode::from_u16(code).unwrap(), HeaderMap::new(), "")
}
