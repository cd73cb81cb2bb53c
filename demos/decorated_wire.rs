//! Example demonstrating wire composition: retries around authorization.
//!
//! This example shows how to:
//! - Stack decorators onto the terminal transport
//! - Tune the retry budget, delay, and predicate
//! - Route a fluent request through the decorated wire
//!
//! Run with: `cargo run --example decorated_wire`

use fluent_wire::{AuthWire, Error, HttpWire, Request, RetryWire, WireResponse};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("fluent_wire=debug,decorated_wire=info")
        .init();

    // Every attempt goes out with the credential because the auth decorator
    // rebuilds its header copy per invocation.
    let wire = RetryWire::with_policy(
        AuthWire::new(HttpWire::new(), "Bearer demo-token"),
        3,
        Duration::from_millis(500),
    )
    .retry_if(|response: &WireResponse| {
        response.status().as_u16() == 429 || response.status().is_server_error()
    });

    let response = Request::get("https://httpbin.org")
        .path("bearer")
        .through(wire)
        .fetch_async()
        .await?;

    println!("Status: {}", response.status());
    println!("Body: {}", response.body());

    Ok(())
}
