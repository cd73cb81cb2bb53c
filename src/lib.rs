//! # fluent-wire - A fluent HTTP client over a composable wire pipeline
//!
//! fluent-wire separates *what* a request is (the fluent [`Request`] builder)
//! from *how* it is sent (the [`Wire`] capability). A wire performs one HTTP
//! exchange; decorators wrap any wire to layer on cross-cutting behavior —
//! credential injection with [`AuthWire`], bounded retries with [`RetryWire`]
//! — and the terminal [`HttpWire`] talks to the real network via `reqwest`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fluent_wire::{AuthWire, HttpWire, Request, RetryWire};
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fluent_wire::Error> {
//!     // Stack decorators onto the transport: retries around auth.
//!     let wire = RetryWire::with_policy(
//!         AuthWire::new(HttpWire::new(), "Bearer secret-token"),
//!         3,
//!         Duration::from_secs(1),
//!     );
//!
//!     let user: User = Request::get("https://api.example.com")
//!         .path("users")
//!         .path("123")
//!         .through(wire)
//!         .fetch_async()
//!         .await?
//!         .assert_status(200)?
//!         .json()?;
//!
//!     println!("User: {}", user.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Composable wires** - any wire wraps any wire; nest retries around
//!   auth, auth around retries, even retries around retries
//! - **Bounded, predictable retries** - fixed delay, explicit attempt budget,
//!   and a replaceable response predicate (429/5xx by default)
//! - **Header isolation** - decorators operate on per-call copies; a caller's
//!   header map is never mutated
//! - **Responses, not exceptions** - a completed exchange is always a
//!   [`WireResponse`], whatever its status; errors mean no response exists
//! - **Blocking and async forms** - every wire exposes `send` and
//!   `send_blocking`, every request `fetch_async` and `fetch`
//! - **Structured logging** - attempt-by-attempt visibility via `tracing`
//!
//! ## Retry semantics
//!
//! [`RetryWire`] makes at most `max_attempts + 1` attempts. When attempts run
//! out on a *response* the last response is returned for the caller to judge;
//! when they run out on a *failure* (network error, timeout, cancellation)
//! the call fails with [`Error::RetriesExhausted`] carrying the final cause:
//!
//! ```no_run
//! use fluent_wire::{Error, HttpWire, RetryWire, Wire, WireResponse};
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Error> {
//! let wire = RetryWire::with_policy(HttpWire::new(), 2, Duration::from_millis(500))
//!     .retry_if(|r: &WireResponse| r.status().as_u16() == 503);
//!
//! match wire.send("GET", "https://api.example.com/poll", &HashMap::new(), None).await {
//!     Ok(response) => println!("final status: {}", response.status()),
//!     Err(Error::RetriesExhausted { attempts, last }) => {
//!         eprintln!("no response after {attempts} attempts: {last}");
//!     }
//!     Err(e) => eprintln!("unretryable: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod error;
pub mod headers;
mod request;
mod response;
pub mod retry;
mod transport;
mod wire;

pub use auth::AuthWire;
pub use error::{Error, Result};
pub use request::Request;
pub use response::{JsonResponse, WireResponse};
pub use retry::{RetryPredicate, RetryWire};
pub use transport::HttpWire;
pub use wire::Wire;
