//! The wire abstraction: the minimal send-one-exchange capability.
//!
//! A [`Wire`] performs exactly one logical HTTP exchange. Decorators such as
//! [`crate::AuthWire`] and [`crate::RetryWire`] implement `Wire` themselves
//! and wrap another wire, so cross-cutting behavior stacks freely: any wire
//! may wrap any other wire, in any order.
//!
//! ```text
//! caller -> RetryWire -> AuthWire -> HttpWire -> network
//! ```
//!
//! Every wire is immutable after construction and safe to share across
//! concurrent calls; the only per-call state is the header map, which callers
//! own and no wire ever mutates.

use crate::{Result, WireResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// The send-one-exchange capability.
///
/// Implementors perform (or delegate) a single HTTP exchange and return the
/// completed response, or fail when no usable response exists. A completed
/// exchange with a non-2xx status is still `Ok` — interpreting status codes
/// is the caller's business, not the wire's.
///
/// # Examples
///
/// Swapping in a custom wire for a request:
///
/// ```no_run
/// use fluent_wire::{AuthWire, HttpWire, Request};
///
/// # async fn example() -> fluent_wire::Result<()> {
/// let wire = AuthWire::new(HttpWire::new(), "Bearer secret-token");
/// let response = Request::get("https://api.example.com/users")
///     .through(wire)
///     .fetch_async()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Wire: Send + Sync {
    /// Sends one HTTP exchange and returns the completed response.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method ("GET", "POST", ...)
    /// * `uri` - The absolute request URI
    /// * `headers` - The caller's header map; never mutated by any wire
    /// * `body` - Optional request body
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse>;

    /// Blocking form of [`send`](Wire::send).
    ///
    /// Spins up a throwaway current-thread runtime and waits on the
    /// suspending form, so the two are behaviorally equivalent. Must not be
    /// called from inside an async runtime; use `send` there instead.
    fn send_blocking(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| crate::Error::Runtime(e.to_string()))?;
        runtime.block_on(self.send(method, uri, headers, body))
    }
}

#[async_trait]
impl<W: Wire + ?Sized> Wire for Box<W> {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        (**self).send(method, uri, headers, body).await
    }
}

#[async_trait]
impl<W: Wire + ?Sized> Wire for Arc<W> {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        (**self).send(method, uri, headers, body).await
    }
}

#[async_trait]
impl<'a, W: Wire + ?Sized> Wire for &'a W {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        (**self).send(method, uri, headers, body).await
    }
}
