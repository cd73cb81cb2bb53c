//! Authorization-injecting wire decorator.

use crate::{headers::AUTHORIZATION, Result, Wire, WireResponse};
use async_trait::async_trait;
use std::collections::HashMap;

/// A wire decorator that injects a fixed `Authorization` header.
///
/// The credential is the complete header value (`"Bearer abc123"`,
/// `"Basic dXNlcjpwYXNz"`, ...); the decorator is scheme-agnostic and emits
/// exactly the string it was given.
///
/// Header isolation contract: the caller's header map is never mutated. On
/// every `send` the decorator clones the map, sets `Authorization` in the
/// clone (overriding any caller-set value), and delegates the clone. Because
/// the clone is rebuilt per invocation, the header is present on every
/// attempt even when this decorator sits inside a [`crate::RetryWire`].
///
/// # Examples
///
/// ```no_run
/// use fluent_wire::{AuthWire, HttpWire, Wire};
/// use std::collections::HashMap;
///
/// # async fn example() -> fluent_wire::Result<()> {
/// let wire = AuthWire::new(HttpWire::new(), "Bearer secret-token");
/// let response = wire
///     .send("GET", "https://api.example.com/me", &HashMap::new(), None)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthWire<W> {
    inner: W,
    credential: String,
}

impl<W: Wire> AuthWire<W> {
    /// Creates an `AuthWire` around `inner` with the given credential.
    pub fn new(inner: W, credential: impl Into<String>) -> Self {
        Self {
            inner,
            credential: credential.into(),
        }
    }
}

#[async_trait]
impl<W: Wire> Wire for AuthWire<W> {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        // Fresh copy per invocation; the caller's map stays untouched.
        let mut authorized = headers.clone();
        authorized.insert(AUTHORIZATION.to_string(), self.credential.clone());
        self.inner.send(method, uri, &authorized, body).await
    }
}
