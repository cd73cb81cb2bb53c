//! The terminal wire that talks to the real network.

use crate::{Error, Result, Wire, WireResponse};
use async_trait::async_trait;
use http::Method;
use std::collections::HashMap;
use std::str::FromStr;
use url::Url;

/// The terminal wire: performs one real network exchange per `send`.
///
/// `HttpWire` does nothing but transport. It never retries, never touches
/// the caller's headers, and surfaces network failures unchanged (classified
/// as [`Error::Timeout`] or [`Error::Network`]) — failure policy belongs to
/// the decorators stacked on top of it.
///
/// The underlying `reqwest::Client` holds the connection pool, so one
/// `HttpWire` is meant to be reused (and shared) across requests.
///
/// # Examples
///
/// ```no_run
/// use fluent_wire::{HttpWire, Wire};
/// use std::collections::HashMap;
///
/// # async fn example() -> fluent_wire::Result<()> {
/// let wire = HttpWire::new();
/// let response = wire
///     .send("GET", "https://api.example.com/health", &HashMap::new(), None)
///     .await?;
/// println!("status: {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpWire {
    client: reqwest::Client,
}

impl HttpWire {
    /// Creates an `HttpWire` with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Creates an `HttpWire` over a preconfigured client.
    ///
    /// Use this to control timeouts, proxies, or TLS settings — those are
    /// the client's concern, not the wire's.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Wire for HttpWire {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        headers: &HashMap<String, String>,
        body: Option<&str>,
    ) -> Result<WireResponse> {
        let method = Method::from_str(method)
            .map_err(|e| Error::InvalidRequest(format!("Invalid method {method:?}: {e}")))?;
        let url = Url::parse(uri)?;

        tracing::debug!(method = %method, url = %url, "Executing HTTP request");

        let mut request = self.client.request(method, url);
        for (name, value) in headers {
            let name = http::HeaderName::from_str(name)
                .map_err(|e| Error::InvalidRequest(format!("Invalid header name {name:?}: {e}")))?;
            let value = http::HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidRequest(format!("Invalid header value: {e}")))?;
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(Error::from)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(Error::from)?;

        tracing::debug!(
            status = status.as_u16(),
            body_bytes = body.len(),
            "Received HTTP response"
        );

        Ok(WireResponse::new(status, headers, body))
    }
}
