//! Fluent request builder over the wire pipeline.

use crate::{
    headers::{media_type::APPLICATION_JSON, CONTENT_TYPE},
    Error, HttpWire, Result, Wire, WireResponse,
};
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// A fluent, owned HTTP request builder.
///
/// `Request` accumulates method, URI parts, headers, and body by value —
/// every chainer consumes and returns the builder, so there is no shared
/// mutable state to leak between requests. Nothing touches the network
/// until [`fetch_async`](Request::fetch_async) or [`fetch`](Request::fetch).
///
/// Requests go out through an [`HttpWire`] by default;
/// [`through`](Request::through) swaps in any other wire, which is how
/// decorators attach to the fluent surface.
///
/// # Examples
///
/// ```no_run
/// use fluent_wire::{AuthWire, HttpWire, Request, RetryWire};
/// use serde::Deserialize;
/// use std::time::Duration;
///
/// #[derive(Deserialize)]
/// struct Ticket { id: u64 }
///
/// # async fn example() -> fluent_wire::Result<()> {
/// let wire = RetryWire::with_policy(
///     AuthWire::new(HttpWire::new(), "Bearer secret-token"),
///     3,
///     Duration::from_millis(250),
/// );
///
/// let ticket: Ticket = Request::get("https://api.example.com")
///     .path("tickets")
///     .path("42")
///     .query("expand", "comments")
///     .through(wire)
///     .fetch_async()
///     .await?
///     .assert_status(200)?
///     .json()?;
/// # Ok(())
/// # }
/// ```
pub struct Request {
    method: String,
    base_uri: String,
    path_segments: Vec<String>,
    query_params: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<String>,
    wire: Box<dyn Wire>,
}

impl Request {
    /// Creates a request with an explicit method.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            base_uri: uri.into(),
            path_segments: Vec::new(),
            query_params: Vec::new(),
            headers: HashMap::new(),
            body: None,
            wire: Box::new(HttpWire::new()),
        }
    }

    /// Creates a GET request.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new("GET", uri)
    }

    /// Creates a POST request.
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new("POST", uri)
    }

    /// Creates a PUT request.
    pub fn put(uri: impl Into<String>) -> Self {
        Self::new("PUT", uri)
    }

    /// Creates a DELETE request.
    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new("DELETE", uri)
    }

    /// Creates a PATCH request.
    pub fn patch(uri: impl Into<String>) -> Self {
        Self::new("PATCH", uri)
    }

    /// Overrides the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Adds or replaces a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends a path segment to the URI.
    pub fn path(mut self, segment: impl Into<String>) -> Self {
        self.path_segments.push(segment.into());
        self
    }

    /// Appends a query parameter to the URI.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` to JSON as the request body and sets
    /// `Content-Type: application/json`.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self> {
        let body =
            serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?;
        self.headers
            .insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        self.body = Some(body);
        Ok(self)
    }

    /// Routes this request through the given wire instead of the default
    /// [`HttpWire`].
    pub fn through(mut self, wire: impl Wire + 'static) -> Self {
        self.wire = Box::new(wire);
        self
    }

    /// Builds the final URI from the base, path segments, and query params.
    fn build_uri(&self) -> Result<String> {
        let mut url = Url::parse(&self.base_uri)?;
        if !self.path_segments.is_empty() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidRequest(format!("URI cannot be a base: {}", self.base_uri)))?;
            // Drop a trailing empty segment so "http://host/" + "users"
            // yields "/users", not "//users".
            segments.pop_if_empty();
            for segment in &self.path_segments {
                segments.push(segment);
            }
        }
        for (name, value) in &self.query_params {
            url.query_pairs_mut().append_pair(name, value);
        }
        Ok(url.into())
    }

    /// Sends the request and returns the completed response.
    pub async fn fetch_async(self) -> Result<WireResponse> {
        let uri = self.build_uri()?;
        self.wire
            .send(&self.method, &uri, &self.headers, self.body.as_deref())
            .await
    }

    /// Blocking form of [`fetch_async`](Request::fetch_async).
    ///
    /// Must not be called from inside an async runtime.
    pub fn fetch(self) -> Result<WireResponse> {
        let uri = self.build_uri()?;
        self.wire
            .send_blocking(&self.method, &uri, &self.headers, self.body.as_deref())
    }
}
