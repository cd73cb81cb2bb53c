//! The completed-exchange type produced by a transport.
//!
//! A [`WireResponse`] is a whole, in-memory snapshot of one HTTP exchange:
//! status, headers, and the body as a string. Decorators inspect the status
//! on the way back but never rewrite the body or headers.

use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// A completed HTTP exchange.
///
/// Constructed by the terminal wire and handed back unchanged through every
/// decorator. Any status code is representable; a 500 here is a response,
/// not an error.
///
/// # Examples
///
/// ```no_run
/// use fluent_wire::Request;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User { name: String }
///
/// # async fn example() -> fluent_wire::Result<()> {
/// let response = Request::get("https://api.example.com/users/123")
///     .fetch_async()
///     .await?;
///
/// let user: User = response.assert_status(200)?.json()?;
/// println!("user: {}", user.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WireResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl WireResponse {
    /// Creates a new `WireResponse`.
    ///
    /// Typically called by a terminal wire after reading the whole body; also
    /// handy for building canned responses in tests.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// The HTTP status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The raw response body as a string.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Looks up a response header by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_wire::WireResponse;
    /// use http::{HeaderMap, HeaderValue, StatusCode};
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    /// let response = WireResponse::new(StatusCode::OK, headers, "{}");
    ///
    /// assert_eq!(response.header("content-type"), Some("application/json"));
    /// assert_eq!(response.header("etag"), None);
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Asserts that the response carries the expected status code.
    ///
    /// Returns `self` for chaining, or [`Error::UnexpectedStatus`] carrying
    /// the actual status and body.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_wire::WireResponse;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let response = WireResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), "missing");
    /// assert!(response.assert_status(200).is_err());
    /// assert!(response.assert_status(404).is_ok());
    /// ```
    pub fn assert_status(&self, expected: u16) -> Result<&Self> {
        if self.status.as_u16() != expected {
            return Err(Error::UnexpectedStatus {
                expected,
                status: self.status,
                body: self.body.clone(),
            });
        }
        Ok(self)
    }

    /// Deserializes the body into the requested type.
    ///
    /// The typed counterpart to dynamic response conversion: the caller names
    /// the shape, serde does the work, and failures keep the raw body for
    /// debugging.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::Deserialization {
            raw_response: self.body.clone(),
            serde_error: e.to_string(),
            status: self.status,
        })
    }

    /// Converts this response into a [`JsonResponse`] for tree navigation.
    pub fn into_json(self) -> Result<JsonResponse> {
        let value = serde_json::from_str(&self.body).map_err(|e| Error::Deserialization {
            raw_response: self.body.clone(),
            serde_error: e.to_string(),
            status: self.status,
        })?;
        Ok(JsonResponse {
            response: self,
            value,
        })
    }
}

/// A response whose body has been parsed as JSON.
///
/// Wraps the original [`WireResponse`] together with the parsed tree, so both
/// the raw exchange and structured navigation stay available.
///
/// # Examples
///
/// ```
/// use fluent_wire::WireResponse;
/// use http::{HeaderMap, StatusCode};
///
/// let response = WireResponse::new(
///     StatusCode::OK,
///     HeaderMap::new(),
///     r#"{"user": {"name": "alice"}}"#,
/// );
/// let json = response.into_json().unwrap();
///
/// assert_eq!(json.pointer("/user/name").and_then(|v| v.as_str()), Some("alice"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonResponse {
    response: WireResponse,
    value: serde_json::Value,
}

impl JsonResponse {
    /// The parsed JSON body.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Navigates the body by JSON pointer (`/a/b/0`).
    pub fn pointer(&self, pointer: &str) -> Option<&serde_json::Value> {
        self.value.pointer(pointer)
    }

    /// The underlying response.
    pub fn response(&self) -> &WireResponse {
        &self.response
    }
}
