//! Error types for the wire pipeline.
//!
//! The pipeline draws a hard line between two kinds of outcome: a completed
//! exchange (any status code, even a 500) is a [`crate::WireResponse`], never
//! an error; an [`Error`] means no usable response exists. The retry decorator
//! leans on that distinction — see [`Error::is_retryable`].

use http::StatusCode;

/// The main error type for wire exchanges.
///
/// # Examples
///
/// ```no_run
/// use fluent_wire::{Error, HttpWire, Wire};
/// use std::collections::HashMap;
///
/// # async fn example() -> Result<(), Error> {
/// let wire = HttpWire::new();
///
/// match wire.send("GET", "https://api.example.com", &HashMap::new(), None).await {
///     Ok(response) => println!("status: {}", response.status()),
///     Err(Error::Timeout) => eprintln!("request timed out"),
///     Err(Error::RetriesExhausted { attempts, last }) => {
///         eprintln!("gave up after {attempts} attempts: {last}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level failure (connection refused, DNS lookup failed,
    /// protocol break). Wraps the underlying `reqwest::Error`.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The request exceeded its deadline.
    #[error("Request timed out")]
    Timeout,

    /// The request was cancelled before completing.
    ///
    /// Cancellation is retried like a timeout until attempts exhaust.
    #[error("Request was cancelled")]
    Cancelled,

    /// All retry attempts were spent on failed exchanges.
    ///
    /// Only the retry decorator produces this, and only on the exception
    /// path: a completed-but-retryable response never turns into an error,
    /// it is returned as-is once attempts run out.
    ///
    /// # Fields
    ///
    /// * `attempts` - Total attempts made, including the initial one
    /// * `last` - The failure from the final attempt
    #[error("Retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total attempts made, including the initial one.
        attempts: usize,
        /// The failure from the final attempt.
        last: Box<Error>,
    },

    /// A response did not carry the status code the caller asserted.
    ///
    /// Produced by [`crate::WireResponse::assert_status`]. The body is kept
    /// so the mismatch can be debugged without re-issuing the request.
    #[error("Expected status {expected} but got {status}: {body}")]
    UnexpectedStatus {
        /// The status code the caller expected.
        expected: u16,
        /// The status code the response actually carried.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// Failed to deserialize a response body into the requested type.
    ///
    /// Preserves the raw body alongside the serde message so production
    /// deserialization issues stay debuggable.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    Deserialization {
        /// The raw response body that failed to deserialize.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code of the response.
        status: StatusCode,
    },

    /// Failed to serialize a request body to JSON.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be constructed (bad method, bad header name or
    /// value). Raised at the transport seam where strings meet the HTTP types.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The blocking bridge could not set up a runtime to wait on.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Returns `true` if this failure is eligible for another attempt.
    ///
    /// Network failures, timeouts, and cancellations are retryable; every
    /// other variant means retrying cannot help.
    ///
    /// # Examples
    ///
    /// ```
    /// use fluent_wire::Error;
    ///
    /// assert!(Error::Timeout.is_retryable());
    /// assert!(!Error::Serialization("bad body".to_string()).is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout | Error::Cancelled)
    }

    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Deserialization { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error preserves one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::UnexpectedStatus { body, .. } => Some(body),
            Error::Deserialization { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(e)
        }
    }
}

/// A specialized `Result` type for wire exchanges.
pub type Result<T> = std::result::Result<T, Error>;
