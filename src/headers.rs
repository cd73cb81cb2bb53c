//! Standard header names and media types.
//!
//! Only [`AUTHORIZATION`] is semantically special to the pipeline (it is the
//! header [`crate::AuthWire`] injects); the rest are conveniences for callers
//! building requests.

/// `Accept` header name.
pub const ACCEPT: &str = "Accept";
/// `Accept-Encoding` header name.
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// `Cache-Control` header name.
pub const CACHE_CONTROL: &str = "Cache-Control";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `ETag` header name.
pub const ETAG: &str = "ETag";
/// `If-None-Match` header name.
pub const IF_NONE_MATCH: &str = "If-None-Match";
/// `Location` header name.
pub const LOCATION: &str = "Location";
/// `User-Agent` header name.
pub const USER_AGENT: &str = "User-Agent";

/// Common media types for request and response bodies.
pub mod media_type {
    /// JSON media type.
    pub const APPLICATION_JSON: &str = "application/json";
    /// XML media type.
    pub const APPLICATION_XML: &str = "application/xml";
    /// Plain text media type.
    pub const TEXT_PLAIN: &str = "text/plain";
}
