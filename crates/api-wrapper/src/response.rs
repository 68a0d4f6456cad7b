//! HTTP Response representation produced by wrapped handlers

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Represents an outgoing HTTP response.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `ok(body)` | 200 | JSON document |
/// | `text(status, body)` | any | Plain text |
/// | `json(status, body)` | any | JSON document |
/// | `binary(status, data, type)` | any | File contents, images |
///
/// The hosting framework consumes it either directly or through
/// [`Response::into_parts`], which yields the `(body, status, headers)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response with the given status code (no body).
    ///
    /// # Example
    /// ```ignore
    /// Response::new(204) // 204 No Content
    /// Response::new(301).with_header("Location", "/new-path")
    /// ```
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create a 200 OK response with JSON body.
    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::json(200, body)
    }

    /// Create a JSON response with a custom status code.
    ///
    /// A body that fails to serialize yields an empty body; use
    /// [`Response::try_json`] when the failure matters.
    pub fn json<T: Serialize>(status: u16, body: T) -> Self {
        Self::try_json(status, body).unwrap_or_else(|_| Self::new(status).with_header(CONTENT_TYPE, APPLICATION_JSON))
    }

    /// Create a JSON response, reporting serialization failures.
    pub fn try_json<T: Serialize>(status: u16, body: T) -> Result<Self, serde_json::Error> {
        let encoded = serde_json::to_vec(&body)?;
        Ok(Self::binary(status, encoded, APPLICATION_JSON))
    }

    /// Create a plain text response.
    ///
    /// # Example
    /// ```ignore
    /// Response::text(200, "Hello, World!")
    /// ```
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::binary(status, body, TEXT_PLAIN)
    }

    /// Create a binary response (for files, images, etc.).
    ///
    /// # Example
    /// ```ignore
    /// Response::binary(200, pdf_bytes, "application/pdf")
    ///     .with_header("Content-Disposition", "attachment; filename=\"report.pdf\"")
    /// ```
    pub fn binary(status: u16, data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE.to_string(), content_type.into());

        Self {
            status,
            headers,
            body: data.into(),
        }
    }

    /// Add a header to the response (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Get the Content-Type header value.
    pub fn content_type(&self) -> Option<&String> {
        self.header(CONTENT_TYPE)
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Split into the `(body, status, headers)` triple hosts expect.
    pub fn into_parts(self) -> (Bytes, u16, HashMap<String, String>) {
        (self.body, self.status, self.headers)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}
