//! HTTP request types handed to a [`Transport`](crate::clients::Transport).

use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the Plentymarkets REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The body of an outgoing request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document (`application/json`).
    Json(serde_json::Value),
    /// URL-encoded form fields (`application/x-www-form-urlencoded`).
    Form(Vec<(String, String)>),
}

/// A fully resolved request: absolute URL, headers, query and body.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::clients::{HttpMethod, HttpRequest, RequestBody};
/// use serde_json::json;
///
/// let request = HttpRequest::new(HttpMethod::Post, "https://shop.example.com/rest/items")
///     .header("Authorization", "Bearer abc")
///     .body(RequestBody::Json(json!({"position": 1})));
///
/// assert_eq!(request.headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute URL.
    pub url: String,
    /// Headers to send.
    pub headers: HashMap<String, String>,
    /// Query parameters to append to the URL.
    pub query: Option<HashMap<String, String>>,
    /// The request body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Creates a request with no headers, query or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query: None,
            body: RequestBody::Empty,
        }
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}
