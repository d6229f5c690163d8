//! HTTP response types and body decoding.

use std::collections::HashMap;

/// Media type of PDF documents (delivery notes, invoices) returned as raw bytes.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A raw HTTP response as returned by a [`Transport`](crate::clients::Transport).
///
/// Header names are stored lower-cased; a header may carry several values.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use plentymarkets_rest::clients::HttpResponse;
///
/// let mut headers = HashMap::new();
/// headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
///
/// let response = HttpResponse::new(200, headers, br#"{"page":1}"#.to_vec());
/// assert_eq!(response.header("Content-Type"), Some("application/json"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-case name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response, lower-casing all header names.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }

        Self {
            code,
            headers: normalized,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the response carries a PDF document.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.header("content-type").is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        })
    }

    /// Decodes the body: PDF responses keep their bytes, everything else is
    /// parsed as JSON. An empty body decodes to JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns the JSON parse error if a non-PDF body is not valid JSON.
    pub fn into_body(self) -> Result<ResponseBody, serde_json::Error> {
        if self.is_pdf() {
            return Ok(ResponseBody::Pdf(self.body));
        }

        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResponseBody::Json(serde_json::Value::Null));
        }

        serde_json::from_slice(&self.body).map(ResponseBody::Json)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// A parsed JSON document.
    Json(serde_json::Value),
    /// Raw bytes of a PDF document.
    Pdf(Vec<u8>),
}

impl ResponseBody {
    /// Returns the JSON document, if this is not a PDF.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Pdf(_) => None,
        }
    }

    /// Consumes the body and returns the JSON document, if this is not a PDF.
    #[must_use]
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Pdf(_) => None,
        }
    }

    /// Returns the PDF bytes, if this is a PDF.
    #[must_use]
    pub fn as_pdf(&self) -> Option<&[u8]> {
        match self {
            Self::Pdf(bytes) => Some(bytes),
            Self::Json(_) => None,
        }
    }
}
