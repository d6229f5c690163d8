//! The HTTP transport used by [`RestClient`](crate::RestClient).
//!
//! [`Transport`] is the client's only dependency on an HTTP stack.
//! [`ReqwestTransport`] is the default implementation; tests and callers with
//! special needs (proxies, recording, replay) can supply their own.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// Sends fully resolved requests.
///
/// Implementations must return [`TransportError::Status`] for non-2xx
/// responses, with the response body as message, so rate-limit rejections can
/// be recognized by the executor.
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw response.
    fn send<'a>(&'a self, request: &'a HttpRequest) -> TransportFuture<'a>;
}

/// [`Transport`] backed by a [`reqwest::Client`] using rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh rustls-backed client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    const fn reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Parses response headers into a map keyed by lower-case name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    fn send<'a>(&'a self, request: &'a HttpRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(Self::reqwest_method(request.method), &request.url);

            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }

            if let Some(query) = &request.query {
                builder = builder.query(query);
            }

            builder = match &request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(value),
                RequestBody::Form(fields) => builder.form(fields),
            };

            let res = builder.send().await?;

            let code = res.status().as_u16();
            let headers = Self::parse_response_headers(res.headers());
            let body = res.bytes().await?.to_vec();
            let response = HttpResponse::new(code, headers, body);

            if !response.is_ok() {
                return Err(TransportError::Status {
                    code,
                    method: request.method,
                    url: request.url.clone(),
                    message: response.text(),
                });
            }

            Ok(response)
        })
    }
}
