//! HTTP layer for Plentymarkets API communication.
//!
//! # Overview
//!
//! - [`Transport`]: Sends a resolved [`HttpRequest`] and returns an [`HttpResponse`]
//! - [`ReqwestTransport`]: The default transport
//! - [`ResponseBody`]: A decoded body, either JSON or raw PDF bytes
//! - [`throttle`]: Rate-limit header interpretation
//! - [`rest::RestClient`]: The authenticated, rate-limited client
//!
//! # Example
//!
//! ```rust,ignore
//! use plentymarkets_rest::clients::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
//!
//! let transport = ReqwestTransport::new()?;
//! let url = "https://example.plentymarkets-cloud01.com/rest/items";
//! let request = HttpRequest::new(HttpMethod::Get, url).header("Authorization", "Bearer token");
//! let response = transport.send(&request).await?;
//! ```

mod errors;
mod http_request;
mod http_response;
pub mod rest;
pub mod throttle;
mod transport;

pub use errors::{RetryExhaustedError, TransportError};
pub use http_request::{HttpMethod, HttpRequest, RequestBody};
pub use http_response::{HttpResponse, ResponseBody, PDF_CONTENT_TYPE};
pub use transport::{ReqwestTransport, Transport, TransportFuture};

pub use throttle::{
    plan_throttle_waits, ShortPeriodLimit, ThrottleScope, ThrottleSignal, ThrottleWait,
};

// Re-export REST client types at the clients module level
pub use rest::{CallReport, RestClient, RestClientBuilder, RestError, SDK_VERSION};
