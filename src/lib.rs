//! # Plentymarkets REST Client
//!
//! An async client for the Plentymarkets REST API that manages the login
//! session and respects the API's rate limits.
//!
//! ## Overview
//!
//! This crate provides:
//! - A persisted session file via [`CredentialStore`], holding the base URL,
//!   REST credentials and the current bearer token
//! - Validated newtypes for credentials and the base URL
//! - Automatic login when the token is missing or expired
//! - Waits derived from the `X-Plenty-*` throttle headers
//! - Retries of short-period read and write limit rejections
//! - JSON decoding, with PDF documents returned as raw bytes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use plentymarkets_rest::{BaseUrl, ErrorMode, Password, RestClient, SessionConfig, Username};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), plentymarkets_rest::RestError> {
//! let seed = SessionConfig::new(
//!     BaseUrl::new("example.plentymarkets-cloud01.com")?,
//!     Username::new("rest-user")?,
//!     Password::new("secret")?,
//! );
//!
//! let mut client = RestClient::builder("plenty-session.json")
//!     .session(seed)
//!     .error_mode(ErrorMode::Propagate)
//!     .connect()
//!     .await?;
//!
//! let item = client.post("rest/items", json!({"position": 1})).await?;
//! println!("Created: {:?}", item);
//!
//! if client.throttled_on_last_request() {
//!     println!("Waited {:?} for the rate limit", client.last_call().throttle_wait);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors while connecting are always returned. For later calls, the
//! [`ErrorMode`] decides whether failures are returned as [`RestError`] or
//! logged and reported as `Ok(None)`.
//!
//! ## Design Principles
//!
//! - **No global state**: Each client owns its session and policy
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Sequential calls**: One client runs one call at a time

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{is_token_valid, AccessToken, CredentialStore, SessionConfig};
pub use config::{BaseUrl, ErrorMode, Password, ThrottlePolicy, Username};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    CallReport, HttpMethod, HttpRequest, HttpResponse, RequestBody, ResponseBody,
    RestClient, RestClientBuilder, RestError, RetryExhaustedError, Transport, TransportError,
};
