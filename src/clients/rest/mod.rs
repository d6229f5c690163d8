//! REST API client for Plentymarkets.
//!
//! # Overview
//!
//! - [`RestClient`]: Sends `get()`, `post()`, `put()`, `patch()` and `delete()` calls
//! - [`RestClientBuilder`]: Loads the session and performs the initial login
//! - [`CallReport`]: Waits and retries of the last call
//! - [`RestError`]: Error type for client operations
//!
//! # Path Normalization
//!
//! Paths are relative to the system's base URL. Leading slashes are stripped:
//! `/rest/items` and `rest/items` address the same endpoint.
//!
//! # Retry Behavior
//!
//! Rejections reporting a short-period read limit are retried after 5 time
//! units, write limits after 10. Any other failure ends the call.

mod client;
mod errors;

pub use client::{CallReport, RestClient, RestClientBuilder, SDK_VERSION};
pub use errors::RestError;
