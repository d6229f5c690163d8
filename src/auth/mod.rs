//! Credential handling for the Plentymarkets REST API.
//!
//! # Overview
//!
//! - [`SessionConfig`]: Credentials, base URL and the current bearer token
//! - [`AccessToken`]: A bearer token together with its expiry
//! - [`CredentialStore`]: Loads and saves a [`SessionConfig`] as a JSON file
//! - [`is_token_valid`]: Whether a session's token is usable at a given instant
//!
//! # Token Lifecycle
//!
//! Plentymarkets issues bearer tokens through `POST rest/login` with the REST
//! user's username and password. The token is stored with its absolute expiry
//! and persisted after every login, so a restarted process reuses a
//! still-valid token instead of logging in again.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use plentymarkets_rest::auth::{is_token_valid, AccessToken, SessionConfig};
//! use plentymarkets_rest::{BaseUrl, Password, Username};
//!
//! let now = Utc::now();
//! let session = SessionConfig::new(
//!     BaseUrl::new("https://example.plentymarkets-cloud01.com").unwrap(),
//!     Username::new("rest-user").unwrap(),
//!     Password::new("secret").unwrap(),
//! )
//! .with_access_token(AccessToken::issued("token", now, 3600).unwrap());
//!
//! assert!(is_token_valid(&session, now));
//! assert!(!is_token_valid(&session, now + Duration::hours(1)));
//! ```

pub mod session;
mod store;

pub use session::{
    is_token_valid, AccessToken, LoginResponse, SessionConfig, TokenLifetimeError,
};
pub use store::{CredentialStore, SESSION_FILE_VERSION};

/// Path of the login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "rest/login";
