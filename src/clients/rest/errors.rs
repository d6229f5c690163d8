//! Error type returned by [`RestClient`](super::RestClient).
//!
//! # Error Handling
//!
//! - [`RestError::Config`]: The session file is missing, incomplete or unwritable
//! - [`RestError::Transport`]: The call failed or the server rejected it
//! - [`RestError::RetryExhausted`]: Short-period limit retries ran out
//! - [`RestError::Login`]: The login response did not contain a token
//! - [`RestError::Decode`]: A non-PDF body was not valid JSON
//!
//! Whether a terminal error reaches the caller depends on the client's
//! [`ErrorMode`](crate::ErrorMode). Errors raised while connecting are always
//! returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use plentymarkets_rest::RestError;
//!
//! match client.get("rest/items", None).await {
//!     Ok(Some(body)) => println!("Items: {:?}", body.as_json()),
//!     Ok(None) => println!("Call failed, see logs"),
//!     Err(RestError::RetryExhausted(e)) => println!("Gave up after {} attempts", e.attempts),
//!     Err(RestError::Transport(e)) => println!("Transport error: {e}"),
//!     Err(other) => println!("Error: {other}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{RetryExhaustedError, TransportError};
use crate::error::ConfigError;

/// Unified error type for client operations.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::RestError;
///
/// let error = RestError::Login { reason: "missing field `accessToken`".to_string() };
/// assert!(error.to_string().starts_with("Login failed"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The session configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport failed or the server rejected the call.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Short-period limit retries ran out.
    #[error(transparent)]
    RetryExhausted(#[from] RetryExhaustedError),

    /// The login call did not produce a usable token.
    #[error("Login failed: {reason}")]
    Login {
        /// Why the login response was rejected.
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response from '{path}': {message}")]
    Decode {
        /// The request path.
        path: String,
        /// The decoder's error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let error: RestError = ConfigError::MissingRequiredField { field: "username" }.into();
        assert!(error.to_string().contains("'username'"));
        assert!(matches!(error, RestError::Config(_)));
    }

    #[test]
    fn test_retry_exhausted_converts() {
        let error: RestError = RetryExhaustedError {
            attempts: 6,
            message: "short period write limit reached".to_string(),
        }
        .into();
        assert!(error.to_string().contains("6 attempts"));
    }

    #[test]
    fn test_decode_error_names_path() {
        let error = RestError::Decode {
            path: "rest/items".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert!(error.to_string().contains("'rest/items'"));
    }

    #[test]
    fn test_rest_error_implements_std_error() {
        let error = RestError::Login {
            reason: "x".to_string(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
