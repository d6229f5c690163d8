//! Error types for transport and request execution.
//!
//! # Error Handling
//!
//! - [`TransportError`]: The transport could not complete the request, or the
//!   server answered with a non-2xx status
//! - [`RetryExhaustedError`]: Short-period limit retries ran out
//!
//! Both are wrapped by [`RestError`](crate::clients::rest::RestError).

use thiserror::Error;

use crate::clients::HttpMethod;

/// Error raised by a [`Transport`](crate::clients::Transport).
///
/// The `Display` output of a [`Status`](Self::Status) error includes the
/// response body, which is where Plentymarkets reports short-period limits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Network, TLS or protocol failure before a response was received.
    #[error("Network error: {message}")]
    Network {
        /// The underlying error message.
        message: String,
    },

    /// The server answered with a non-2xx status code.
    #[error("{method} {url} resulted in a {code} response: {message}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The request method.
        method: HttpMethod,
        /// The request URL.
        url: String,
        /// The response body.
        message: String,
    },
}

impl TransportError {
    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Status { code, .. } => Some(*code),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }
}

/// Error returned when short-period limit retries have been exhausted.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::clients::RetryExhaustedError;
///
/// let error = RetryExhaustedError {
///     attempts: 6,
///     message: "short period read limit reached".to_string(),
/// };
///
/// assert!(error.to_string().contains("6 attempts"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Exceeded maximum retry count after {attempts} attempts. Last message: {message}")]
pub struct RetryExhaustedError {
    /// How many times the request was sent.
    pub attempts: u32,
    /// Message of the last failure.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_includes_body() {
        let error = TransportError::Status {
            code: 429,
            method: HttpMethod::Get,
            url: "https://a.example.com/rest/items".to_string(),
            message: r#"{"error":"short period read limit reached"}"#.to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("GET https://a.example.com/rest/items"));
        assert!(message.contains("429"));
        assert!(message.contains("short period read limit reached"));
        assert_eq!(error.status(), Some(429));
    }

    #[test]
    fn test_network_error_has_no_status() {
        let error = TransportError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.status(), None);
        assert_eq!(error.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &RetryExhaustedError {
            attempts: 1,
            message: String::new(),
        };
        let _: &dyn std::error::Error = &TransportError::Network {
            message: "x".to_string(),
        };
    }
}
