//! Error types for client configuration and the persisted session file.
//!
//! Configuration errors are fatal: they are always surfaced to the caller when
//! a [`RestClient`](crate::RestClient) is constructed and are never retried.
//!
//! # Example
//!
//! ```rust
//! use plentymarkets_rest::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur while loading, validating or saving the session
/// configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The session file does not exist and no seed configuration was supplied.
    #[error("Config file '{path}' does not exist. Supply initial credentials to create it.")]
    MissingConfigFile {
        /// The path that was looked up.
        path: String,
    },

    /// A required field is absent from the stored configuration.
    #[error("Missing required field: '{field}'. The session file must contain username, password and base_url.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide a valid Plentymarkets REST user.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the REST user's password.")]
    EmptyPassword,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected something like 'https://example.plentymarkets-cloud01.com'.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The session file was written by a newer, unknown format version.
    #[error("Unsupported session file version {version}. This client understands version {supported}.")]
    UnsupportedVersion {
        /// The version found in the file.
        version: u32,
        /// The newest version this crate can read.
        supported: u32,
    },

    /// Reading or writing the session file failed.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// The file that was accessed.
        path: String,
        /// The underlying error message.
        message: String,
    },

    /// The session file could not be encoded or decoded.
    #[error("Malformed session file '{path}': {message}")]
    Serialization {
        /// The file that was accessed.
        path: String,
        /// The underlying error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_error_message() {
        let error = ConfigError::MissingConfigFile {
            path: "/tmp/plenty.json".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/tmp/plenty.json"));
        assert!(message.contains("does not exist"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "password" };
        let message = error.to_string();
        assert!(message.contains("'password'"));
        assert!(message.contains("base_url"));
    }

    #[test]
    fn test_unsupported_version_error_message() {
        let error = ConfigError::UnsupportedVersion {
            version: 7,
            supported: 1,
        };
        assert!(error.to_string().contains("version 7"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyPassword;
        let _: &dyn std::error::Error = &error;
    }
}
