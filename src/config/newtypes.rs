//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Plentymarkets REST username.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::Username;
///
/// let user = Username::new("rest-user").unwrap();
/// assert_eq!(user.as_ref(), "rest-user");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn new(username: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated password for the REST user.
///
/// The `Debug` implementation masks the value so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// Forces the `https://` scheme and exactly one trailing slash.
///
/// A leading `http://` (any case) is replaced, a missing scheme is added, and
/// trailing slashes collapse into one. Applying it twice yields the same string.
///
/// ```rust
/// use plentymarkets_rest::config::normalize_url;
///
/// assert_eq!(normalize_url("http://shop.example.com//"), "https://shop.example.com/");
/// assert_eq!(normalize_url("shop.example.com"), "https://shop.example.com/");
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let rest = strip_scheme(url, "https://")
        .or_else(|| strip_scheme(url, "http://"))
        .unwrap_or(url);

    format!("https://{}/", rest.trim_end_matches('/'))
}

fn strip_scheme<'a>(url: &'a str, scheme: &str) -> Option<&'a str> {
    url.get(..scheme.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
        .map(|_| &url[scheme.len()..])
}

/// The normalized base URL of a Plentymarkets system.
///
/// Always starts with `https://` and ends with exactly one `/`, so request
/// paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::BaseUrl;
///
/// let url = BaseUrl::new("http://example.plentymarkets-cloud01.com").unwrap();
/// assert_eq!(url.as_ref(), "https://example.plentymarkets-cloud01.com/");
/// assert_eq!(url.join("/rest/items"), "https://example.plentymarkets-cloud01.com/rest/items");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new normalized base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if no host remains after
    /// stripping the scheme, or if the host contains whitespace.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let normalized = normalize_url(&url);

        let host = &normalized["https://".len()..normalized.len() - 1];
        if host.is_empty() || host.starts_with('/') || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(normalized))
    }

    /// Appends a request path, dropping its leading slashes.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_empty_string() {
        assert!(matches!(Username::new(""), Err(ConfigError::EmptyUsername)));
    }

    #[test]
    fn test_password_rejects_empty_string() {
        assert!(matches!(Password::new(""), Err(ConfigError::EmptyPassword)));
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("super-secret").unwrap();
        let debug_output = format!("{password:?}");
        assert_eq!(debug_output, "Password(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_normalize_url_forces_https_and_single_trailing_slash() {
        let inputs = [
            "http://shop.example.com",
            "http://shop.example.com/",
            "https://shop.example.com",
            "https://shop.example.com///",
            "HTTP://shop.example.com/",
            "HTTPS://shop.example.com",
            "shop.example.com",
            "  shop.example.com/  ",
        ];

        for input in inputs {
            assert_eq!(
                normalize_url(input),
                "https://shop.example.com/",
                "unexpected normalization for {input:?}"
            );
        }
    }

    #[test]
    fn test_normalize_url_is_idempotent() {
        for input in [
            "http://a.example.com/rest",
            "https://a.example.com/rest//",
            "a.example.com",
            "HtTp://a.example.com",
        ] {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once);
        }
    }

    #[test]
    fn test_normalize_url_keeps_path_segments() {
        assert_eq!(
            normalize_url("http://a.example.com/plenty/"),
            "https://a.example.com/plenty/"
        );
    }

    #[test]
    fn test_base_url_rejects_missing_host() {
        assert!(BaseUrl::new("").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("http:///").is_err());
        assert!(BaseUrl::new("https://bad host").is_err());
    }

    #[test]
    fn test_base_url_join_trims_leading_slashes() {
        let url = BaseUrl::new("https://a.example.com").unwrap();
        assert_eq!(url.join("rest/login"), "https://a.example.com/rest/login");
        assert_eq!(url.join("//rest/login"), "https://a.example.com/rest/login");
    }
}
