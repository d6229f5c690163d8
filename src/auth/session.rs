//! Session state used to authenticate REST calls.
//!
//! This module provides the [`SessionConfig`] type, which holds the
//! credentials of the REST user together with the bearer token obtained from
//! the last login.

use crate::config::{BaseUrl, Password, Username};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;

/// A token lifetime whose expiry cannot be represented.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Token lifetime of {expires_in} seconds is out of range")]
pub struct TokenLifetimeError {
    /// The lifetime reported by the server.
    pub expires_in: i64,
}

/// A bearer token and the instant it stops being accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token value.
    pub token: String,
    /// When this token expires.
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token that expires `expires_in_secs` after `issued_at`.
    ///
    /// Negative lifetimes are clamped to zero so the expiry never precedes
    /// the issue time.
    ///
    /// # Errors
    ///
    /// Returns [`TokenLifetimeError`] if the expiry falls outside the range
    /// of [`DateTime<Utc>`].
    pub fn issued(
        token: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_in_secs: i64,
    ) -> Result<Self, TokenLifetimeError> {
        let expires_at = Duration::try_seconds(expires_in_secs.max(0))
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or(TokenLifetimeError {
                expires_in: expires_in_secs,
            })?;

        Ok(Self {
            token: token.into(),
            expires_at,
        })
    }
}

/// The body returned by `POST rest/login`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The new bearer token.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Persisted credentials and session state for one Plentymarkets system.
///
/// Username, password and base URL are always present. The access token is
/// only set after a successful login, and always carries its expiry.
///
/// # Example
///
/// ```rust
/// use plentymarkets_rest::{BaseUrl, Password, SessionConfig, Username};
///
/// let session = SessionConfig::new(
///     BaseUrl::new("example.plentymarkets-cloud01.com").unwrap(),
///     Username::new("rest-user").unwrap(),
///     Password::new("secret").unwrap(),
/// );
///
/// assert!(!session.has_valid_token());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// The normalized base URL of the system.
    pub base_url: BaseUrl,
    /// The REST user.
    pub username: Username,
    /// The REST user's password.
    pub password: Password,
    /// The token from the last login, if any.
    pub access_token: Option<AccessToken>,
}

impl SessionConfig {
    /// Creates an unauthenticated session configuration.
    #[must_use]
    pub const fn new(base_url: BaseUrl, username: Username, password: Password) -> Self {
        Self {
            base_url,
            username,
            password,
            access_token: None,
        }
    }

    /// Attaches an existing token, e.g. one obtained out of band.
    #[must_use]
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Returns the expiry of the current token, if one is set.
    #[must_use]
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.access_token.as_ref().map(|t| t.expires_at)
    }

    /// Returns `true` if the current token is still valid right now.
    #[must_use]
    pub fn has_valid_token(&self) -> bool {
        is_token_valid(self, Utc::now())
    }

    /// Stores the token from a login response issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenLifetimeError`] if `expiresIn` is out of range. The
    /// previous token is kept in that case.
    pub fn apply_login(
        &mut self,
        response: &LoginResponse,
        now: DateTime<Utc>,
    ) -> Result<(), TokenLifetimeError> {
        let token = AccessToken::issued(response.access_token.clone(), now, response.expires_in)?;
        self.access_token = Some(token);
        Ok(())
    }
}

/// Returns `true` if `config` holds a token that is still valid at `now`.
///
/// A missing expiry is never valid, and an expiry equal to `now` counts as
/// expired.
#[must_use]
pub fn is_token_valid(config: &SessionConfig, now: DateTime<Utc>) -> bool {
    config.token_expiry().is_some_and(|expiry| now < expiry)
}

// Verify SessionConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionConfig>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionConfig {
        SessionConfig::new(
            BaseUrl::new("https://shop.example.com").unwrap(),
            Username::new("user").unwrap(),
            Password::new("pass").unwrap(),
        )
    }

    #[test]
    fn test_token_invalid_without_expiry() {
        assert!(!is_token_valid(&session(), Utc::now()));
    }

    #[test]
    fn test_token_invalid_when_expiry_equals_now() {
        let now = Utc::now();
        let config = session().with_access_token(AccessToken {
            token: "abc".to_string(),
            expires_at: now,
        });
        assert!(!is_token_valid(&config, now));
    }

    #[test]
    fn test_token_valid_when_expiry_is_after_now() {
        let now = Utc::now();
        let config = session().with_access_token(AccessToken {
            token: "abc".to_string(),
            expires_at: now + Duration::milliseconds(1),
        });
        assert!(is_token_valid(&config, now));
        assert!(!is_token_valid(&config, now + Duration::seconds(1)));
    }

    #[test]
    fn test_apply_login_sets_expiry_from_expires_in() {
        let now = Utc::now();
        let mut config = session();
        config
            .apply_login(
                &LoginResponse {
                    access_token: "token-1".to_string(),
                    expires_in: 3600,
                },
                now,
            )
            .unwrap();

        let token = config.access_token.unwrap();
        assert_eq!(token.token, "token-1");
        assert_eq!(token.expires_at, now + Duration::seconds(3600));
    }

    #[test]
    fn test_negative_lifetime_is_clamped() {
        let now = Utc::now();
        let token = AccessToken::issued("t", now, -30).unwrap();
        assert_eq!(token.expires_at, now);
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let now = Utc::now();
        assert_eq!(
            AccessToken::issued("t", now, i64::MAX),
            Err(TokenLifetimeError { expires_in: i64::MAX })
        );
        // Representable as a duration, but past the last supported date.
        assert!(AccessToken::issued("t", DateTime::<Utc>::MAX_UTC, 1).is_err());
    }

    #[test]
    fn test_failed_login_keeps_previous_token() {
        let now = Utc::now();
        let previous = AccessToken::issued("old", now, 60).unwrap();
        let mut config = session().with_access_token(previous.clone());

        let result = config.apply_login(
            &LoginResponse {
                access_token: "new".to_string(),
                expires_in: i64::MAX,
            },
            now,
        );

        assert!(result.is_err());
        assert_eq!(config.access_token, Some(previous));
    }

    #[test]
    fn test_login_response_deserializes_camel_case() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"abc","expiresIn":86400,"tokenType":"Bearer"}"#)
                .unwrap();
        assert_eq!(response.access_token, "abc");
        assert_eq!(response.expires_in, 86400);
    }
}
