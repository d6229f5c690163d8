//! File persistence for [`SessionConfig`].
//!
//! The session is stored as a versioned JSON record:
//!
//! ```json
//! {
//!   "version": 1,
//!   "base_url": "https://example.plentymarkets-cloud01.com/",
//!   "username": "rest-user",
//!   "password": "secret",
//!   "access_token": "eyJ...",
//!   "token_expiry": "2026-10-19T08:00:00Z"
//! }
//! ```
//!
//! # Concurrency
//!
//! The file is not locked. One process (and one client) per file is assumed;
//! concurrent writers sharing a file can overwrite each other's tokens.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::session::{AccessToken, SessionConfig};
use crate::config::{BaseUrl, Password, Username};
use crate::error::ConfigError;

/// Newest session file format this crate reads and the one it writes.
pub const SESSION_FILE_VERSION: u32 = 1;

/// On-disk shape of the session file. Every field is optional so missing
/// values can be reported by name instead of as a parse failure.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_expiry: Option<DateTime<Utc>>,
}

impl From<&SessionConfig> for StoredSession {
    fn from(config: &SessionConfig) -> Self {
        Self {
            version: SESSION_FILE_VERSION,
            base_url: Some(config.base_url.as_ref().to_string()),
            username: Some(config.username.as_ref().to_string()),
            password: Some(config.password.as_ref().to_string()),
            access_token: config.access_token.as_ref().map(|t| t.token.clone()),
            token_expiry: config.token_expiry(),
        }
    }
}

impl StoredSession {
    fn into_config(self) -> Result<SessionConfig, ConfigError> {
        if self.version > SESSION_FILE_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                version: self.version,
                supported: SESSION_FILE_VERSION,
            });
        }

        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let mut config = SessionConfig::new(
            BaseUrl::new(base_url)?,
            Username::new(username)?,
            Password::new(password)?,
        );

        match (self.access_token, self.token_expiry) {
            (Some(token), Some(expires_at)) => {
                config.access_token = Some(AccessToken { token, expires_at });
            }
            (None, None) => {}
            _ => tracing::warn!(
                "Session file holds a token without expiry (or vice versa); ignoring it"
            ),
        }

        Ok(config)
    }
}

/// Loads and saves a [`SessionConfig`] at a fixed path.
///
/// # Example
///
/// ```rust,no_run
/// use plentymarkets_rest::CredentialStore;
///
/// let store = CredentialStore::new("plenty-session.json");
/// let session = store.load()?;
/// println!("Connected to {}", session.base_url);
/// # Ok::<(), plentymarkets_rest::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Creates a store for the given file path. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the session file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and validates the session file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingConfigFile`] if the file does not exist
    /// - [`ConfigError::MissingRequiredField`] if username, password or base URL is absent
    /// - [`ConfigError::Serialization`] if the file is not a valid session record
    /// - [`ConfigError::Io`] if the file cannot be read
    pub fn load(&self) -> Result<SessionConfig, ConfigError> {
        if !self.exists() {
            return Err(ConfigError::MissingConfigFile {
                path: self.display_path(),
            });
        }

        let bytes = fs::read(&self.path).map_err(|e| self.io_error(&e))?;
        let stored: StoredSession =
            serde_json::from_slice(&bytes).map_err(|e| ConfigError::Serialization {
                path: self.display_path(),
                message: e.to_string(),
            })?;

        stored.into_config()
    }

    /// Loads the existing file, or creates it from `seed` when it is missing.
    ///
    /// An existing file always wins over the seed. The loaded configuration is
    /// written back so the normalized base URL is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingConfigFile`] if the file is missing and no
    /// seed was given, plus any error from [`load`](Self::load) or
    /// [`save`](Self::save).
    pub fn load_or_init(&self, seed: Option<&SessionConfig>) -> Result<SessionConfig, ConfigError> {
        if !self.exists() {
            if let Some(seed) = seed {
                tracing::debug!("Creating session file {}", self.path.display());
                self.save(seed)?;
            }
        }

        let config = self.load()?;
        self.save(&config)?;
        Ok(config)
    }

    /// Writes the full configuration, replacing any previous content.
    ///
    /// The record is written to a temporary sibling file and renamed over the
    /// target, so a crash mid-write leaves the previous session intact.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written.
    pub fn save(&self, config: &SessionConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(&e))?;
        }

        let serialized = serde_json::to_vec_pretty(&StoredSession::from(config)).map_err(|e| {
            ConfigError::Serialization {
                path: self.display_path(),
                message: e.to_string(),
            }
        })?;

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        {
            let mut file = File::create(&tmp_path).map_err(|e| self.io_error(&e))?;
            file.write_all(&serialized).map_err(|e| self.io_error(&e))?;
            file.sync_all().map_err(|e| self.io_error(&e))?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(&e))
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, error: &std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.display_path(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "plenty-store-{name}-{}-{nanos}.json",
            std::process::id()
        ))
    }

    fn seed() -> SessionConfig {
        SessionConfig::new(
            BaseUrl::new("http://shop.example.com").unwrap(),
            Username::new("user").unwrap(),
            Password::new("pass").unwrap(),
        )
    }

    #[test]
    fn test_load_missing_file_fails() {
        let store = CredentialStore::new(temp_path("missing"));
        assert!(matches!(
            store.load(),
            Err(ConfigError::MissingConfigFile { .. })
        ));
    }

    #[test]
    fn test_load_reports_missing_password() {
        let path = temp_path("no-password");
        fs::write(
            &path,
            r#"{"version":1,"base_url":"https://a.example.com/","username":"u"}"#,
        )
        .unwrap();

        let result = CredentialStore::new(&path).load();
        assert_eq!(
            result,
            Err(ConfigError::MissingRequiredField { field: "password" })
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, b"not json").unwrap();

        let result = CredentialStore::new(&path).load();
        assert!(matches!(result, Err(ConfigError::Serialization { .. })));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rejects_newer_version() {
        let path = temp_path("future");
        fs::write(
            &path,
            r#"{"version":2,"base_url":"a.example.com","username":"u","password":"p"}"#,
        )
        .unwrap();

        let result = CredentialStore::new(&path).load();
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { version: 2, .. })
        ));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_half_token_is_dropped() {
        let path = temp_path("half-token");
        fs::write(
            &path,
            r#"{"base_url":"a.example.com","username":"u","password":"p","access_token":"t"}"#,
        )
        .unwrap();

        let config = CredentialStore::new(&path).load().unwrap();
        assert!(config.access_token.is_none());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_save_then_load_keeps_token() {
        let path = temp_path("round");
        let store = CredentialStore::new(&path);
        let token = AccessToken::issued("abc", Utc::now(), 3600).unwrap();
        let config = seed().with_access_token(token.clone());

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.access_token, Some(token));
        assert_eq!(loaded.base_url.as_ref(), "https://shop.example.com/");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_or_init_writes_seed_when_missing() {
        let path = temp_path("init");
        let store = CredentialStore::new(&path);

        let config = store.load_or_init(Some(&seed())).unwrap();

        assert!(store.exists());
        assert_eq!(config.username.as_ref(), "user");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_or_init_prefers_existing_file() {
        let path = temp_path("existing");
        fs::write(
            &path,
            r#"{"version":1,"base_url":"http://file.example.com","username":"from-file","password":"p"}"#,
        )
        .unwrap();
        let store = CredentialStore::new(&path);

        let config = store.load_or_init(Some(&seed())).unwrap();
        assert_eq!(config.username.as_ref(), "from-file");

        // The normalized URL is written back
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("https://file.example.com/"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_or_init_without_seed_requires_file() {
        let store = CredentialStore::new(temp_path("no-seed"));
        assert!(matches!(
            store.load_or_init(None),
            Err(ConfigError::MissingConfigFile { .. })
        ));
    }
}
