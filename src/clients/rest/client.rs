//! REST client implementation for the Plentymarkets API.
//!
//! This module provides the [`RestClient`] type, which authenticates calls,
//! waits out exhausted rate limits and retries short-period limit rejections.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::auth::{is_token_valid, CredentialStore, LoginResponse, SessionConfig, LOGIN_PATH};
use crate::clients::rest::RestError;
use crate::clients::throttle::{plan_throttle_waits, ShortPeriodLimit};
use crate::clients::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, RequestBody, ResponseBody,
    RetryExhaustedError, Transport,
};
use crate::config::{ErrorMode, ThrottlePolicy};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What happened while executing the most recent call.
///
/// Reset at the start of every call. Retry counts and waits include a login
/// performed on behalf of the call; throttle fields describe only the last
/// successful dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallReport {
    /// Whether the last successful response required a throttle wait.
    pub throttled: bool,
    /// Time spent waiting for exhausted rate-limit windows after the last
    /// successful response.
    pub throttle_wait: Duration,
    /// How many times a short-period limit rejection was retried.
    pub retries: u32,
    /// Total time spent waiting before retries.
    pub retry_wait: Duration,
}

/// REST API client for a Plentymarkets system.
///
/// The client owns the session state: it logs in when the token is missing
/// or expired, persists new tokens through its [`CredentialStore`], and
/// adds the bearer token to every call.
///
/// # Rate Limiting
///
/// After each successful response the client inspects the throttle headers
/// (see [`throttle`](crate::clients::throttle)) and sleeps until exhausted
/// windows decay. Rejections for short-period read or write limits are
/// retried after a fixed wait, up to [`ThrottlePolicy::max_retries`] times.
///
/// # Concurrency
///
/// Calls take `&mut self`: one client runs one call at a time, including its
/// waits and retries. Sharing one session file between several clients or
/// processes is not supported.
///
/// # Example
///
/// ```rust,no_run
/// use plentymarkets_rest::{BaseUrl, Password, RestClient, SessionConfig, Username};
///
/// # async fn run() -> Result<(), plentymarkets_rest::RestError> {
/// let seed = SessionConfig::new(
///     BaseUrl::new("example.plentymarkets-cloud01.com")?,
///     Username::new("rest-user")?,
///     Password::new("secret")?,
/// );
///
/// let mut client = RestClient::builder("plenty-session.json")
///     .session(seed)
///     .connect()
///     .await?;
///
/// if let Some(body) = client.get("rest/orders", None).await? {
///     println!("Orders: {:?}", body.as_json());
/// }
/// # Ok(())
/// # }
/// ```
pub struct RestClient {
    transport: Arc<dyn Transport>,
    store: CredentialStore,
    session: SessionConfig,
    policy: ThrottlePolicy,
    error_mode: ErrorMode,
    rate_limiting_enabled: bool,
    last_call: CallReport,
    default_headers: HashMap<String, String>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("store", &self.store)
            .field("session", &self.session)
            .field("policy", &self.policy)
            .field("error_mode", &self.error_mode)
            .field("rate_limiting_enabled", &self.rate_limiting_enabled)
            .field("last_call", &self.last_call)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Creates a builder for a client whose session is stored at `path`.
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> RestClientBuilder {
        RestClientBuilder::new(path)
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Returns the store the session is persisted to.
    #[must_use]
    pub const fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Returns how terminal call failures are reported.
    #[must_use]
    pub const fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    /// Returns the throttle policy.
    #[must_use]
    pub const fn throttle_policy(&self) -> &ThrottlePolicy {
        &self.policy
    }

    /// Returns `true` if throttle headers are honored.
    #[must_use]
    pub const fn rate_limiting_enabled(&self) -> bool {
        self.rate_limiting_enabled
    }

    /// Enables or disables waiting on throttle headers.
    ///
    /// Short-period limit rejections are retried either way.
    pub fn set_rate_limiting_enabled(&mut self, enabled: bool) -> &mut Self {
        self.rate_limiting_enabled = enabled;
        self
    }

    /// Returns `true` if the last call waited for an exhausted rate-limit window.
    #[must_use]
    pub const fn throttled_on_last_request(&self) -> bool {
        self.last_call.throttled
    }

    /// Returns details about the last call's waits and retries.
    #[must_use]
    pub const fn last_call(&self) -> &CallReport {
        &self.last_call
    }

    /// Sends a GET request with optional query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] only in [`ErrorMode::Propagate`]; otherwise
    /// failures are logged and reported as `Ok(None)`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut query = HashMap::new();
    /// query.insert("itemsPerPage".to_string(), "50".to_string());
    /// let items = client.get("rest/items", Some(query)).await?;
    /// ```
    pub async fn get(
        &mut self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<Option<ResponseBody>, RestError> {
        self.execute(HttpMethod::Get, path, query, RequestBody::Empty).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn post(
        &mut self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<Option<ResponseBody>, RestError> {
        self.execute(HttpMethod::Post, path, None, RequestBody::Json(body)).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn put(
        &mut self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<Option<ResponseBody>, RestError> {
        self.execute(HttpMethod::Put, path, None, RequestBody::Json(body)).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn patch(
        &mut self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<Option<ResponseBody>, RestError> {
        self.execute(HttpMethod::Patch, path, None, RequestBody::Json(body)).await
    }

    /// Sends a DELETE request, with a JSON body if one is given.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn delete(
        &mut self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Option<ResponseBody>, RestError> {
        let body = body.map_or(RequestBody::Empty, RequestBody::Json);
        self.execute(HttpMethod::Delete, path, None, body).await
    }

    /// Performs one logical call.
    ///
    /// Logs in first if the token is missing or expired (unless `path` is the
    /// login path itself), sends the request with the bearer token, retries
    /// short-period limit rejections, waits out exhausted throttle windows,
    /// and decodes the body.
    ///
    /// # Errors
    ///
    /// In [`ErrorMode::Propagate`] any terminal failure is returned. In
    /// [`ErrorMode::Suppress`] failures are logged and `Ok(None)` is returned.
    pub async fn execute(
        &mut self,
        method: HttpMethod,
        path: &str,
        query: Option<HashMap<String, String>>,
        body: RequestBody,
    ) -> Result<Option<ResponseBody>, RestError> {
        self.last_call = CallReport::default();

        match self.try_execute(method, path, query, body).await {
            Ok(body) => Ok(Some(body)),
            Err(error) => match self.error_mode {
                ErrorMode::Propagate => Err(error),
                ErrorMode::Suppress => {
                    tracing::warn!("{} {} failed: {}", method, path, error);
                    Ok(None)
                }
            },
        }
    }

    /// Logs in with the stored credentials and persists the new token.
    ///
    /// Called automatically when a token is missing or expired.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Login`] if the response does not contain a
    /// token, [`RestError::Config`] if the session cannot be saved, and any
    /// transport or retry error of the login call.
    pub async fn login(&mut self) -> Result<(), RestError> {
        tracing::info!(
            "Logging in to {} as {}",
            self.session.base_url,
            self.session.username.as_ref()
        );

        let request = self
            .base_request(HttpMethod::Post, LOGIN_PATH)
            .body(RequestBody::Form(vec![
                (
                    "username".to_string(),
                    self.session.username.as_ref().to_string(),
                ),
                (
                    "password".to_string(),
                    self.session.password.as_ref().to_string(),
                ),
            ]));

        let response = self.dispatch(&request).await?;
        let value = match Self::decode(response, LOGIN_PATH)? {
            ResponseBody::Json(value) => value,
            ResponseBody::Pdf(_) => {
                return Err(RestError::Login {
                    reason: "expected a JSON body, got a PDF document".to_string(),
                })
            }
        };
        let login: LoginResponse =
            serde_json::from_value(value).map_err(|e| RestError::Login {
                reason: e.to_string(),
            })?;

        self.session
            .apply_login(&login, Utc::now())
            .map_err(|e| RestError::Login {
                reason: e.to_string(),
            })?;
        self.store.save(&self.session)?;

        tracing::debug!("Token valid until {:?}", self.session.token_expiry());
        Ok(())
    }

    async fn try_execute(
        &mut self,
        method: HttpMethod,
        path: &str,
        query: Option<HashMap<String, String>>,
        body: RequestBody,
    ) -> Result<ResponseBody, RestError> {
        let path = path.trim_start_matches('/');
        let is_login = path == LOGIN_PATH;

        if !is_login && !is_token_valid(&self.session, Utc::now()) {
            self.login().await?;
        }

        let mut request = self.base_request(method, path).body(body);
        if let Some(query) = query {
            request = request.query(query);
        }
        if !is_login {
            if let Some(token) = &self.session.access_token {
                request = request.header("Authorization", format!("Bearer {}", token.token));
            }
        }

        let response = self.dispatch(&request).await?;
        Self::decode(response, path)
    }

    /// Sends a request, retrying short-period limit rejections, then waits
    /// for any exhausted throttle window reported by the response.
    async fn dispatch(&mut self, request: &HttpRequest) -> Result<HttpResponse, RestError> {
        let mut retries: u32 = 0;

        let response = loop {
            tracing::debug!("Sending {} {}", request.method, request.url);

            let result = self.transport.send(request).await;
            let error = match result {
                Ok(response) => break response,
                Err(error) => error,
            };

            let message = error.to_string();
            let Some(limit) = ShortPeriodLimit::detect(&message) else {
                return Err(error.into());
            };

            if retries >= self.policy.retry_limit() {
                return Err(RetryExhaustedError {
                    attempts: retries + 1,
                    message,
                }
                .into());
            }
            retries += 1;

            let wait = match limit {
                ShortPeriodLimit::Read => self.policy.read_limit_wait(),
                ShortPeriodLimit::Write => self.policy.write_limit_wait(),
            };
            tracing::warn!(
                "{:?} limit reached for {} {}, retrying in {:?} (retry {} of {})",
                limit,
                request.method,
                request.url,
                wait,
                retries,
                self.policy.retry_limit()
            );
            tokio::time::sleep(wait).await;

            self.last_call.retries += 1;
            self.last_call.retry_wait += wait;
        };

        self.last_call.throttled = false;
        self.last_call.throttle_wait = Duration::ZERO;
        if self.rate_limiting_enabled {
            self.wait_for_throttle(&response).await;
        }

        Ok(response)
    }

    async fn wait_for_throttle(&mut self, response: &HttpResponse) {
        for wait in plan_throttle_waits(response) {
            let duration = self.policy.units(wait.units);
            tracing::warn!(
                "No calls left for {}, waiting {:?}",
                wait.scope.header_prefix(),
                duration
            );
            tokio::time::sleep(duration).await;

            self.last_call.throttled = true;
            self.last_call.throttle_wait += duration;
        }
    }

    fn base_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.session.base_url.join(path));
        for (key, value) in &self.default_headers {
            request = request.header(key.clone(), value.clone());
        }
        request
    }

    fn decode(response: HttpResponse, path: &str) -> Result<ResponseBody, RestError> {
        response.into_body().map_err(|e| RestError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Builder for [`RestClient`].
///
/// # Defaults
///
/// - transport: [`ReqwestTransport`]
/// - error mode: [`ErrorMode::Suppress`]
/// - throttle policy: [`ThrottlePolicy::default`] (one-second units)
/// - rate limiting: enabled
/// - seed session: none (the session file must exist)
pub struct RestClientBuilder {
    store: CredentialStore,
    seed: Option<SessionConfig>,
    transport: Option<Arc<dyn Transport>>,
    policy: ThrottlePolicy,
    error_mode: ErrorMode,
    rate_limiting_enabled: bool,
    user_agent_prefix: Option<String>,
}

impl fmt::Debug for RestClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClientBuilder")
            .field("store", &self.store)
            .field("seed", &self.seed)
            .field("policy", &self.policy)
            .field("error_mode", &self.error_mode)
            .field("rate_limiting_enabled", &self.rate_limiting_enabled)
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish_non_exhaustive()
    }
}

impl RestClientBuilder {
    /// Creates a builder for a session stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: CredentialStore::new(path),
            seed: None,
            transport: None,
            policy: ThrottlePolicy::default(),
            error_mode: ErrorMode::default(),
            rate_limiting_enabled: true,
            user_agent_prefix: None,
        }
    }

    /// Sets the session used to create the file when it does not exist yet.
    ///
    /// An existing file always takes precedence.
    #[must_use]
    pub fn session(mut self, seed: SessionConfig) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets a custom transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the throttle policy.
    #[must_use]
    pub const fn throttle_policy(mut self, policy: ThrottlePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how terminal call failures are reported.
    #[must_use]
    pub const fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enables or disables waiting on throttle headers.
    #[must_use]
    pub const fn rate_limiting(mut self, enabled: bool) -> Self {
        self.rate_limiting_enabled = enabled;
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Loads the session and logs in if its token is missing or expired.
    ///
    /// # Errors
    ///
    /// Always returns errors, regardless of the error mode:
    /// - [`RestError::Config`] if the session file is missing (without seed),
    ///   incomplete or unwritable; no request is sent in that case
    /// - [`RestError::Transport`] if the default transport cannot be created
    /// - any error of the initial login
    pub async fn connect(self) -> Result<RestClient, RestError> {
        let session = self.store.load_or_init(self.seed.as_ref())?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        let user_agent_prefix = self
            .user_agent_prefix
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let mut default_headers = HashMap::new();
        default_headers.insert(
            "User-Agent".to_string(),
            format!("{user_agent_prefix}Plentymarkets REST Client v{SDK_VERSION}"),
        );

        let mut client = RestClient {
            transport,
            store: self.store,
            session,
            policy: self.policy,
            error_mode: self.error_mode,
            rate_limiting_enabled: self.rate_limiting_enabled,
            last_call: CallReport::default(),
            default_headers,
        };

        if !client.session.has_valid_token() {
            client.login().await?;
        }

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = RestClient::builder("session.json");

        assert_eq!(builder.store.path(), std::path::Path::new("session.json"));
        assert!(builder.seed.is_none());
        assert!(builder.transport.is_none());
        assert_eq!(builder.error_mode, ErrorMode::Suppress);
        assert_eq!(builder.policy, ThrottlePolicy::default());
        assert!(builder.rate_limiting_enabled);
    }

    #[test]
    fn test_builder_overrides() {
        let builder = RestClient::builder("session.json")
            .error_mode(ErrorMode::Propagate)
            .rate_limiting(false)
            .throttle_policy(ThrottlePolicy::default().max_retries(1))
            .user_agent_prefix("MyApp/1.0");

        assert_eq!(builder.error_mode, ErrorMode::Propagate);
        assert!(!builder.rate_limiting_enabled);
        assert_eq!(builder.policy.retry_limit(), 1);
        assert_eq!(builder.user_agent_prefix.as_deref(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_call_report_starts_clean() {
        let report = CallReport::default();
        assert!(!report.throttled);
        assert_eq!(report.throttle_wait, Duration::ZERO);
        assert_eq!(report.retries, 0);
    }

    #[tokio::test]
    async fn test_connect_without_file_or_seed_fails_before_any_request() {
        let path = std::env::temp_dir().join(format!(
            "plenty-client-missing-{}.json",
            std::process::id()
        ));
        let result = RestClient::builder(path).connect().await;

        assert!(matches!(
            result,
            Err(RestError::Config(crate::ConfigError::MissingConfigFile { .. }))
        ));
    }
}
