use log::warn;
use reqwest::StatusCode;
use serde_json::Value;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.sandbox.mangopay.com";
pub const DEFAULT_API_VERSION: &str = "v2.01";

/// Callback invoked with the status and decoded body of every non-2xx
/// response before the call fails.
#[derive(Clone)]
pub struct ErrorHandler(Arc<dyn Fn(StatusCode, &Value) + Send + Sync>);

impl ErrorHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(StatusCode, &Value) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn handle(&self, status: StatusCode, body: &Value) {
        (self.0)(status, body)
    }
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(|status, body| warn!("MANGOPAY request failed ({}): {}", status, body))
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorHandler(..)")
    }
}

/// Runtime configuration for the MANGOPAY client.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub response_timeout: Duration,
    /// Log request and response bodies at debug level.
    pub debug: bool,
    pub error_handler: ErrorHandler,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("connect_timeout", &self.connect_timeout)
            .field("response_timeout", &self.response_timeout)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: default_user_agent(),
            connect_timeout: Duration::from_secs(30),
            response_timeout: Duration::from_secs(80),
            debug: false,
            error_handler: ErrorHandler::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, response: Duration) -> Self {
        self.connect_timeout = connect;
        self.response_timeout = response;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = handler;
        self
    }

    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - MANGOPAY_CLIENT_ID [required]
    /// - MANGOPAY_API_KEY [required]
    /// - MANGOPAY_BASE_URL (default: https://api.sandbox.mangopay.com)
    /// - MANGOPAY_API_VERSION (default: v2.01)
    /// - MANGOPAY_CONNECT_TIMEOUT_SECS (default: 30)
    /// - MANGOPAY_RESPONSE_TIMEOUT_SECS (default: 80)
    /// - MANGOPAY_DEBUG (1/true to log bodies)
    /// - MANGOPAY_USER_AGENT (default: mangopay-rs/<version>)
    pub fn from_env() -> Result<Self, String> {
        let client_id =
            env::var("MANGOPAY_CLIENT_ID").map_err(|_| "Missing MANGOPAY_CLIENT_ID".to_string())?;
        let api_key =
            env::var("MANGOPAY_API_KEY").map_err(|_| "Missing MANGOPAY_API_KEY".to_string())?;

        let mut cfg = Self::new(client_id, api_key);
        if let Ok(base_url) = env::var("MANGOPAY_BASE_URL") {
            cfg.base_url = base_url;
        }
        if let Ok(api_version) = env::var("MANGOPAY_API_VERSION") {
            cfg.api_version = api_version;
        }
        if let Some(secs) = env_secs("MANGOPAY_CONNECT_TIMEOUT_SECS") {
            cfg.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_secs("MANGOPAY_RESPONSE_TIMEOUT_SECS") {
            cfg.response_timeout = Duration::from_secs(secs);
        }
        cfg.debug = matches!(
            env::var("MANGOPAY_DEBUG").as_deref(),
            Ok("1") | Ok("true") | Ok("TRUE")
        );
        if let Ok(ua) = env::var("MANGOPAY_USER_AGENT") {
            cfg.user_agent = ua;
        }
        Ok(cfg)
    }

    /// Root of every resource URL, without trailing slash.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn env_secs(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|s| s.parse::<u64>().ok())
}

fn default_user_agent() -> String {
    format!("mangopay-rs/{}", env!("CARGO_PKG_VERSION"))
}
