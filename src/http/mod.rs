//! Request dispatcher: the single path every API call goes through.
//!
//! Owns the session token and the rate-limit snapshot for one client
//! instance. A stale or missing token is refreshed before the request is
//! sent; a 401 triggers one re-authorization and one retry.

pub mod rate;
pub mod token;

use crate::config::Config;
use crate::endpoints::{render_path, Endpoint, EndpointDescriptor};
use crate::error::{Error, Result};
use crate::models::{build_request_data, IdempotencyKey, Model};
use base64::Engine;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use url::Url;

pub use rate::{RateLimit, RateLimits};
pub use token::{Token, TokenPayload};

pub const IDEMPOTENCY_KEY: &str = "idempotency-key";
pub const HEADER_NUMBER_OF_PAGES: &str = "x-number-of-pages";
pub const HEADER_NUMBER_OF_ITEMS: &str = "x-number-of-items";

pub fn build_client(cfg: &Config) -> Result<Client> {
    let mut default_headers = HeaderMap::new();
    let ua = HeaderValue::from_str(&cfg.user_agent)
        .map_err(|e| Error::Config(format!("invalid user agent: {}", e)))?;
    default_headers.insert(USER_AGENT, ua);
    // Authorization is injected per request so the token can rotate.
    Client::builder()
        .default_headers(default_headers)
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.response_timeout)
        .use_rustls_tls()
        .build()
        .map_err(Error::from)
}

/// Per-call inputs. Built fresh for every call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub path: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Shorthand for the `{id}` placeholder.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.path_param("id", id)
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn idempotency_key(self, key: &IdempotencyKey) -> Result<Self> {
        let value = HeaderValue::from_str(key.as_str())
            .map_err(|e| Error::InvalidRequest(format!("invalid idempotency key: {}", e)))?;
        Ok(self.header(HeaderName::from_static(IDEMPOTENCY_KEY), value))
    }

    /// Body from a model, with read-only fields stripped and nested variant
    /// objects inlined.
    pub fn with_model<M: Model>(mut self, entity: &M) -> Result<Self> {
        self.body = Some(Value::Object(build_request_data(entity)?));
        Ok(self)
    }

    /// Body from any serializable value, as-is.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Serialization)?);
        Ok(self)
    }

    /// JSON view of the options, the base of [`Dispatcher::call_raw`] results.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        let path: Map<String, Value> = self
            .path
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        out.insert("path".into(), Value::Object(path));
        let query: Map<String, Value> = self
            .query
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        out.insert("query".into(), Value::Object(query));
        if let Some(body) = &self.body {
            out.insert("data".into(), body.clone());
        }
        Value::Object(out)
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ApiResponse {
    pub fn total_pages(&self) -> Option<u64> {
        header_u64(&self.headers, HEADER_NUMBER_OF_PAGES)
    }

    pub fn total_items(&self) -> Option<u64> {
        header_u64(&self.headers, HEADER_NUMBER_OF_ITEMS)
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Caller headers first, then defaults on top, except that a caller
/// `Content-Type` is kept. Callers cannot blank the Authorization header.
pub fn merge_headers(defaults: &HeaderMap, caller: &HeaderMap) -> HeaderMap {
    let mut merged = caller.clone();
    for (name, value) in defaults {
        if name == CONTENT_TYPE && caller.contains_key(CONTENT_TYPE) {
            continue;
        }
        merged.insert(name.clone(), value.clone());
    }
    merged
}

/// Wraps a list payload element-wise; a single object becomes a one-element
/// list.
pub fn map_payload<M: Model>(payload: Value) -> Result<Vec<M>> {
    match payload {
        Value::Array(items) => items.into_iter().map(M::from_payload).collect(),
        other => Ok(vec![M::from_payload(other)?]),
    }
}

/// Raw payload merged over the caller's options, both at the top level and
/// under `data`.
pub fn merge_onto_options(options: Value, payload: Value) -> Value {
    let mut merged = match options {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(fields) = &payload {
        for (k, v) in fields {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged.insert("data".into(), payload);
    Value::Object(merged)
}

// Error bodies only: a gateway page is still worth surfacing as text.
fn decode_error_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn decode_success_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(Error::Decode)
}

pub struct Dispatcher {
    cfg: Config,
    client: Client,
    token: RwLock<Option<Token>>,
    // Held across the token round trip so concurrent callers share one refresh.
    refresh: Mutex<()>,
    rate_limits: RwLock<RateLimits>,
}

impl Dispatcher {
    pub fn new(cfg: Config) -> Result<Self> {
        if cfg.client_id.trim().is_empty() || cfg.api_key.trim().is_empty() {
            return Err(Error::Config("client id and api key are required".into()));
        }
        Url::parse(cfg.api_root())
            .map_err(|e| Error::Config(format!("invalid base url {:?}: {}", cfg.base_url, e)))?;
        let client = build_client(&cfg)?;
        Ok(Self {
            cfg,
            client,
            token: RwLock::new(None),
            refresh: Mutex::new(()),
            rate_limits: RwLock::new(RateLimits::default()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Snapshot of the rate limits reported by the last successful response.
    pub fn rate_limits(&self) -> RateLimits {
        *self.rate_limits.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// `true` when no token is held or it is within the expiry margin.
    pub fn is_expired(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(true, |t| t.is_expired_at(Utc::now()))
    }

    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Token::expires_at)
    }

    /// Runs the client-credentials grant and replaces the session token.
    pub async fn authorize(&self) -> Result<TokenPayload> {
        let _gate = self.refresh.lock().await;
        let (_, payload) = self.refresh_token().await?;
        Ok(payload)
    }

    fn fresh_authorization(&self) -> Option<String> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        token
            .as_ref()
            .filter(|t| !t.is_expired_at(Utc::now()))
            .map(|t| t.authorization().to_string())
    }

    async fn ensure_token(&self) -> Result<String> {
        if let Some(auth) = self.fresh_authorization() {
            return Ok(auth);
        }
        let _gate = self.refresh.lock().await;
        // Another call may have refreshed while we waited.
        if let Some(auth) = self.fresh_authorization() {
            return Ok(auth);
        }
        debug!("no valid token; authorizing");
        let (auth, _) = self.refresh_token().await?;
        Ok(auth)
    }

    /// Refreshes after `rejected` got a 401, unless a concurrent call already
    /// replaced it.
    async fn reauthorize(&self, rejected: &str) -> Result<String> {
        let _gate = self.refresh.lock().await;
        if let Some(auth) = self.fresh_authorization() {
            if auth != rejected {
                return Ok(auth);
            }
        }
        let (auth, _) = self.refresh_token().await?;
        Ok(auth)
    }

    // Caller must hold `refresh`.
    async fn refresh_token(&self) -> Result<(String, TokenPayload)> {
        let mut params = BTreeMap::new();
        params.insert("apiVersion".to_string(), self.cfg.api_version.clone());
        let path = render_path(Endpoint::AuthorizationToken.descriptor().template, &params)?;
        let url = format!("{}{}", self.cfg.api_root(), path);
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.cfg.client_id, self.cfg.api_key));

        debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned {}: {}",
                status, text
            )));
        }
        let payload: TokenPayload = serde_json::from_str(&text)
            .map_err(|e| Error::Auth(format!("malformed token response: {}", e)))?;
        let token = Token::from_payload(&payload, Utc::now())?;
        info!(
            "authorized client {}; token valid until {}",
            self.cfg.client_id,
            token.expires_at().to_rfc3339()
        );
        let auth = token.authorization().to_string();
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok((auth, payload))
    }

    fn url_for(&self, descriptor: &EndpointDescriptor, options: &RequestOptions) -> Result<Url> {
        let mut params = options.path.clone();
        params.insert("clientId".into(), self.cfg.client_id.clone());
        params.insert("apiVersion".into(), self.cfg.api_version.clone());
        let path = render_path(descriptor.template, &params)?;
        let mut url = Url::parse(&format!("{}{}", self.cfg.api_root(), path))
            .map_err(|e| Error::Config(format!("invalid request url: {}", e)))?;
        if !options.query.is_empty() {
            url.query_pairs_mut().extend_pairs(options.query.iter());
        }
        Ok(url)
    }

    fn default_headers(&self, authorization: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let ua = HeaderValue::from_str(&self.cfg.user_agent)
            .map_err(|e| Error::Config(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, ua);
        let auth = HeaderValue::from_str(authorization)
            .map_err(|e| Error::Auth(format!("unusable token: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }

    fn record_rate_limits(&self, headers: &HeaderMap) {
        let mut limits = self.rate_limits.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = limits.update_from_headers(headers) {
            warn!("ignoring malformed rate-limit headers: {}", e);
        }
    }

    /// Performs one API operation and returns the full response.
    pub async fn call(&self, endpoint: Endpoint, options: RequestOptions) -> Result<ApiResponse> {
        let descriptor = endpoint.descriptor();
        let url = self.url_for(&descriptor, &options)?;
        let body = match &options.body {
            Some(body) => Some(serde_json::to_vec(body).map_err(Error::Serialization)?),
            None => None,
        };

        let mut authorization = self.ensure_token().await?;
        let mut retried = false;
        loop {
            let headers = merge_headers(&self.default_headers(&authorization)?, &options.headers);
            debug!("{} {}", descriptor.method, url);
            if self.cfg.debug {
                if let Some(body) = &options.body {
                    debug!("request body: {}", body);
                }
            }
            let mut req = self
                .client
                .request(descriptor.method.clone(), url.clone())
                .headers(headers);
            if let Some(body) = &body {
                req = req.body(body.clone());
            }
            let res = req.send().await?;
            let status = res.status();
            let headers = res.headers().clone();
            let text = res.text().await?;
            debug!("{} {} -> {}", descriptor.method, url, status);
            if self.cfg.debug {
                debug!("response body: {}", text);
            }

            if status == StatusCode::UNAUTHORIZED && !retried {
                info!("{} {} rejected the token; re-authorizing", descriptor.method, url);
                authorization = self.reauthorize(&authorization).await?;
                retried = true;
                continue;
            }

            if !status.is_success() {
                let body = decode_error_body(&text);
                self.cfg.error_handler.handle(status, &body);
                return Err(Error::Request { status, body });
            }
            self.record_rate_limits(&headers);
            let body = decode_success_body(&text)?;
            return Ok(ApiResponse {
                status,
                headers,
                body,
            });
        }
    }

    /// Calls `endpoint` and maps the payload onto `M`.
    pub async fn call_model<M: Model>(&self, endpoint: Endpoint, options: RequestOptions) -> Result<M> {
        let response = self.call(endpoint, options).await?;
        M::from_payload(response.body)
    }

    /// Calls `endpoint` and maps each element of a list payload onto `M`,
    /// preserving order.
    pub async fn call_models<M: Model>(
        &self,
        endpoint: Endpoint,
        options: RequestOptions,
    ) -> Result<Vec<M>> {
        let response = self.call(endpoint, options).await?;
        map_payload(response.body)
    }

    /// Calls `endpoint` without a target model; see [`merge_onto_options`].
    pub async fn call_raw(&self, endpoint: Endpoint, options: RequestOptions) -> Result<Value> {
        let original = options.to_value();
        let response = self.call(endpoint, options).await?;
        Ok(merge_onto_options(original, response.body))
    }
}
