//! Error taxonomy for the MANGOPAY client.
//!
//! Only a 401 is recovered locally (one re-authorization and retry inside the
//! dispatcher). Everything else reaches the caller unchanged.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The token endpoint rejected the client-credentials grant, or answered
    /// without `token_type`/`access_token`.
    #[error("authorization failed: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Connect or response timeout elapsed.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Non-2xx application response. `body` is the decoded JSON body, or the
    /// raw text wrapped in a JSON string when the body was not JSON.
    #[error("request failed with status {status}: {body}")]
    Request { status: StatusCode, body: Value },

    /// A 2xx response whose body is not JSON.
    #[error("could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not map payload onto {model}: {source}")]
    Model {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing path parameter `{0}`")]
    MissingPathParam(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request could not be built from the given inputs, e.g. a pay-in
    /// whose payment and execution types have no endpoint.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("could not serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout(e)
        } else {
            Error::Transport(e)
        }
    }
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Transport(e) | Error::Timeout(e) => e.status(),
            _ => None,
        }
    }

    /// Decodes the MANGOPAY error envelope carried by a `Request` error.
    pub fn api_error(&self) -> Option<ApiError> {
        match self {
            Error::Request { body, .. } => serde_json::from_value(body.clone()).ok(),
            _ => None,
        }
    }
}

/// Error body returned by the API on 4xx/5xx.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "Type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Unix seconds; some responses carry a fractional value.
    #[serde(default)]
    pub date: Option<f64>,
    /// Per-field validation messages.
    #[serde(default, rename = "errors", deserialize_with = "null_as_empty")]
    pub errors: BTreeMap<String, String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}
