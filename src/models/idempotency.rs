use super::Model;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Client-chosen key making a write replay-safe, sent as `Idempotency-Key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored response of an earlier write made with an idempotency key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdempotencyResponse {
    pub status_code: Option<String>,
    pub content_length: Option<String>,
    pub content_type: Option<String>,
    pub date: Option<i64>,
    #[serde(rename = "RequestURL")]
    pub request_url: Option<String>,
    pub resource: Option<Value>,
}

impl Model for IdempotencyResponse {
    const NAME: &'static str = "IdempotencyResponse";
}
