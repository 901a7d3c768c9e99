use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A token counts as expired this long before its real expiry.
pub const EXPIRY_MARGIN_MS: i64 = 60_000;

/// Raw body of the token endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenPayload {
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The active session credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    authorization: String,
    expires_at: DateTime<Utc>,
}

impl Token {
    /// A payload without `expires_in` yields a token that is already stale, so
    /// the next call re-authorizes.
    pub fn from_payload(payload: &TokenPayload, now: DateTime<Utc>) -> Result<Self> {
        let (Some(token_type), Some(access_token)) = (&payload.token_type, &payload.access_token) else {
            return Err(Error::Auth(
                "token response lacks token_type or access_token".to_string(),
            ));
        };
        let lifetime_ms = payload.expires_in.unwrap_or(0).max(0).saturating_mul(1000);
        // Lifetimes past the representable range clamp to the latest instant.
        let expires_at = TimeDelta::try_milliseconds(lifetime_ms)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Ok(Token {
            authorization: format!("{} {}", token_type, access_token),
            expires_at,
        })
    }

    /// Value of the `Authorization` header, e.g. `Bearer abc`.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at - TimeDelta::milliseconds(EXPIRY_MARGIN_MS)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("authorization", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
