//! Typed resources exchanged with the API.
//!
//! Field names follow the wire format (PascalCase). Every field is optional so
//! the same type serves both as a write payload and as a decoded response;
//! which fields actually go out on a write is decided by [`build_request_data`].

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod bank_account;
mod card;
mod deposit;
mod idempotency;
mod pay_in;
mod pay_out;
mod refund;
mod transaction;
mod user;
mod wallet;

pub use bank_account::*;
pub use card::*;
pub use deposit::*;
pub use idempotency::*;
pub use pay_in::*;
pub use pay_out::*;
pub use refund::*;
pub use transaction::*;
pub use user::*;
pub use wallet::*;

/// Fields every entity gets from the server.
pub const ENTITY_READ_ONLY: &[&str] = &["Id", "CreationDate"];

/// Serialization capability shared by every resource.
pub trait Model: Serialize + DeserializeOwned + Send + 'static {
    /// Name used in [`Error::Model`].
    const NAME: &'static str;

    /// Server-assigned fields, never sent on a write.
    fn read_only_properties() -> &'static [&'static str] {
        ENTITY_READ_ONLY
    }

    /// Fields holding a nested variant object whose own fields are inlined at
    /// the top level of the write payload.
    fn sub_request_properties() -> &'static [&'static str] {
        &[]
    }

    /// Builds the model from a raw decoded payload.
    fn from_payload(payload: Value) -> Result<Self> {
        decode(Self::NAME, &payload)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(model: &'static str, payload: &Value) -> Result<T> {
    T::deserialize(payload).map_err(|source| Error::Model { model, source })
}

/// Computes the write payload for `entity`.
///
/// Starts from the model's own fields, drops read-only ones and nulls, then
/// inlines each nested variant object (pay-in payment/execution details,
/// pay-out means of payment, bank account details) at the top level.
pub fn build_request_data<M: Model>(entity: &M) -> Result<Map<String, Value>> {
    let value = serde_json::to_value(entity).map_err(Error::Serialization)?;
    let Value::Object(fields) = value else {
        return Err(Error::Serialization(serde::ser::Error::custom(format!(
            "{} does not serialize to a JSON object",
            M::NAME
        ))));
    };
    let read_only = M::read_only_properties();
    let nested = M::sub_request_properties();
    let keep = |key: &str, value: &Value| !value.is_null() && !read_only.contains(&key);

    let mut data = Map::new();
    for (key, value) in fields {
        if nested.contains(&key.as_str()) {
            if let Value::Object(sub) = value {
                data.extend(sub.into_iter().filter(|(k, v)| keep(k.as_str(), v)));
            }
            continue;
        }
        if keep(key.as_str(), &value) {
            data.insert(key, value);
        }
    }
    Ok(data)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    pub currency: String,
    pub amount: i64,
}

impl Money {
    pub fn new(currency: impl Into<String>, amount: i64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}
