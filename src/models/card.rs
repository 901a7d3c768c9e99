use super::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardValidity {
    Valid,
    Invalid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Card {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub user_id: Option<String>,
    /// MMYY
    pub expiration_date: Option<String>,
    pub alias: Option<String>,
    pub card_provider: Option<String>,
    pub card_type: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub bank_code: Option<String>,
    pub active: Option<bool>,
    pub currency: Option<String>,
    pub validity: Option<CardValidity>,
    pub fingerprint: Option<String>,
}

impl Model for Card {
    const NAME: &'static str = "Card";

    // Only `Active` (deactivation) and `Tag` can be written.
    fn read_only_properties() -> &'static [&'static str] {
        &[
            "Id",
            "CreationDate",
            "UserId",
            "ExpirationDate",
            "Alias",
            "CardProvider",
            "CardType",
            "Country",
            "Product",
            "BankCode",
            "Currency",
            "Validity",
            "Fingerprint",
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardRegistrationStatus {
    Created,
    Error,
    Validated,
    #[serde(other)]
    Unknown,
}

/// Tokenization handshake for a new card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CardRegistration {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub user_id: Option<String>,
    pub currency: Option<String>,
    pub card_type: Option<String>,
    pub access_key: Option<String>,
    pub preregistration_data: Option<String>,
    #[serde(rename = "CardRegistrationURL")]
    pub card_registration_url: Option<String>,
    pub registration_data: Option<String>,
    pub card_id: Option<String>,
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub status: Option<CardRegistrationStatus>,
}

impl CardRegistration {
    pub fn new(user_id: impl Into<String>, currency: impl Into<String>) -> Self {
        CardRegistration {
            user_id: Some(user_id.into()),
            currency: Some(currency.into()),
            ..Default::default()
        }
    }
}

impl Model for CardRegistration {
    const NAME: &'static str = "CardRegistration";

    fn read_only_properties() -> &'static [&'static str] {
        &[
            "Id",
            "CreationDate",
            "AccessKey",
            "PreregistrationData",
            "CardRegistrationURL",
            "CardId",
            "ResultCode",
            "ResultMessage",
            "Status",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::build_request_data;
    use serde_json::json;

    #[test]
    fn deactivation_payload_only_carries_active() {
        let card = Card {
            id: Some("c1".into()),
            alias: Some("497010XXXXXX4414".into()),
            currency: Some("EUR".into()),
            active: Some(false),
            ..Default::default()
        };
        let data = build_request_data(&card).unwrap();
        assert_eq!(serde_json::Value::Object(data), json!({"Active": false}));
    }

    #[test]
    fn unexpected_validity_and_status_decode() {
        let card = Card::from_payload(json!({"Id": "c2", "Validity": "PENDING"})).unwrap();
        assert_eq!(card.validity, Some(CardValidity::Unknown));
        let registration =
            CardRegistration::from_payload(json!({"Id": "cr2", "Status": "EXPIRED"})).unwrap();
        assert_eq!(registration.status, Some(CardRegistrationStatus::Unknown));
    }

    #[test]
    fn registration_update_sends_registration_data() {
        let registration = CardRegistration {
            id: Some("cr1".into()),
            access_key: Some("1X0m87dmM2LiwFgxPLBJ".into()),
            card_registration_url: Some("https://tokenizer.example".into()),
            registration_data: Some("data=abc".into()),
            ..Default::default()
        };
        let data = build_request_data(&registration).unwrap();
        assert_eq!(serde_json::Value::Object(data), json!({"RegistrationData": "data=abc"}));
    }
}
