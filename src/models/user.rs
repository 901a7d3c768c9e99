use super::{decode, Address, Model};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const USER_READ_ONLY: &[&str] = &[
    "Id",
    "CreationDate",
    "PersonType",
    "KYCLevel",
    "ProofOfIdentity",
    "ProofOfAddress",
    "ProofOfRegistration",
    "ShareholderDeclaration",
    "Statute",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonType {
    Natural,
    Legal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycLevel {
    Light,
    Regular,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserCategory {
    Payer,
    Owner,
    #[serde(other)]
    Unknown,
}

/// Written back on updates, so a value this client does not know is kept as
/// sent by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalPersonType {
    Business,
    Organization,
    Soletrader,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserNatural {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub person_type: Option<PersonType>,
    #[serde(rename = "KYCLevel")]
    pub kyc_level: Option<KycLevel>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<Address>,
    pub birthday: Option<i64>,
    pub nationality: Option<String>,
    pub country_of_residence: Option<String>,
    pub occupation: Option<String>,
    pub income_range: Option<u8>,
    pub proof_of_identity: Option<String>,
    pub proof_of_address: Option<String>,
    pub terms_and_conditions_accepted: Option<bool>,
    pub user_category: Option<UserCategory>,
}

impl UserNatural {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        UserNatural {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
            ..Default::default()
        }
    }
}

impl Model for UserNatural {
    const NAME: &'static str = "UserNatural";

    fn read_only_properties() -> &'static [&'static str] {
        USER_READ_ONLY
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserLegal {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub person_type: Option<PersonType>,
    #[serde(rename = "KYCLevel")]
    pub kyc_level: Option<KycLevel>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub legal_person_type: Option<LegalPersonType>,
    pub headquarters_address: Option<Address>,
    pub legal_representative_first_name: Option<String>,
    pub legal_representative_last_name: Option<String>,
    pub legal_representative_email: Option<String>,
    pub legal_representative_birthday: Option<i64>,
    pub legal_representative_nationality: Option<String>,
    pub legal_representative_country_of_residence: Option<String>,
    pub legal_representative_address: Option<Address>,
    pub company_number: Option<String>,
    pub proof_of_registration: Option<String>,
    pub shareholder_declaration: Option<String>,
    pub statute: Option<String>,
    pub terms_and_conditions_accepted: Option<bool>,
    pub user_category: Option<UserCategory>,
}

impl Model for UserLegal {
    const NAME: &'static str = "UserLegal";

    fn read_only_properties() -> &'static [&'static str] {
        USER_READ_ONLY
    }
}

/// A user of either kind, as returned by the untyped user endpoints.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum User {
    Natural(UserNatural),
    Legal(UserLegal),
}

impl User {
    pub fn id(&self) -> Option<&str> {
        match self {
            User::Natural(u) => u.id.as_deref(),
            User::Legal(u) => u.id.as_deref(),
        }
    }

    pub fn person_type(&self) -> PersonType {
        match self {
            User::Natural(_) => PersonType::Natural,
            User::Legal(_) => PersonType::Legal,
        }
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        User::from_payload(payload).map_err(serde::de::Error::custom)
    }
}

impl Model for User {
    const NAME: &'static str = "User";

    fn read_only_properties() -> &'static [&'static str] {
        USER_READ_ONLY
    }

    fn from_payload(payload: Value) -> Result<Self> {
        let person_type = payload.get("PersonType").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<PersonType>(person_type) {
            Ok(PersonType::Natural) => Ok(User::Natural(decode(Self::NAME, &payload)?)),
            Ok(PersonType::Legal) => Ok(User::Legal(decode(Self::NAME, &payload)?)),
            Err(source) => Err(Error::Model {
                model: Self::NAME,
                source,
            }),
        }
    }
}
