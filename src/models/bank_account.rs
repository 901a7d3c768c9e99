use super::{decode, Address, Model};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BankAccountType {
    Iban,
    Gb,
    Us,
    Ca,
    Other,
}

impl BankAccountType {
    /// Path segment of the creation endpoint for this account type.
    pub fn path_segment(self) -> &'static str {
        match self {
            BankAccountType::Iban => "iban",
            BankAccountType::Gb => "gb",
            BankAccountType::Us => "us",
            BankAccountType::Ca => "ca",
            BankAccountType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IbanDetails {
    #[serde(rename = "IBAN")]
    pub iban: Option<String>,
    #[serde(rename = "BIC")]
    pub bic: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct GbDetails {
    pub account_number: Option<String>,
    pub sort_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct UsDetails {
    pub account_number: Option<String>,
    #[serde(rename = "ABA")]
    pub aba: Option<String>,
    pub deposit_account_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CaDetails {
    pub bank_name: Option<String>,
    pub institution_number: Option<String>,
    pub branch_code: Option<String>,
    pub account_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct OtherDetails {
    pub country: Option<String>,
    #[serde(rename = "BIC")]
    pub bic: Option<String>,
    pub account_number: Option<String>,
}

/// Country-specific account coordinates, discriminated by `Type` on the wire.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BankAccountDetails {
    Iban(IbanDetails),
    Gb(GbDetails),
    Us(UsDetails),
    Ca(CaDetails),
    Other(OtherDetails),
}

impl BankAccountDetails {
    pub fn account_type(&self) -> BankAccountType {
        match self {
            BankAccountDetails::Iban(_) => BankAccountType::Iban,
            BankAccountDetails::Gb(_) => BankAccountType::Gb,
            BankAccountDetails::Us(_) => BankAccountType::Us,
            BankAccountDetails::Ca(_) => BankAccountType::Ca,
            BankAccountDetails::Other(_) => BankAccountType::Other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BankAccount {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub user_id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<BankAccountType>,
    pub owner_name: Option<String>,
    pub owner_address: Option<Address>,
    pub active: Option<bool>,
    #[serde(skip_deserializing)]
    pub details: Option<BankAccountDetails>,
}

impl BankAccount {
    pub fn new(owner_name: impl Into<String>, owner_address: Address, details: BankAccountDetails) -> Self {
        BankAccount {
            kind: Some(details.account_type()),
            owner_name: Some(owner_name.into()),
            owner_address: Some(owner_address),
            details: Some(details),
            ..Default::default()
        }
    }

    /// Account type, taken from the details when `Type` was not set.
    pub fn account_type(&self) -> Option<BankAccountType> {
        self.kind.or_else(|| self.details.as_ref().map(BankAccountDetails::account_type))
    }
}

impl Model for BankAccount {
    const NAME: &'static str = "BankAccount";

    fn read_only_properties() -> &'static [&'static str] {
        &["Id", "CreationDate", "UserId", "Active"]
    }

    fn sub_request_properties() -> &'static [&'static str] {
        &["Details"]
    }

    fn from_payload(payload: Value) -> Result<Self> {
        let mut account: BankAccount = decode(Self::NAME, &payload)?;
        account.details = match account.kind {
            Some(BankAccountType::Iban) => Some(BankAccountDetails::Iban(decode(Self::NAME, &payload)?)),
            Some(BankAccountType::Gb) => Some(BankAccountDetails::Gb(decode(Self::NAME, &payload)?)),
            Some(BankAccountType::Us) => Some(BankAccountDetails::Us(decode(Self::NAME, &payload)?)),
            Some(BankAccountType::Ca) => Some(BankAccountDetails::Ca(decode(Self::NAME, &payload)?)),
            Some(BankAccountType::Other) => {
                Some(BankAccountDetails::Other(decode(Self::NAME, &payload)?))
            }
            None => None,
        };
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gb_account_hydrates_from_flat_payload() {
        let account = BankAccount::from_payload(json!({
            "Id": "b1",
            "UserId": "u1",
            "Type": "GB",
            "OwnerName": "John Smith",
            "AccountNumber": "63956474",
            "SortCode": "200000",
            "Active": true
        }))
        .unwrap();
        assert_eq!(account.account_type(), Some(BankAccountType::Gb));
        assert_eq!(
            account.details,
            Some(BankAccountDetails::Gb(GbDetails {
                account_number: Some("63956474".into()),
                sort_code: Some("200000".into()),
            }))
        );
        assert_eq!(account.active, Some(true));
    }

    #[test]
    fn account_type_falls_back_to_details() {
        let account = BankAccount {
            details: Some(BankAccountDetails::Us(UsDetails::default())),
            ..Default::default()
        };
        assert_eq!(account.account_type(), Some(BankAccountType::Us));
        assert_eq!(BankAccountType::Us.path_segment(), "us");
    }
}
