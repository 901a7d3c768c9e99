use super::{Model, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositStatus {
    Created,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositPaymentStatus {
    Waiting,
    Canceled,
    Expired,
    Validated,
    NoShowRequested,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BrowserInfo {
    pub accept_header: Option<String>,
    pub java_enabled: Option<bool>,
    pub javascript_enabled: Option<bool>,
    pub language: Option<String>,
    pub color_depth: Option<u32>,
    pub screen_height: Option<u32>,
    pub screen_width: Option<u32>,
    pub time_zone_offset: Option<i32>,
    pub user_agent: Option<String>,
}

/// Card pre-authorization held as a deposit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Deposit {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub author_id: Option<String>,
    pub debited_funds: Option<Money>,
    pub card_id: Option<String>,
    #[serde(rename = "SecureModeReturnURL")]
    pub secure_mode_return_url: Option<String>,
    #[serde(rename = "SecureModeRedirectURL")]
    pub secure_mode_redirect_url: Option<String>,
    pub secure_mode_needed: Option<bool>,
    pub culture: Option<String>,
    pub ip_address: Option<String>,
    pub browser_info: Option<BrowserInfo>,
    pub status: Option<DepositStatus>,
    pub payment_status: Option<DepositPaymentStatus>,
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub authorization_date: Option<i64>,
    pub expiration_date: Option<i64>,
}

impl Model for Deposit {
    const NAME: &'static str = "Deposit";

    fn read_only_properties() -> &'static [&'static str] {
        &[
            "Id",
            "CreationDate",
            "SecureModeRedirectURL",
            "SecureModeNeeded",
            "Status",
            "PaymentStatus",
            "ResultCode",
            "ResultMessage",
            "AuthorizationDate",
            "ExpirationDate",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn statuses_outside_the_known_set_decode_as_unknown() {
        let deposit = Deposit::from_payload(json!({
            "Id": "d1",
            "Status": "SUCCEEDED",
            "PaymentStatus": "TO_BE_COMPLETED"
        }))
        .unwrap();
        assert_eq!(deposit.status, Some(DepositStatus::Succeeded));
        assert_eq!(deposit.payment_status, Some(DepositPaymentStatus::Unknown));
    }
}
