use super::{decode, Model, Money, Transaction};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PAY_IN_READ_ONLY: &[&str] = &[
    "Id",
    "CreationDate",
    "CreditedFunds",
    "Status",
    "ResultCode",
    "ResultMessage",
    "ExecutionDate",
    "Type",
    "Nature",
    "RedirectURL",
    "SecureModeRedirectURL",
    "SecureModeNeeded",
    "WireReference",
    "BankAccount",
];

/// `Other` keeps a payment type this client has no details model for, so it
/// is written back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayInPaymentType {
    Card,
    BankWire,
    DirectDebit,
    #[serde(rename = "PREAUTHORIZED")]
    PreAuthorized,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayInExecutionType {
    Web,
    Direct,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct CardPaymentDetails {
    pub card_type: Option<String>,
    pub card_id: Option<String>,
    pub statement_descriptor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BankWirePaymentDetails {
    pub declared_debited_funds: Option<Money>,
    pub declared_fees: Option<Money>,
    /// Filled in by the server: account the user must wire funds to.
    pub bank_account: Option<Value>,
    pub wire_reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectDebitPaymentDetails {
    pub direct_debit_type: Option<String>,
    pub mandate_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct PreAuthorizedPaymentDetails {
    pub preauthorization_id: Option<String>,
}

/// Payment-method half of a pay-in. Inlined into the pay-in on the wire and
/// discriminated by `PaymentType`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PayInPaymentDetails {
    Card(CardPaymentDetails),
    BankWire(BankWirePaymentDetails),
    DirectDebit(DirectDebitPaymentDetails),
    PreAuthorized(PreAuthorizedPaymentDetails),
}

impl PayInPaymentDetails {
    pub fn payment_type(&self) -> PayInPaymentType {
        match self {
            PayInPaymentDetails::Card(_) => PayInPaymentType::Card,
            PayInPaymentDetails::BankWire(_) => PayInPaymentType::BankWire,
            PayInPaymentDetails::DirectDebit(_) => PayInPaymentType::DirectDebit,
            PayInPaymentDetails::PreAuthorized(_) => PayInPaymentType::PreAuthorized,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct WebExecutionDetails {
    #[serde(rename = "ReturnURL")]
    pub return_url: Option<String>,
    #[serde(rename = "RedirectURL")]
    pub redirect_url: Option<String>,
    #[serde(rename = "TemplateURL")]
    pub template_url: Option<String>,
    pub culture: Option<String>,
    pub secure_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct DirectExecutionDetails {
    #[serde(rename = "SecureModeReturnURL")]
    pub secure_mode_return_url: Option<String>,
    #[serde(rename = "SecureModeRedirectURL")]
    pub secure_mode_redirect_url: Option<String>,
    pub secure_mode_needed: Option<bool>,
    pub secure_mode: Option<String>,
    pub culture: Option<String>,
    pub ip_address: Option<String>,
}

/// Execution half of a pay-in, discriminated by `ExecutionType`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PayInExecutionDetails {
    Web(WebExecutionDetails),
    Direct(DirectExecutionDetails),
}

impl PayInExecutionDetails {
    pub fn execution_type(&self) -> PayInExecutionType {
        match self {
            PayInExecutionDetails::Web(_) => PayInExecutionType::Web,
            PayInExecutionDetails::Direct(_) => PayInExecutionType::Direct,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct PayIn {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub payment_type: Option<PayInPaymentType>,
    pub execution_type: Option<PayInExecutionType>,
    #[serde(skip_deserializing)]
    pub payment_details: Option<PayInPaymentDetails>,
    #[serde(skip_deserializing)]
    pub execution_details: Option<PayInExecutionDetails>,
}

impl PayIn {
    /// Card pay-in executed directly with an already registered card.
    pub fn card_direct(
        author_id: impl Into<String>,
        credited_wallet_id: impl Into<String>,
        debited_funds: Money,
        fees: Money,
        card_id: impl Into<String>,
        secure_mode_return_url: impl Into<String>,
    ) -> Self {
        PayIn {
            transaction: Transaction {
                author_id: Some(author_id.into()),
                credited_wallet_id: Some(credited_wallet_id.into()),
                debited_funds: Some(debited_funds),
                fees: Some(fees),
                ..Default::default()
            },
            payment_details: Some(PayInPaymentDetails::Card(CardPaymentDetails {
                card_id: Some(card_id.into()),
                ..Default::default()
            })),
            execution_details: Some(PayInExecutionDetails::Direct(DirectExecutionDetails {
                secure_mode_return_url: Some(secure_mode_return_url.into()),
                ..Default::default()
            })),
            ..Default::default()
        }
    }

    /// Sets `PaymentType`/`ExecutionType` from the nested variants.
    pub fn sync_discriminators(&mut self) {
        if let Some(details) = &self.payment_details {
            self.payment_type = Some(details.payment_type());
        }
        if let Some(details) = &self.execution_details {
            self.execution_type = Some(details.execution_type());
        }
    }
}

impl Model for PayIn {
    const NAME: &'static str = "PayIn";

    fn read_only_properties() -> &'static [&'static str] {
        PAY_IN_READ_ONLY
    }

    fn sub_request_properties() -> &'static [&'static str] {
        &["PaymentDetails", "ExecutionDetails"]
    }

    fn from_payload(payload: Value) -> Result<Self> {
        let mut pay_in: PayIn = decode(Self::NAME, &payload)?;
        pay_in.payment_details = match &pay_in.payment_type {
            Some(PayInPaymentType::Card) => Some(PayInPaymentDetails::Card(decode(Self::NAME, &payload)?)),
            Some(PayInPaymentType::BankWire) => {
                Some(PayInPaymentDetails::BankWire(decode(Self::NAME, &payload)?))
            }
            Some(PayInPaymentType::DirectDebit) => {
                Some(PayInPaymentDetails::DirectDebit(decode(Self::NAME, &payload)?))
            }
            Some(PayInPaymentType::PreAuthorized) => {
                Some(PayInPaymentDetails::PreAuthorized(decode(Self::NAME, &payload)?))
            }
            Some(PayInPaymentType::Other(_)) | None => None,
        };
        pay_in.execution_details = match &pay_in.execution_type {
            Some(PayInExecutionType::Web) => Some(PayInExecutionDetails::Web(decode(Self::NAME, &payload)?)),
            Some(PayInExecutionType::Direct) => {
                Some(PayInExecutionDetails::Direct(decode(Self::NAME, &payload)?))
            }
            Some(PayInExecutionType::Other(_)) | None => None,
        };
        Ok(pay_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::build_request_data;
    use serde_json::json;

    #[test]
    fn flat_payload_rebuilds_nested_variants() {
        let pay_in = PayIn::from_payload(json!({
            "Id": "p1",
            "AuthorId": "u1",
            "CreditedWalletId": "w1",
            "PaymentType": "CARD",
            "ExecutionType": "WEB",
            "CardType": "CB_VISA_MASTERCARD",
            "ReturnURL": "https://example.com/return",
            "RedirectURL": "https://pay.example/redirect",
            "Culture": "FR"
        }))
        .unwrap();
        assert_eq!(pay_in.transaction.id.as_deref(), Some("p1"));
        match pay_in.payment_details {
            Some(PayInPaymentDetails::Card(ref card)) => {
                assert_eq!(card.card_type.as_deref(), Some("CB_VISA_MASTERCARD"))
            }
            ref other => panic!("unexpected payment details: {:?}", other),
        }
        match pay_in.execution_details {
            Some(PayInExecutionDetails::Web(ref web)) => {
                assert_eq!(web.redirect_url.as_deref(), Some("https://pay.example/redirect"));
                assert_eq!(web.culture.as_deref(), Some("FR"));
            }
            ref other => panic!("unexpected execution details: {:?}", other),
        }
    }

    #[test]
    fn bank_wire_details_keep_declared_funds() {
        let pay_in = PayIn::from_payload(json!({
            "PaymentType": "BANK_WIRE",
            "ExecutionType": "DIRECT",
            "DeclaredDebitedFunds": {"Currency": "EUR", "Amount": 5000},
            "DeclaredFees": {"Currency": "EUR", "Amount": 0},
            "WireReference": "4a57980154"
        }))
        .unwrap();
        let Some(PayInPaymentDetails::BankWire(details)) = pay_in.payment_details else {
            panic!("expected bank wire details");
        };
        assert_eq!(details.declared_debited_funds, Some(Money::new("EUR", 5000)));
        assert_eq!(details.wire_reference.as_deref(), Some("4a57980154"));
    }

    #[test]
    fn no_discriminator_means_no_details() {
        let pay_in = PayIn::from_payload(json!({"Id": "p2"})).unwrap();
        assert!(pay_in.payment_details.is_none());
        assert!(pay_in.execution_details.is_none());
    }

    #[test]
    fn unrecognised_payment_type_is_kept_without_details() {
        let pay_in = PayIn::from_payload(json!({
            "Id": "p3",
            "PaymentType": "PAYPAL",
            "ExecutionType": "WEB",
            "ReturnURL": "https://example.com/return"
        }))
        .unwrap();
        assert_eq!(pay_in.payment_type, Some(PayInPaymentType::Other("PAYPAL".into())));
        assert!(pay_in.payment_details.is_none());
        assert!(matches!(pay_in.execution_details, Some(PayInExecutionDetails::Web(_))));

        let out = serde_json::to_value(&pay_in).unwrap();
        assert_eq!(out["PaymentType"], json!("PAYPAL"));
    }

    #[test]
    fn card_direct_request_is_flat() {
        let mut pay_in = PayIn::card_direct(
            "u1",
            "w1",
            Money::new("EUR", 1000),
            Money::new("EUR", 10),
            "c1",
            "https://example.com/back",
        );
        pay_in.sync_discriminators();
        let data = build_request_data(&pay_in).unwrap();
        assert_eq!(data["PaymentType"], json!("CARD"));
        assert_eq!(data["ExecutionType"], json!("DIRECT"));
        assert_eq!(data["CardId"], json!("c1"));
        assert_eq!(data["SecureModeReturnURL"], json!("https://example.com/back"));
        assert_eq!(data["DebitedFunds"], json!({"Currency": "EUR", "Amount": 1000}));
    }
}
