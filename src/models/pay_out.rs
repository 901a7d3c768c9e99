use super::{decode, Model, Transaction, TRANSACTION_READ_ONLY};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayOutPaymentType {
    BankWire,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct BankWirePayOutDetails {
    pub bank_account_id: Option<String>,
    pub bank_wire_ref: Option<String>,
    pub payout_mode_requested: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PayOutPaymentDetails {
    BankWire(BankWirePayOutDetails),
}

impl PayOutPaymentDetails {
    pub fn payment_type(&self) -> PayOutPaymentType {
        match self {
            PayOutPaymentDetails::BankWire(_) => PayOutPaymentType::BankWire,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct PayOut {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub payment_type: Option<PayOutPaymentType>,
    #[serde(skip_deserializing)]
    pub mean_of_payment_details: Option<PayOutPaymentDetails>,
}

impl PayOut {
    pub fn bank_wire(
        author_id: impl Into<String>,
        debited_wallet_id: impl Into<String>,
        debited_funds: super::Money,
        fees: super::Money,
        bank_account_id: impl Into<String>,
    ) -> Self {
        PayOut {
            transaction: Transaction {
                author_id: Some(author_id.into()),
                debited_wallet_id: Some(debited_wallet_id.into()),
                debited_funds: Some(debited_funds),
                fees: Some(fees),
                ..Default::default()
            },
            payment_type: Some(PayOutPaymentType::BankWire),
            mean_of_payment_details: Some(PayOutPaymentDetails::BankWire(BankWirePayOutDetails {
                bank_account_id: Some(bank_account_id.into()),
                ..Default::default()
            })),
        }
    }
}

impl Model for PayOut {
    const NAME: &'static str = "PayOut";

    fn read_only_properties() -> &'static [&'static str] {
        TRANSACTION_READ_ONLY
    }

    fn sub_request_properties() -> &'static [&'static str] {
        &["MeanOfPaymentDetails"]
    }

    fn from_payload(payload: Value) -> Result<Self> {
        let mut pay_out: PayOut = decode(Self::NAME, &payload)?;
        pay_out.mean_of_payment_details = match pay_out.payment_type {
            Some(PayOutPaymentType::BankWire) => {
                Some(PayOutPaymentDetails::BankWire(decode(Self::NAME, &payload)?))
            }
            None => None,
        };
        Ok(pay_out)
    }
}
