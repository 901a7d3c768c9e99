use super::{Model, Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct RefundReason {
    pub refund_reason_type: Option<String>,
    pub refund_reason_message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Refund {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub initial_transaction_id: Option<String>,
    pub initial_transaction_type: Option<String>,
    pub refund_reason: Option<RefundReason>,
}

impl Refund {
    /// Full refund of the initial transaction, attributed to `author_id`.
    pub fn full(author_id: impl Into<String>) -> Self {
        Refund {
            transaction: Transaction {
                author_id: Some(author_id.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl Model for Refund {
    const NAME: &'static str = "Refund";

    fn read_only_properties() -> &'static [&'static str] {
        &[
            "Id",
            "CreationDate",
            "CreditedFunds",
            "Status",
            "ResultCode",
            "ResultMessage",
            "ExecutionDate",
            "Type",
            "Nature",
            "InitialTransactionId",
            "InitialTransactionType",
            "RefundReason",
        ]
    }
}
