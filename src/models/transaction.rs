use super::{Model, Money};
use serde::{Deserialize, Serialize};

/// Fields the server owns on every money movement.
pub const TRANSACTION_READ_ONLY: &[&str] = &[
    "Id",
    "CreationDate",
    "CreditedFunds",
    "Status",
    "ResultCode",
    "ResultMessage",
    "ExecutionDate",
    "Type",
    "Nature",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Created,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Payin,
    Payout,
    Transfer,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionNature {
    Regular,
    Refund,
    Repudiation,
    Settlement,
    #[serde(other)]
    Unknown,
}

/// Common shape of pay-ins, pay-outs, transfers and refunds. Also the item
/// type of the user/wallet/card transaction listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Transaction {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub author_id: Option<String>,
    pub credited_user_id: Option<String>,
    pub debited_funds: Option<Money>,
    pub credited_funds: Option<Money>,
    pub fees: Option<Money>,
    pub debited_wallet_id: Option<String>,
    pub credited_wallet_id: Option<String>,
    pub status: Option<TransactionStatus>,
    pub result_code: Option<String>,
    pub result_message: Option<String>,
    pub execution_date: Option<i64>,
    #[serde(rename = "Type")]
    pub kind: Option<TransactionType>,
    pub nature: Option<TransactionNature>,
}

impl Model for Transaction {
    const NAME: &'static str = "Transaction";

    fn read_only_properties() -> &'static [&'static str] {
        TRANSACTION_READ_ONLY
    }
}

/// Money moved between two wallets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Transfer {
    #[serde(flatten)]
    pub transaction: Transaction,
}

impl Model for Transfer {
    const NAME: &'static str = "Transfer";

    fn read_only_properties() -> &'static [&'static str] {
        TRANSACTION_READ_ONLY
    }
}
