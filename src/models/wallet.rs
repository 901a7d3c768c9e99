use super::{Model, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Wallet {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub creation_date: Option<i64>,
    pub owners: Option<Vec<String>>,
    pub description: Option<String>,
    pub balance: Option<Money>,
    pub currency: Option<String>,
    pub funds_type: Option<String>,
}

impl Wallet {
    pub fn new(owner_id: impl Into<String>, currency: impl Into<String>, description: impl Into<String>) -> Self {
        Wallet {
            owners: Some(vec![owner_id.into()]),
            currency: Some(currency.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

impl Model for Wallet {
    const NAME: &'static str = "Wallet";

    fn read_only_properties() -> &'static [&'static str] {
        &["Id", "CreationDate", "Balance", "FundsType"]
    }
}
