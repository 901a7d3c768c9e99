use super::{write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{BankAccount, IdempotencyKey};
use serde_json::json;
use std::sync::Arc;

/// Bank accounts registered on a user, the target of pay-outs.
#[derive(Clone)]
pub struct BankAccounts {
    dispatcher: Arc<Dispatcher>,
}

impl BankAccounts {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(
        &self,
        user_id: &str,
        account: &BankAccount,
        key: Option<&IdempotencyKey>,
    ) -> Result<BankAccount> {
        let kind = account
            .account_type()
            .ok_or_else(|| Error::InvalidRequest("bank account type or details are required".into()))?;
        let options = write_options(key)?
            .path_param("userId", user_id)
            .path_param("type", kind.path_segment())
            .with_model(account)?;
        self.dispatcher.call_model(Endpoint::BankAccountsCreate, options).await
    }

    pub async fn get(&self, user_id: &str, bank_account_id: &str) -> Result<BankAccount> {
        let options = RequestOptions::new()
            .path_param("userId", user_id)
            .id(bank_account_id);
        self.dispatcher.call_model(Endpoint::BankAccountsGet, options).await
    }

    pub async fn get_all(&self, user_id: &str, list: &ListOptions) -> Result<Vec<BankAccount>> {
        let options = list.apply(RequestOptions::new().path_param("userId", user_id));
        self.dispatcher.call_models(Endpoint::BankAccountsGetAll, options).await
    }

    /// Deactivation is permanent.
    pub async fn deactivate(&self, user_id: &str, bank_account_id: &str) -> Result<BankAccount> {
        let options = RequestOptions::new()
            .path_param("userId", user_id)
            .id(bank_account_id)
            .with_json(&json!({ "Active": false }))?;
        self.dispatcher.call_model(Endpoint::BankAccountsUpdate, options).await
    }
}
