use super::write_options;
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{Deposit, DepositPaymentStatus, IdempotencyKey};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct Deposits {
    dispatcher: Arc<Dispatcher>,
}

impl Deposits {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(&self, deposit: &Deposit, key: Option<&IdempotencyKey>) -> Result<Deposit> {
        let options = write_options(key)?.with_model(deposit)?;
        self.dispatcher.call_model(Endpoint::DepositsCreate, options).await
    }

    pub async fn get(&self, deposit_id: &str) -> Result<Deposit> {
        self.dispatcher
            .call_model(Endpoint::DepositsGet, RequestOptions::new().id(deposit_id))
            .await
    }

    /// Releases the held funds.
    pub async fn cancel(&self, deposit_id: &str) -> Result<Deposit> {
        let options = RequestOptions::new()
            .id(deposit_id)
            .with_json(&json!({ "PaymentStatus": DepositPaymentStatus::Canceled }))?;
        self.dispatcher.call_model(Endpoint::DepositsCancel, options).await
    }
}
