use super::{write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{IdempotencyKey, Refund, Transfer};
use std::sync::Arc;

#[derive(Clone)]
pub struct Transfers {
    dispatcher: Arc<Dispatcher>,
}

impl Transfers {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(&self, transfer: &Transfer, key: Option<&IdempotencyKey>) -> Result<Transfer> {
        let options = write_options(key)?.with_model(transfer)?;
        self.dispatcher.call_model(Endpoint::TransfersCreate, options).await
    }

    pub async fn get(&self, transfer_id: &str) -> Result<Transfer> {
        self.dispatcher
            .call_model(Endpoint::TransfersGet, RequestOptions::new().id(transfer_id))
            .await
    }

    pub async fn create_refund(
        &self,
        transfer_id: &str,
        refund: &Refund,
        key: Option<&IdempotencyKey>,
    ) -> Result<Refund> {
        let options = write_options(key)?.id(transfer_id).with_model(refund)?;
        self.dispatcher.call_model(Endpoint::TransfersCreateRefund, options).await
    }

    pub async fn get_refunds(&self, transfer_id: &str, list: &ListOptions) -> Result<Vec<Refund>> {
        let options = list.apply(RequestOptions::new().id(transfer_id));
        self.dispatcher.call_models(Endpoint::TransfersRefunds, options).await
    }
}
