use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::Refund;
use std::sync::Arc;

#[derive(Clone)]
pub struct Refunds {
    dispatcher: Arc<Dispatcher>,
}

impl Refunds {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn get(&self, refund_id: &str) -> Result<Refund> {
        self.dispatcher
            .call_model(Endpoint::RefundsGet, RequestOptions::new().id(refund_id))
            .await
    }
}
