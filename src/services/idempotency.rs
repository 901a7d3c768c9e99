use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{IdempotencyKey, IdempotencyResponse};
use std::sync::Arc;

#[derive(Clone)]
pub struct Idempotency {
    dispatcher: Arc<Dispatcher>,
}

impl Idempotency {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Stored response of the write made with `key`.
    pub async fn get(&self, key: &IdempotencyKey) -> Result<IdempotencyResponse> {
        let options = RequestOptions::new().path_param("key", key.as_str());
        self.dispatcher.call_model(Endpoint::IdempotencyGet, options).await
    }
}
