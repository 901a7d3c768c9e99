use super::{require_id, write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{IdempotencyKey, Transaction, Wallet};
use std::sync::Arc;

#[derive(Clone)]
pub struct Wallets {
    dispatcher: Arc<Dispatcher>,
}

impl Wallets {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(&self, wallet: &Wallet, key: Option<&IdempotencyKey>) -> Result<Wallet> {
        let options = write_options(key)?.with_model(wallet)?;
        self.dispatcher.call_model(Endpoint::WalletsCreate, options).await
    }

    pub async fn update(&self, wallet: &Wallet) -> Result<Wallet> {
        let id = require_id(&wallet.id, "wallet")?;
        let options = RequestOptions::new().id(id).with_model(wallet)?;
        self.dispatcher.call_model(Endpoint::WalletsUpdate, options).await
    }

    pub async fn get(&self, wallet_id: &str) -> Result<Wallet> {
        self.dispatcher
            .call_model(Endpoint::WalletsGet, RequestOptions::new().id(wallet_id))
            .await
    }

    pub async fn get_transactions(&self, wallet_id: &str, list: &ListOptions) -> Result<Vec<Transaction>> {
        let options = list.apply(RequestOptions::new().id(wallet_id));
        self.dispatcher.call_models(Endpoint::WalletsTransactions, options).await
    }
}
