use super::{require_id, write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{Card, IdempotencyKey, Transaction, User, UserLegal, UserNatural, Wallet};
use std::sync::Arc;

#[derive(Clone)]
pub struct Users {
    dispatcher: Arc<Dispatcher>,
}

impl Users {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Creates a user of either kind; the returned `Id` is server-assigned.
    pub async fn create(&self, user: &User, key: Option<&IdempotencyKey>) -> Result<User> {
        match user {
            User::Natural(u) => self.create_natural(u, key).await.map(User::Natural),
            User::Legal(u) => self.create_legal(u, key).await.map(User::Legal),
        }
    }

    pub async fn create_natural(&self, user: &UserNatural, key: Option<&IdempotencyKey>) -> Result<UserNatural> {
        let options = write_options(key)?.with_model(user)?;
        self.dispatcher.call_model(Endpoint::UsersCreateNatural, options).await
    }

    pub async fn create_legal(&self, user: &UserLegal, key: Option<&IdempotencyKey>) -> Result<UserLegal> {
        let options = write_options(key)?.with_model(user)?;
        self.dispatcher.call_model(Endpoint::UsersCreateLegal, options).await
    }

    pub async fn update(&self, user: &User) -> Result<User> {
        match user {
            User::Natural(u) => self.update_natural(u).await.map(User::Natural),
            User::Legal(u) => self.update_legal(u).await.map(User::Legal),
        }
    }

    pub async fn update_natural(&self, user: &UserNatural) -> Result<UserNatural> {
        let id = require_id(&user.id, "user")?;
        let options = RequestOptions::new().id(id).with_model(user)?;
        self.dispatcher.call_model(Endpoint::UsersUpdateNatural, options).await
    }

    pub async fn update_legal(&self, user: &UserLegal) -> Result<UserLegal> {
        let id = require_id(&user.id, "user")?;
        let options = RequestOptions::new().id(id).with_model(user)?;
        self.dispatcher.call_model(Endpoint::UsersUpdateLegal, options).await
    }

    pub async fn get(&self, user_id: &str) -> Result<User> {
        self.dispatcher
            .call_model(Endpoint::UsersGet, RequestOptions::new().id(user_id))
            .await
    }

    pub async fn get_natural(&self, user_id: &str) -> Result<UserNatural> {
        self.dispatcher
            .call_model(Endpoint::UsersGetNatural, RequestOptions::new().id(user_id))
            .await
    }

    pub async fn get_legal(&self, user_id: &str) -> Result<UserLegal> {
        self.dispatcher
            .call_model(Endpoint::UsersGetLegal, RequestOptions::new().id(user_id))
            .await
    }

    pub async fn get_all(&self, list: &ListOptions) -> Result<Vec<User>> {
        self.dispatcher
            .call_models(Endpoint::UsersAll, list.apply(RequestOptions::new()))
            .await
    }

    pub async fn get_wallets(&self, user_id: &str, list: &ListOptions) -> Result<Vec<Wallet>> {
        let options = list.apply(RequestOptions::new().id(user_id));
        self.dispatcher.call_models(Endpoint::UsersWallets, options).await
    }

    pub async fn get_cards(&self, user_id: &str, list: &ListOptions) -> Result<Vec<Card>> {
        let options = list.apply(RequestOptions::new().id(user_id));
        self.dispatcher.call_models(Endpoint::UsersCards, options).await
    }

    pub async fn get_transactions(&self, user_id: &str, list: &ListOptions) -> Result<Vec<Transaction>> {
        let options = list.apply(RequestOptions::new().id(user_id));
        self.dispatcher.call_models(Endpoint::UsersTransactions, options).await
    }
}
