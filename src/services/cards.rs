use super::{require_id, write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{Card, CardRegistration, IdempotencyKey, Transaction};
use std::sync::Arc;

#[derive(Clone)]
pub struct Cards {
    dispatcher: Arc<Dispatcher>,
}

impl Cards {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn get(&self, card_id: &str) -> Result<Card> {
        self.dispatcher
            .call_model(Endpoint::CardsGet, RequestOptions::new().id(card_id))
            .await
    }

    /// Cards cannot be reactivated once deactivated.
    pub async fn deactivate(&self, card_id: &str) -> Result<Card> {
        let card = Card {
            active: Some(false),
            ..Default::default()
        };
        let options = RequestOptions::new().id(card_id).with_model(&card)?;
        self.dispatcher.call_model(Endpoint::CardsUpdate, options).await
    }

    pub async fn get_transactions(&self, card_id: &str, list: &ListOptions) -> Result<Vec<Transaction>> {
        let options = list.apply(RequestOptions::new().id(card_id));
        self.dispatcher.call_models(Endpoint::CardsTransactions, options).await
    }

    /// All cards sharing the same underlying card number.
    pub async fn get_by_fingerprint(&self, fingerprint: &str, list: &ListOptions) -> Result<Vec<Card>> {
        let options = list.apply(RequestOptions::new().path_param("fingerprint", fingerprint));
        self.dispatcher.call_models(Endpoint::CardsByFingerprint, options).await
    }
}

#[derive(Clone)]
pub struct CardRegistrations {
    dispatcher: Arc<Dispatcher>,
}

impl CardRegistrations {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(
        &self,
        registration: &CardRegistration,
        key: Option<&IdempotencyKey>,
    ) -> Result<CardRegistration> {
        let options = write_options(key)?.with_model(registration)?;
        self.dispatcher.call_model(Endpoint::CardRegistrationsCreate, options).await
    }

    pub async fn get(&self, registration_id: &str) -> Result<CardRegistration> {
        self.dispatcher
            .call_model(Endpoint::CardRegistrationsGet, RequestOptions::new().id(registration_id))
            .await
    }

    /// Completes the registration with the tokenizer's `RegistrationData`.
    pub async fn update(&self, registration: &CardRegistration) -> Result<CardRegistration> {
        let id = require_id(&registration.id, "card registration")?;
        let options = RequestOptions::new().id(id).with_model(registration)?;
        self.dispatcher.call_model(Endpoint::CardRegistrationsUpdate, options).await
    }
}
