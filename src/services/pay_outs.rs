use super::{write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{IdempotencyKey, PayOut, PayOutPaymentDetails, Refund};
use std::sync::Arc;

#[derive(Clone)]
pub struct PayOuts {
    dispatcher: Arc<Dispatcher>,
}

impl PayOuts {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(&self, pay_out: &PayOut, key: Option<&IdempotencyKey>) -> Result<PayOut> {
        let endpoint = match &pay_out.mean_of_payment_details {
            Some(PayOutPaymentDetails::BankWire(_)) => Endpoint::PayOutsBankWireCreate,
            None => return Err(Error::InvalidRequest("pay-out needs payment details".into())),
        };
        let mut pay_out = pay_out.clone();
        pay_out.payment_type = pay_out.mean_of_payment_details.as_ref().map(PayOutPaymentDetails::payment_type);
        let options = write_options(key)?.with_model(&pay_out)?;
        self.dispatcher.call_model(endpoint, options).await
    }

    pub async fn get(&self, pay_out_id: &str) -> Result<PayOut> {
        self.dispatcher
            .call_model(Endpoint::PayOutsGet, RequestOptions::new().id(pay_out_id))
            .await
    }

    pub async fn get_refunds(&self, pay_out_id: &str, list: &ListOptions) -> Result<Vec<Refund>> {
        let options = list.apply(RequestOptions::new().id(pay_out_id));
        self.dispatcher.call_models(Endpoint::PayOutsRefunds, options).await
    }
}
