use super::{write_options, ListOptions};
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::http::{Dispatcher, RequestOptions};
use crate::models::{
    IdempotencyKey, PayIn, PayInExecutionDetails as Exec, PayInPaymentDetails as Payment, Refund,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct PayIns {
    dispatcher: Arc<Dispatcher>,
}

/// Creation endpoint for a pay-in's payment and execution variants.
pub(crate) fn create_endpoint(pay_in: &PayIn) -> Result<Endpoint> {
    match (&pay_in.payment_details, &pay_in.execution_details) {
        (Some(Payment::Card(_)), Some(Exec::Web(_))) => Ok(Endpoint::PayInsCardWeb),
        (Some(Payment::Card(_)), Some(Exec::Direct(_))) => Ok(Endpoint::PayInsCardDirect),
        (Some(Payment::PreAuthorized(_)), Some(Exec::Direct(_))) => Ok(Endpoint::PayInsPreAuthorizedDirect),
        (Some(Payment::BankWire(_)), Some(Exec::Direct(_))) => Ok(Endpoint::PayInsBankWireDirect),
        (Some(Payment::DirectDebit(_)), Some(Exec::Web(_))) => Ok(Endpoint::PayInsDirectDebitWeb),
        (Some(payment), Some(exec)) => Err(Error::InvalidRequest(format!(
            "no pay-in endpoint for {:?} with {:?} execution",
            payment.payment_type(),
            exec.execution_type()
        ))),
        _ => Err(Error::InvalidRequest(
            "pay-in needs both payment and execution details".into(),
        )),
    }
}

impl PayIns {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn create(&self, pay_in: &PayIn, key: Option<&IdempotencyKey>) -> Result<PayIn> {
        let endpoint = create_endpoint(pay_in)?;
        let mut pay_in = pay_in.clone();
        pay_in.sync_discriminators();
        let options = write_options(key)?.with_model(&pay_in)?;
        self.dispatcher.call_model(endpoint, options).await
    }

    pub async fn get(&self, pay_in_id: &str) -> Result<PayIn> {
        self.dispatcher
            .call_model(Endpoint::PayInsGet, RequestOptions::new().id(pay_in_id))
            .await
    }

    /// Refunds a pay-in; leave `DebitedFunds`/`Fees` unset for a full refund.
    pub async fn create_refund(
        &self,
        pay_in_id: &str,
        refund: &Refund,
        key: Option<&IdempotencyKey>,
    ) -> Result<Refund> {
        let options = write_options(key)?.id(pay_in_id).with_model(refund)?;
        self.dispatcher.call_model(Endpoint::PayInsCreateRefund, options).await
    }

    pub async fn get_refunds(&self, pay_in_id: &str, list: &ListOptions) -> Result<Vec<Refund>> {
        let options = list.apply(RequestOptions::new().id(pay_in_id));
        self.dispatcher.call_models(Endpoint::PayInsRefunds, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BankWirePaymentDetails, CardPaymentDetails, DirectExecutionDetails, PreAuthorizedPaymentDetails,
        WebExecutionDetails,
    };

    fn pay_in(payment: Option<Payment>, exec: Option<Exec>) -> PayIn {
        PayIn {
            payment_details: payment,
            execution_details: exec,
            ..Default::default()
        }
    }

    #[test]
    fn endpoint_follows_payment_and_execution() {
        let card = || Some(Payment::Card(CardPaymentDetails::default()));
        let web = || Some(Exec::Web(WebExecutionDetails::default()));
        let direct = || Some(Exec::Direct(DirectExecutionDetails::default()));
        assert_eq!(create_endpoint(&pay_in(card(), web())).unwrap(), Endpoint::PayInsCardWeb);
        assert_eq!(create_endpoint(&pay_in(card(), direct())).unwrap(), Endpoint::PayInsCardDirect);
        assert_eq!(
            create_endpoint(&pay_in(
                Some(Payment::PreAuthorized(PreAuthorizedPaymentDetails::default())),
                direct()
            ))
            .unwrap(),
            Endpoint::PayInsPreAuthorizedDirect
        );
        assert_eq!(
            create_endpoint(&pay_in(Some(Payment::BankWire(BankWirePaymentDetails::default())), direct())).unwrap(),
            Endpoint::PayInsBankWireDirect
        );
    }

    #[test]
    fn unsupported_combination_is_rejected() {
        let bank_wire_web = pay_in(
            Some(Payment::BankWire(BankWirePaymentDetails::default())),
            Some(Exec::Web(WebExecutionDetails::default())),
        );
        assert!(matches!(create_endpoint(&bank_wire_web), Err(Error::InvalidRequest(_))));
        assert!(matches!(create_endpoint(&PayIn::default()), Err(Error::InvalidRequest(_))));
    }
}
