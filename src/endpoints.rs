//! Static catalog of the REST operations this client knows about.
//!
//! Every template is relative to the configured base URL. `{apiVersion}` and
//! `{clientId}` come from the config; any other `{name}` must be supplied as
//! a path parameter on the request.

use crate::error::{Error, Result};
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub method: Method,
    pub template: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AuthorizationToken,

    UsersCreateNatural,
    UsersCreateLegal,
    UsersUpdateNatural,
    UsersUpdateLegal,
    UsersGet,
    UsersGetNatural,
    UsersGetLegal,
    UsersAll,
    UsersWallets,
    UsersCards,
    UsersTransactions,

    BankAccountsCreate,
    BankAccountsGetAll,
    BankAccountsGet,
    BankAccountsUpdate,

    WalletsCreate,
    WalletsUpdate,
    WalletsGet,
    WalletsTransactions,

    CardRegistrationsCreate,
    CardRegistrationsGet,
    CardRegistrationsUpdate,

    CardsGet,
    CardsUpdate,
    CardsTransactions,
    CardsByFingerprint,

    PayInsCardWeb,
    PayInsCardDirect,
    PayInsPreAuthorizedDirect,
    PayInsBankWireDirect,
    PayInsDirectDebitWeb,
    PayInsGet,
    PayInsCreateRefund,
    PayInsRefunds,

    PayOutsBankWireCreate,
    PayOutsGet,
    PayOutsRefunds,

    TransfersCreate,
    TransfersGet,
    TransfersCreateRefund,
    TransfersRefunds,

    RefundsGet,

    DepositsCreate,
    DepositsGet,
    DepositsCancel,

    IdempotencyGet,
}

impl Endpoint {
    pub fn descriptor(self) -> EndpointDescriptor {
        use Endpoint::*;
        let (method, template) = match self {
            AuthorizationToken => (Method::POST, "/{apiVersion}/oauth/token"),

            UsersCreateNatural => (Method::POST, "/{apiVersion}/{clientId}/users/natural"),
            UsersCreateLegal => (Method::POST, "/{apiVersion}/{clientId}/users/legal"),
            UsersUpdateNatural => (Method::PUT, "/{apiVersion}/{clientId}/users/natural/{id}"),
            UsersUpdateLegal => (Method::PUT, "/{apiVersion}/{clientId}/users/legal/{id}"),
            UsersGet => (Method::GET, "/{apiVersion}/{clientId}/users/{id}"),
            UsersGetNatural => (Method::GET, "/{apiVersion}/{clientId}/users/natural/{id}"),
            UsersGetLegal => (Method::GET, "/{apiVersion}/{clientId}/users/legal/{id}"),
            UsersAll => (Method::GET, "/{apiVersion}/{clientId}/users"),
            UsersWallets => (Method::GET, "/{apiVersion}/{clientId}/users/{id}/wallets"),
            UsersCards => (Method::GET, "/{apiVersion}/{clientId}/users/{id}/cards"),
            UsersTransactions => (Method::GET, "/{apiVersion}/{clientId}/users/{id}/transactions"),

            BankAccountsCreate => (
                Method::POST,
                "/{apiVersion}/{clientId}/users/{userId}/bankaccounts/{type}",
            ),
            BankAccountsGetAll => (Method::GET, "/{apiVersion}/{clientId}/users/{userId}/bankaccounts"),
            BankAccountsGet => (
                Method::GET,
                "/{apiVersion}/{clientId}/users/{userId}/bankaccounts/{id}",
            ),
            BankAccountsUpdate => (
                Method::PUT,
                "/{apiVersion}/{clientId}/users/{userId}/bankaccounts/{id}",
            ),

            WalletsCreate => (Method::POST, "/{apiVersion}/{clientId}/wallets"),
            WalletsUpdate => (Method::PUT, "/{apiVersion}/{clientId}/wallets/{id}"),
            WalletsGet => (Method::GET, "/{apiVersion}/{clientId}/wallets/{id}"),
            WalletsTransactions => (Method::GET, "/{apiVersion}/{clientId}/wallets/{id}/transactions"),

            CardRegistrationsCreate => (Method::POST, "/{apiVersion}/{clientId}/CardRegistrations"),
            CardRegistrationsGet => (Method::GET, "/{apiVersion}/{clientId}/CardRegistrations/{id}"),
            CardRegistrationsUpdate => (Method::PUT, "/{apiVersion}/{clientId}/CardRegistrations/{id}"),

            CardsGet => (Method::GET, "/{apiVersion}/{clientId}/cards/{id}"),
            CardsUpdate => (Method::PUT, "/{apiVersion}/{clientId}/cards/{id}"),
            CardsTransactions => (Method::GET, "/{apiVersion}/{clientId}/cards/{id}/transactions"),
            CardsByFingerprint => (
                Method::GET,
                "/{apiVersion}/{clientId}/cards/fingerprints/{fingerprint}",
            ),

            PayInsCardWeb => (Method::POST, "/{apiVersion}/{clientId}/payins/card/web"),
            PayInsCardDirect => (Method::POST, "/{apiVersion}/{clientId}/payins/card/direct"),
            PayInsPreAuthorizedDirect => (
                Method::POST,
                "/{apiVersion}/{clientId}/payins/PreAuthorized/direct",
            ),
            PayInsBankWireDirect => (Method::POST, "/{apiVersion}/{clientId}/payins/bankwire/direct"),
            PayInsDirectDebitWeb => (Method::POST, "/{apiVersion}/{clientId}/payins/directdebit/web"),
            PayInsGet => (Method::GET, "/{apiVersion}/{clientId}/payins/{id}"),
            PayInsCreateRefund => (Method::POST, "/{apiVersion}/{clientId}/payins/{id}/refunds"),
            PayInsRefunds => (Method::GET, "/{apiVersion}/{clientId}/payins/{id}/refunds"),

            PayOutsBankWireCreate => (Method::POST, "/{apiVersion}/{clientId}/payouts/bankwire"),
            PayOutsGet => (Method::GET, "/{apiVersion}/{clientId}/payouts/{id}"),
            PayOutsRefunds => (Method::GET, "/{apiVersion}/{clientId}/payouts/{id}/refunds"),

            TransfersCreate => (Method::POST, "/{apiVersion}/{clientId}/transfers"),
            TransfersGet => (Method::GET, "/{apiVersion}/{clientId}/transfers/{id}"),
            TransfersCreateRefund => (Method::POST, "/{apiVersion}/{clientId}/transfers/{id}/refunds"),
            TransfersRefunds => (Method::GET, "/{apiVersion}/{clientId}/transfers/{id}/refunds"),

            RefundsGet => (Method::GET, "/{apiVersion}/{clientId}/refunds/{id}"),

            DepositsCreate => (
                Method::POST,
                "/{apiVersion}/{clientId}/deposit-preauthorizations/card/direct",
            ),
            DepositsGet => (Method::GET, "/{apiVersion}/{clientId}/deposit-preauthorizations/{id}"),
            DepositsCancel => (Method::PUT, "/{apiVersion}/{clientId}/deposit-preauthorizations/{id}"),

            IdempotencyGet => (Method::GET, "/{apiVersion}/{clientId}/responses/{key}"),
        };
        EndpointDescriptor { method, template }
    }
}

/// Substitutes `{name}` placeholders in `template`.
///
/// Values are percent-encoded as single path segments. A placeholder with no
/// value fails with [`Error::MissingPathParam`].
pub fn render_path(template: &str, params: &BTreeMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            // Unbalanced brace; keep it literal.
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let name = &after[..end];
        let value = params
            .get(name)
            .ok_or_else(|| Error::MissingPathParam(name.to_string()))?;
        out.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
