use crate::config::Config;
use crate::error::Result;
use crate::http::{Dispatcher, RateLimits, TokenPayload};
use crate::services::*;
use std::sync::Arc;

/// Entry point: one session (token + rate limits) shared by every service.
///
/// ```no_run
/// # async fn demo() -> mangopay::Result<()> {
/// use mangopay::{models::UserNatural, Config, Mangopay};
///
/// let api = Mangopay::new(Config::new("my-client-id", "my-api-key"))?;
/// let user = api
///     .users
///     .create_natural(&UserNatural::new("Ann", "Lee", "ann@example.com"), None)
///     .await?;
/// println!("created user {:?}", user.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Mangopay {
    dispatcher: Arc<Dispatcher>,
    pub users: Users,
    pub bank_accounts: BankAccounts,
    pub wallets: Wallets,
    pub card_registrations: CardRegistrations,
    pub cards: Cards,
    pub pay_ins: PayIns,
    pub pay_outs: PayOuts,
    pub transfers: Transfers,
    pub refunds: Refunds,
    pub deposits: Deposits,
    pub idempotency: Idempotency,
}

impl Mangopay {
    pub fn new(cfg: Config) -> Result<Self> {
        let dispatcher = Arc::new(Dispatcher::new(cfg)?);
        Ok(Self {
            users: Users::new(dispatcher.clone()),
            bank_accounts: BankAccounts::new(dispatcher.clone()),
            wallets: Wallets::new(dispatcher.clone()),
            card_registrations: CardRegistrations::new(dispatcher.clone()),
            cards: Cards::new(dispatcher.clone()),
            pay_ins: PayIns::new(dispatcher.clone()),
            pay_outs: PayOuts::new(dispatcher.clone()),
            transfers: Transfers::new(dispatcher.clone()),
            refunds: Refunds::new(dispatcher.clone()),
            deposits: Deposits::new(dispatcher.clone()),
            idempotency: Idempotency::new(dispatcher.clone()),
            dispatcher,
        })
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub async fn authorize(&self) -> Result<TokenPayload> {
        self.dispatcher.authorize().await
    }

    pub fn rate_limits(&self) -> RateLimits {
        self.dispatcher.rate_limits()
    }
}
