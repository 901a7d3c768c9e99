mod cli;

use anyhow::Context;
use mangopay::{Config, Mangopay};
use serde_json::{json, Value};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    cli::init_logging(log_level.as_deref());

    if matches.get_flag("version") {
        println!("mangopay {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = Config::from_env().map_err(anyhow::Error::msg)?;
    let api = Mangopay::new(cfg)?;

    let output = match matches.subcommand() {
        Some(("authorize", _)) => {
            let payload = api.authorize().await?;
            json!({
                "token_type": payload.token_type,
                "expires_in": payload.expires_in,
                "expires_at": api.dispatcher().token_expires_at().map(|t| t.to_rfc3339()),
            })
        }
        Some(("get", sub)) => {
            let resource = sub.get_one::<String>("resource").context("resource is required")?;
            let id = sub.get_one::<String>("id").context("id is required")?;
            fetch(&api, resource, id).await?
        }
        Some(("rate-limits", sub)) => {
            let user_id = sub.get_one::<String>("user-id").context("user id is required")?;
            api.users.get(user_id).await?;
            serde_json::to_value(api.rate_limits())?
        }
        _ => {
            cli::build_cli().print_help()?;
            return Ok(());
        }
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn fetch(api: &Mangopay, resource: &str, id: &str) -> anyhow::Result<Value> {
    let value = match resource {
        "user" => serde_json::to_value(api.users.get(id).await?)?,
        "wallet" => serde_json::to_value(api.wallets.get(id).await?)?,
        "payin" => serde_json::to_value(api.pay_ins.get(id).await?)?,
        "payout" => serde_json::to_value(api.pay_outs.get(id).await?)?,
        "card" => serde_json::to_value(api.cards.get(id).await?)?,
        "card-registration" => serde_json::to_value(api.card_registrations.get(id).await?)?,
        "refund" => serde_json::to_value(api.refunds.get(id).await?)?,
        "deposit" => serde_json::to_value(api.deposits.get(id).await?)?,
        "transfer" => serde_json::to_value(api.transfers.get(id).await?)?,
        other => anyhow::bail!("unknown resource: {}", other),
    };
    Ok(value)
}
