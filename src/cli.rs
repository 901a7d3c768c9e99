use clap::{Arg, ArgAction, Command};

pub const RESOURCES: [&str; 9] = [
    "user",
    "wallet",
    "payin",
    "payout",
    "card",
    "card-registration",
    "refund",
    "deposit",
    "transfer",
];

pub fn build_cli() -> Command {
    Command::new("mangopay")
        .about("MANGOPAY API client (credentials from MANGOPAY_* env vars)")
        .disable_version_flag(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .global(true)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("authorize").about("Fetch a token and print its type and expiry"))
        .subcommand(
            Command::new("get")
                .about("Fetch one resource and print it as JSON")
                .arg(
                    Arg::new("resource")
                        .required(true)
                        .value_parser(RESOURCES),
                )
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("rate-limits")
                .about("Fetch a user and print the resulting rate-limit snapshot")
                .arg(Arg::new("user-id").required(true)),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Explicit level wins, then RUST_LOG, then warn (stdout carries JSON).
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("warn"));
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(lvl) = level {
        builder.parse_filters(lvl);
    }
    builder.target(env_logger::Target::Stderr).init();
}
