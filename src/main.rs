use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CRATES: [&str; 7] = [
    "slipway",
    "slipway_cli",
    "slipway_core",
    "slipway_db",
    "slipway_executor",
    "slipway_migration",
    "slipway_sql",
];

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = slipway_cli::Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = slipway_cli::run(cli).await {
        slipway_cli::error_view::print(&err);
        std::process::exit(err.exit_code());
    }
}

/// `RUST_LOG` wins; otherwise `level` applies to slipway's own crates only.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        CRATES
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(",")
            .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
