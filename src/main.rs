//! Definitive $VVV airdrop claim console.
//!
//! Talks to a locally running wallet over JSON-RPC, moves it onto Base, and
//! submits the claim transaction through the caller's vault proxy.

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

mod config;
mod error;
mod tx;
mod ui;
mod wallet;

use config::DEFAULT_WALLET_ENDPOINT;
use ui::Console;
use wallet::HttpWallet;

#[derive(Parser, Debug)]
#[command(
    name = "vault-claim",
    version,
    about = "Interactive console for claiming the Definitive $VVV airdrop"
)]
struct Args {
    /// Wallet JSON-RPC endpoint.
    #[arg(long, default_value = DEFAULT_WALLET_ENDPOINT)]
    endpoint: String,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("Starting vault-claim v{}", env!("CARGO_PKG_VERSION"));

    let wallet = HttpWallet::new(&args.endpoint)?;
    let mut console = Console::new(wallet, args.endpoint, std::io::stdout());
    console.run(BufReader::new(tokio::io::stdin())).await?;

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_directives = if verbose {
        "info,vault_claim=debug"
    } else {
        "warn,vault_claim=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Logs go to stderr; stdout belongs to the console itself.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
