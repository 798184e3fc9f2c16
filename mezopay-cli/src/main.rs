//! MUSD payment tool for Mezo merchants.
//!
//! # Usage
//!
//! ```bash
//! # Payment URI for a QR code
//! mezopay --merchant-address 0x... qr --amount 100.5 --order-id ORDER-123
//!
//! # Balance of the configured wallet
//! MEZOPAY_PROJECT_ID=... MEZOPAY_PRIVATE_KEY=0x... mezopay balance
//!
//! # Configure logging level
//! RUST_LOG=debug mezopay pay --to 0x... --amount 5
//! ```
//!
//! # Environment Variables
//!
//! - `MEZOPAY_PROJECT_ID` - Wallet connection project ID
//! - `MEZOPAY_CHAIN_ID` - Chain ID (default: `31611`)
//! - `MEZOPAY_RPC_URL` - RPC endpoint override
//! - `MEZOPAY_MERCHANT_ADDRESS` - Default payment recipient
//! - `MEZOPAY_PRIVATE_KEY` - Paying wallet key
//! - `RUST_LOG` - Log level filter (default: `info`)

use clap::Parser;
use mezopay_cli::{Cli, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(cli).await {
        Ok(output) => {
            print_json(&output.value);
            if !output.success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_json(value: &serde_json::Value) {
    println!("{value:#}");
}
