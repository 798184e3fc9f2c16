//! Command-line arguments.
//!
//! Every global option can also be set through its `MEZOPAY_*` environment
//! variable; a `.env` file in the working directory is loaded first.

use std::path::PathBuf;

use alloy_primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use mezopay::MezoPayConfig;
use mezopay::amount::MUSD_DECIMALS;
use mezopay::networks::ChainId;
use mezopay::qr::DEFAULT_QR_SIZE;

/// Accept MUSD payments on Mezo.
#[derive(Parser, Debug)]
#[command(name = "mezopay", version, about)]
pub struct Cli {
    /// SDK options shared by all commands.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options used to build the SDK configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Wallet connection project ID.
    #[arg(long, env = "MEZOPAY_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    /// Application name reported to wallets.
    #[arg(long, env = "MEZOPAY_APP_NAME", global = true)]
    pub app_name: Option<String>,

    /// Chain ID (31611 testnet, 31612 mainnet).
    #[arg(long, env = "MEZOPAY_CHAIN_ID", global = true)]
    pub chain_id: Option<ChainId>,

    /// JSON-RPC endpoint overriding the network default.
    #[arg(long, env = "MEZOPAY_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Merchant address used when `--to` is omitted.
    #[arg(long, env = "MEZOPAY_MERCHANT_ADDRESS", global = true)]
    pub merchant_address: Option<Address>,

    /// Hex private key of the paying wallet.
    #[arg(long, env = "MEZOPAY_PRIVATE_KEY", global = true, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Seconds to wait for a transfer receipt.
    #[arg(long, env = "MEZOPAY_RECEIPT_TIMEOUT_SECS", global = true)]
    pub receipt_timeout_secs: Option<u64>,

    /// Block confirmations required for a transfer.
    #[arg(long, env = "MEZOPAY_CONFIRMATIONS", global = true)]
    pub confirmations: Option<u64>,
}

impl GlobalArgs {
    /// Builds the SDK configuration. A missing project ID is left empty and
    /// rejected when the configuration is resolved.
    #[must_use]
    pub fn config(&self) -> MezoPayConfig {
        MezoPayConfig {
            project_id: self.project_id.clone().unwrap_or_default(),
            app_name: self.app_name.clone(),
            chain_id: self.chain_id,
            rpc_url: self.rpc_url.clone(),
            merchant_address: self.merchant_address,
            receipt_timeout_secs: self.receipt_timeout_secs,
            confirmations: self.confirmations,
        }
    }
}

/// Payment request fields given on the command line.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Recipient address (defaults to the merchant address).
    #[arg(long)]
    pub to: Option<String>,

    /// Amount in MUSD, e.g. `100.5`.
    #[arg(long)]
    pub amount: String,

    /// Memo shown to the payer.
    #[arg(long)]
    pub memo: Option<String>,

    /// Merchant order reference.
    #[arg(long)]
    pub order_id: Option<String>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Encode a payment request as a `musd:pay` URI for a QR code.
    Qr {
        /// The payment request.
        #[command(flatten)]
        request: RequestArgs,

        /// Also render the QR code as SVG into this file (`-` embeds it in the output).
        #[arg(long, value_name = "PATH")]
        svg: Option<PathBuf>,

        /// Minimum edge length of the rendered QR code, in pixels.
        #[arg(long, default_value_t = DEFAULT_QR_SIZE)]
        size: u32,
    },

    /// Decode a scanned `musd:pay` URI.
    Parse {
        /// The payment URI.
        uri: String,
    },

    /// Convert a decimal amount into base units.
    ToUnits {
        /// Decimal amount, e.g. `100.5`.
        amount: String,
        /// Token decimals.
        #[arg(long, default_value_t = MUSD_DECIMALS)]
        decimals: u8,
    },

    /// Convert base units into a decimal amount.
    FromUnits {
        /// Integer amount in base units.
        value: U256,
        /// Token decimals.
        #[arg(long, default_value_t = MUSD_DECIMALS)]
        decimals: u8,
    },

    /// Check whether a string is a valid `0x` address.
    Validate {
        /// The address to check.
        address: String,
    },

    /// Read a MUSD balance.
    Balance {
        /// Account to read (defaults to the connected wallet).
        #[arg(long)]
        address: Option<Address>,
    },

    /// Send a MUSD payment and wait for its receipt.
    Pay {
        /// The payment request.
        #[command(flatten)]
        request: RequestArgs,

        /// Return as soon as the transfer is submitted.
        #[arg(long)]
        no_wait: bool,
    },
}

/// Parses `argv` ignoring the `MEZOPAY_*` environment.
#[cfg(test)]
pub fn parse_without_env<I, T>(argv: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::{CommandFactory, FromArgMatches};

    let matches = Cli::command()
        .mut_args(|arg| arg.env(None))
        .try_get_matches_from(argv)?;
    Cli::from_arg_matches(&matches)
}
