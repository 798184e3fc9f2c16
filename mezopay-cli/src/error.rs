//! Error types for the command-line tool.

use std::path::PathBuf;

/// Errors that stop a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The SDK configuration is invalid.
    #[error(transparent)]
    Config(#[from] mezopay::ConfigError),

    /// A payment or balance operation failed.
    #[error(transparent)]
    Payment(#[from] mezopay::PaymentError),

    /// An amount could not be converted.
    #[error(transparent)]
    Amount(#[from] mezopay::AmountError),

    /// The wallet or node could not be used.
    #[error(transparent)]
    Ledger(#[from] mezopay_evm::EvmLedgerError),

    /// The input is not a `musd:pay` URI.
    #[error("not a valid musd:pay URI: {0}")]
    InvalidUri(String),

    /// A balance was requested without an address or connected wallet.
    #[error("pass --address or configure a private key")]
    NoAccount,

    /// The payment URI could not be rendered as a QR code.
    #[error(transparent)]
    Qr(#[from] mezopay::qr::QrRenderError),

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFile {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Output serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
