//! Error types for the MezoPay SDK.
//!
//! Decoding a payment URI never fails with an error: an unusable URI is
//! reported as `None` by [`uri::decode`](crate::uri::decode).

use crate::amount::AmountError;

/// Errors raised while building an SDK instance from a
/// [`MezoPayConfig`](crate::config::MezoPayConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The wallet connection `projectId` is absent or blank.
    #[error("WalletConnect projectId is required")]
    MissingProjectId,

    /// The `rpcUrl` override is not a valid URL.
    #[error("invalid RPC URL {url:?}: {reason}")]
    InvalidRpcUrl {
        /// The rejected value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A merchant-addressed request was built without a `merchantAddress`.
    #[error("no merchant address configured")]
    MissingMerchant,
}

/// Errors raised by payment, balance and amount operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// A required request field is empty.
    #[error("Recipient address and amount are required (missing `{0}`)")]
    MissingField(&'static str),

    /// The recipient is not a canonical `0x` address.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// The amount cannot be converted into base units.
    #[error("{0}")]
    InvalidAmount(#[from] AmountError),

    /// A transfer was attempted without a connected wallet.
    #[error("Please connect your wallet first")]
    WalletNotConnected,

    /// The ledger rejected or failed to submit the transfer.
    #[error("Failed to submit transfer: {0}")]
    Transfer(String),

    /// The ledger failed to read a balance.
    #[error("Failed to fetch balance: {0}")]
    BalanceFetch(String),
}
