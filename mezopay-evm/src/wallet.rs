//! Local wallet session.
//!
//! Stands in for a browser wallet connection: a [`WalletSession`] is either
//! connected to one private-key signer or disconnected.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_signer_local::{LocalSignerError, PrivateKeySigner};
use mezopay::WalletConnection;

/// The wallet that signs payments, if one is connected.
#[derive(Debug, Clone, Default)]
pub struct WalletSession {
    signer: Option<PrivateKeySigner>,
}

impl WalletSession {
    /// A disconnected session.
    #[must_use]
    pub const fn new() -> Self {
        Self { signer: None }
    }

    /// A session connected to `signer`.
    #[must_use]
    pub const fn connected(signer: PrivateKeySigner) -> Self {
        Self {
            signer: Some(signer),
        }
    }

    /// A session connected to the signer for a hex-encoded private key.
    ///
    /// # Errors
    ///
    /// Returns [`LocalSignerError`] if the key is not a valid secp256k1 key.
    pub fn from_private_key(private_key: &str) -> Result<Self, LocalSignerError> {
        Ok(Self::connected(private_key.trim().parse()?))
    }

    /// Connects `signer`, replacing any previous one.
    pub fn connect(&mut self, signer: PrivateKeySigner) {
        #[cfg(feature = "telemetry")]
        tracing::debug!(account = %signer.address(), "Wallet connected");
        self.signer = Some(signer);
    }

    /// Drops the connected signer.
    pub fn disconnect(&mut self) {
        self.signer = None;
    }

    /// Address of the connected account.
    #[must_use]
    pub fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(PrivateKeySigner::address)
    }

    /// Whether a signer is connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    /// Snapshot of the session.
    #[must_use]
    pub fn state(&self) -> WalletConnection {
        WalletConnection {
            address: self.account(),
            is_connected: self.is_connected(),
        }
    }

    /// Signing wallet for transaction submission.
    pub(crate) fn ethereum_wallet(&self) -> Option<EthereumWallet> {
        self.signer.clone().map(EthereumWallet::from)
    }
}
