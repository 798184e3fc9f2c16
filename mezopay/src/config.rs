//! SDK configuration.
//!
//! [`MezoPayConfig`] is what applications provide (it deserializes from the
//! same camelCase keys the JavaScript SDK accepts). [`MezoPayConfig::resolve`]
//! validates it once and produces a read-only [`ResolvedConfig`] holding the
//! selected network, RPC endpoint and token address.
//!
//! # Example
//!
//! ```rust
//! use mezopay::config::MezoPayConfig;
//! use mezopay::networks::MEZO_TESTNET_CHAIN_ID;
//!
//! let config: MezoPayConfig = serde_json::from_str(r#"{
//!     "projectId": "my-walletconnect-project",
//!     "appName": "My Store",
//!     "chainId": 31611
//! }"#).unwrap();
//!
//! let resolved = config.resolve().unwrap();
//! assert_eq!(resolved.network.chain_id, MEZO_TESTNET_CHAIN_ID);
//! assert_eq!(resolved.rpc_url.as_str(), "https://rpc.test.mezo.org/");
//! ```

use std::time::Duration;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::networks::{ChainId, MEZO_MAINNET, MEZO_TESTNET, MezoNetwork, network_by_chain_id};
use crate::payment::PaymentRequest;

/// Default application name shown by wallets.
pub const DEFAULT_APP_NAME: &str = "MezoPay Merchant";

/// Default number of seconds to wait for a transfer receipt.
pub const DEFAULT_RECEIPT_TIMEOUT_SECS: u64 = 60;

/// Default number of block confirmations required for a transfer.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Options accepted when initializing the SDK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MezoPayConfig {
    /// Wallet connection project ID. Required.
    #[serde(default)]
    pub project_id: String,

    /// Application name for wallet connection (default: `"MezoPay Merchant"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Chain ID (default: 31611, Mezo Testnet).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,

    /// Custom RPC URL overriding the network default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Merchant wallet receiving payments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_address: Option<Address>,

    /// Seconds to wait for a transfer receipt (default: 60).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_timeout_secs: Option<u64>,

    /// Block confirmations required before a transfer counts as confirmed (default: 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
}

impl MezoPayConfig {
    /// Creates a configuration with only the project ID set.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// Sets the application name.
    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Sets the chain ID.
    #[must_use]
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Sets a custom RPC URL.
    #[must_use]
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Sets the merchant address.
    #[must_use]
    pub fn with_merchant_address(mut self, merchant: Address) -> Self {
        self.merchant_address = Some(merchant);
        self
    }

    /// Validates the configuration and selects the network.
    ///
    /// A chain ID other than Mezo Mainnet falls back to Mezo Testnet.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingProjectId`] if `project_id` is blank and
    /// [`ConfigError::InvalidRpcUrl`] if the RPC override does not parse.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let project_id = self.project_id.trim();
        if project_id.is_empty() {
            return Err(ConfigError::MissingProjectId);
        }

        let network = match self.chain_id {
            None => &MEZO_TESTNET,
            Some(id) => match network_by_chain_id(id) {
                Some(network) => network,
                None => {
                    #[cfg(feature = "telemetry")]
                    tracing::warn!(
                        chain_id = id,
                        fallback = MEZO_TESTNET.chain_id,
                        "Unsupported chain ID, using Mezo Testnet"
                    );
                    &MEZO_TESTNET
                }
            },
        };

        let rpc_url = self
            .rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(network.rpc_url);
        let rpc_url = Url::parse(rpc_url).map_err(|e| ConfigError::InvalidRpcUrl {
            url: rpc_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(ResolvedConfig {
            project_id: project_id.to_owned(),
            app_name: self
                .app_name
                .clone()
                .unwrap_or_else(|| DEFAULT_APP_NAME.to_owned()),
            network,
            rpc_url,
            musd_address: network.musd_address,
            merchant_address: self.merchant_address,
            receipt_timeout: Duration::from_secs(
                self.receipt_timeout_secs
                    .unwrap_or(DEFAULT_RECEIPT_TIMEOUT_SECS),
            ),
            confirmations: self.confirmations.unwrap_or(DEFAULT_CONFIRMATIONS),
        })
    }
}

/// Validated configuration, fixed for the lifetime of an SDK instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Wallet connection project ID.
    pub project_id: String,
    /// Application name.
    pub app_name: String,
    /// Selected network.
    pub network: &'static MezoNetwork,
    /// Effective JSON-RPC endpoint.
    pub rpc_url: Url,
    /// MUSD contract on the selected network.
    pub musd_address: Address,
    /// Default payment recipient.
    pub merchant_address: Option<Address>,
    /// How long to wait for a transfer receipt.
    pub receipt_timeout: Duration,
    /// Block confirmations required for a transfer.
    pub confirmations: u64,
}

impl ResolvedConfig {
    /// Chain ID of the selected network.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.network.chain_id
    }

    /// Whether the selected network is Mezo Mainnet.
    #[must_use]
    pub fn is_mainnet(&self) -> bool {
        self.network.chain_id == MEZO_MAINNET.chain_id
    }

    /// Builds a payment request addressed to the configured merchant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingMerchant`] if no merchant address is set.
    pub fn payment_request(
        &self,
        amount: impl Into<String>,
        memo: Option<String>,
        order_id: Option<String>,
    ) -> Result<PaymentRequest, ConfigError> {
        let merchant = self.merchant_address.ok_or(ConfigError::MissingMerchant)?;
        Ok(PaymentRequest {
            to: merchant.to_checksum(None),
            amount: amount.into(),
            memo,
            order_id,
        })
    }
}
