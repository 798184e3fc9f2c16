//! [`TokenLedger`] over an alloy HTTP provider.
//!
//! Reads go through a filler-less provider. Transfers build a signing
//! provider per call from the connected [`WalletSession`], so connecting or
//! disconnecting a wallet never requires rebuilding the ledger.

use std::time::Duration;

use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{
    DynProvider, PendingTransactionBuilder, PendingTransactionError, Provider, ProviderBuilder,
};
use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;
use mezopay::networks::ChainId;
use mezopay::{ConfigError, MezoPay, MezoPayConfig, ReceiptStatus, ResolvedConfig, TokenLedger};
use url::Url;

use crate::contract::IERC20;
use crate::wallet::WalletSession;

/// Errors returned by [`EvmLedger`].
#[derive(Debug, thiserror::Error)]
pub enum EvmLedgerError {
    /// A contract call or transaction submission failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// Waiting for a receipt failed or timed out.
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    /// A plain RPC request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The private key could not be loaded.
    #[error(transparent)]
    Signer(#[from] LocalSignerError),
    /// A transfer was attempted without a connected wallet.
    #[error("no wallet connected")]
    NotConnected,
}

/// MUSD ledger backed by a JSON-RPC node.
#[derive(Debug, Clone)]
pub struct EvmLedger {
    provider: DynProvider,
    rpc_url: Url,
    wallet: WalletSession,
    confirmations: u64,
    receipt_timeout: Duration,
}

impl EvmLedger {
    /// Creates a ledger talking to the configured RPC endpoint.
    #[must_use]
    pub fn new(config: &ResolvedConfig, wallet: WalletSession) -> Self {
        #[cfg(feature = "telemetry")]
        tracing::info!(
            chain = config.chain_id(),
            rpc_url = %config.rpc_url,
            account = ?wallet.account(),
            "Using EVM ledger"
        );
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(config.rpc_url.clone())
            .erased();
        Self {
            provider,
            rpc_url: config.rpc_url.clone(),
            wallet,
            confirmations: config.confirmations,
            receipt_timeout: config.receipt_timeout,
        }
    }

    /// The wallet session.
    #[must_use]
    pub const fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    /// Mutable access to the wallet session.
    pub const fn wallet_mut(&mut self) -> &mut WalletSession {
        &mut self.wallet
    }

    /// The read-only provider.
    #[must_use]
    pub const fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Chain ID reported by the node.
    ///
    /// # Errors
    ///
    /// Returns [`EvmLedgerError::Transport`] if the RPC request fails.
    pub async fn node_chain_id(&self) -> Result<ChainId, EvmLedgerError> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Reads `decimals()` of an ERC-20 token.
    ///
    /// # Errors
    ///
    /// Returns [`EvmLedgerError::Contract`] if the call fails.
    pub async fn token_decimals(&self, token: Address) -> Result<u8, EvmLedgerError> {
        Ok(IERC20::new(token, &self.provider).decimals().call().await?)
    }

    /// Reads `symbol()` of an ERC-20 token.
    ///
    /// # Errors
    ///
    /// Returns [`EvmLedgerError::Contract`] if the call fails.
    pub async fn token_symbol(&self, token: Address) -> Result<String, EvmLedgerError> {
        Ok(IERC20::new(token, &self.provider).symbol().call().await?)
    }
}

impl TokenLedger for EvmLedger {
    type Error = EvmLedgerError;

    fn account(&self) -> Option<Address> {
        self.wallet.account()
    }

    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "erc20.balanceOf", skip_all, fields(%owner, %token), err)
    )]
    async fn read_balance(&self, owner: Address, token: Address) -> Result<U256, Self::Error> {
        Ok(IERC20::new(token, &self.provider)
            .balanceOf(owner)
            .call()
            .await?)
    }

    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "erc20.transfer", skip_all, fields(%token, %to, %amount), err)
    )]
    async fn submit_transfer(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<TxHash, Self::Error> {
        let wallet = self
            .wallet
            .ethereum_wallet()
            .ok_or(EvmLedgerError::NotConnected)?;
        let signer = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.clone());
        let pending = IERC20::new(token, &signer)
            .transfer(to, amount)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "erc20.receipt", skip(self), err)
    )]
    async fn await_receipt(&self, transaction_hash: TxHash) -> Result<ReceiptStatus, Self::Error> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), transaction_hash)
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await?;
        if ReceiptResponse::status(&receipt) {
            Ok(ReceiptStatus::Success)
        } else {
            Ok(ReceiptStatus::Reverted)
        }
    }
}

/// Builds an SDK instance backed by an [`EvmLedger`].
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` does not resolve.
pub fn connect(
    config: &MezoPayConfig,
    wallet: WalletSession,
) -> Result<MezoPay<EvmLedger>, ConfigError> {
    let resolved = config.resolve()?;
    let ledger = EvmLedger::new(&resolved, wallet);
    Ok(MezoPay::new(resolved, ledger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};
    use alloy_sol_types::{SolCall, SolValue};
    use mezopay::PaymentError;
    use serde_json::{Value, json};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const HOLDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    /// Answers `eth_call` by function selector and `eth_chainId` with Mezo Testnet.
    struct FakeNode {
        balance: U256,
    }

    impl Respond for FakeNode {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            let result = match body["method"].as_str() {
                Some("eth_chainId") => json!("0x7b7b"),
                Some("eth_call") => {
                    let tx = &body["params"][0];
                    let input = tx["input"].as_str().or_else(|| tx["data"].as_str()).unwrap();
                    let selector = hex::decode(&input[2..10]).unwrap();
                    let output = if selector == IERC20::balanceOfCall::SELECTOR {
                        self.balance.abi_encode()
                    } else if selector == IERC20::decimalsCall::SELECTOR {
                        <alloy_sol_types::sol_data::Uint<8> as alloy_sol_types::SolType>::abi_encode(&18_u8)
                    } else {
                        "MUSD".to_owned().abi_encode()
                    };
                    json!(hex::encode_prefixed(output))
                }
                other => panic!("unexpected method {other:?}"),
            };
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "result": result,
            }))
        }
    }

    /// Fails every request with a JSON-RPC error.
    struct FailingNode;

    impl Respond for FailingNode {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": { "code": -32000, "message": "header not found" },
            }))
        }
    }

    async fn sdk_against(server: &MockServer, wallet: WalletSession) -> MezoPay<EvmLedger> {
        let config = MezoPayConfig::new("test-project").with_rpc_url(server.uri());
        connect(&config, wallet).unwrap()
    }

    #[tokio::test]
    async fn test_get_balance_via_eth_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(FakeNode {
                balance: U256::from(1_250_000_000_000_000_000_u128),
            })
            .mount(&server)
            .await;

        let sdk = sdk_against(&server, WalletSession::new()).await;
        let balance = sdk.get_balance(HOLDER).await.unwrap();
        assert_eq!(balance.formatted, "1.25");
        assert_eq!(balance.value, U256::from(1_250_000_000_000_000_000_u128));
    }

    #[tokio::test]
    async fn test_token_metadata_and_chain_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(FakeNode { balance: U256::ZERO })
            .mount(&server)
            .await;

        let sdk = sdk_against(&server, WalletSession::new()).await;
        let ledger = sdk.ledger();
        assert_eq!(ledger.token_decimals(sdk.musd_address()).await.unwrap(), 18);
        assert_eq!(ledger.token_symbol(sdk.musd_address()).await.unwrap(), "MUSD");
        assert_eq!(ledger.node_chain_id().await.unwrap(), sdk.chain_id());
    }

    #[tokio::test]
    async fn test_connected_balance_uses_wallet_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(FakeNode {
                balance: U256::from(7_u8),
            })
            .mount(&server)
            .await;

        let sdk = sdk_against(&server, WalletSession::from_private_key(ANVIL_KEY).unwrap()).await;
        assert_eq!(sdk.wallet().address, Some(HOLDER));
        let balance = sdk.connected_balance().await.unwrap().unwrap();
        assert_eq!(balance.value, U256::from(7_u8));
    }

    #[tokio::test]
    async fn test_rpc_error_becomes_balance_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(FailingNode)
            .mount(&server)
            .await;

        let sdk = sdk_against(&server, WalletSession::new()).await;
        let err = sdk.get_balance(HOLDER).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::BalanceFetch(ref msg) if msg.contains("header not found")
        ));
    }

    #[tokio::test]
    async fn test_transfer_requires_wallet() {
        let server = MockServer::start().await;
        let mut sdk = sdk_against(&server, WalletSession::new()).await;

        let err = sdk
            .ledger()
            .submit_transfer(sdk.musd_address(), HOLDER, U256::from(1_u8))
            .await
            .unwrap_err();
        assert!(matches!(err, EvmLedgerError::NotConnected));

        sdk.ledger_mut()
            .wallet_mut()
            .connect(ANVIL_KEY.parse().unwrap());
        assert!(sdk.wallet().is_connected);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn test_connect_rejects_missing_project_id() {
        let err = connect(&MezoPayConfig::default(), WalletSession::new()).unwrap_err();
        assert_eq!(err, ConfigError::MissingProjectId);
    }
}
