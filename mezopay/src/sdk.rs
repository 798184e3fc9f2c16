//! The MezoPay SDK facade.
//!
//! [`MezoPay`] ties a [`ResolvedConfig`] to a [`TokenLedger`] and exposes the
//! merchant-facing operations: payment URIs for QR codes, MUSD balances,
//! amount conversion and the two-step payment flow.
//!
//! # Payment flow
//!
//! 1. [`MezoPay::submit_payment`] validates the request, converts the amount,
//!    and submits an ERC-20 `transfer` on the network's MUSD contract. It
//!    returns a [`PaymentOutcome::Pending`] carrying the transaction hash.
//! 2. [`MezoPay::confirm_payment`] waits for the receipt and returns
//!    [`PaymentOutcome::Confirmed`] or [`PaymentOutcome::Failed`].
//!
//! [`MezoPay::pay`] runs both steps.

use alloy_primitives::{Address, U256};

use crate::address::parse_address;
use crate::amount::{AmountError, MUSD_DECIMALS, from_base_units, to_base_units};
use crate::config::{MezoPayConfig, ResolvedConfig};
use crate::error::{ConfigError, PaymentError};
use crate::ledger::{ReceiptStatus, TokenLedger};
use crate::networks::{ChainId, MezoNetwork};
use crate::payment::{Balance, PaymentOutcome, PaymentRequest, QrCodeData, WalletConnection};

/// Merchant payment SDK over a [`TokenLedger`].
#[derive(Debug)]
pub struct MezoPay<L> {
    config: ResolvedConfig,
    ledger: L,
}

impl<L: TokenLedger> MezoPay<L> {
    /// Creates an SDK instance from an already resolved configuration.
    #[must_use]
    pub const fn new(config: ResolvedConfig, ledger: L) -> Self {
        Self { config, ledger }
    }

    /// Resolves `config` and creates an SDK instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid, most notably
    /// [`ConfigError::MissingProjectId`].
    pub fn from_config(config: &MezoPayConfig, ledger: L) -> Result<Self, ConfigError> {
        Ok(Self::new(config.resolve()?, ledger))
    }

    /// The resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// The underlying ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, e.g. to connect or disconnect a wallet.
    pub const fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The selected network.
    #[must_use]
    pub const fn network(&self) -> &'static MezoNetwork {
        self.config.network
    }

    /// Chain ID of the selected network.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.config.network.chain_id
    }

    /// MUSD token contract on the selected network.
    #[must_use]
    pub const fn musd_address(&self) -> Address {
        self.config.musd_address
    }

    /// Current wallet session state.
    #[must_use]
    pub fn wallet(&self) -> WalletConnection {
        let address = self.ledger.account();
        WalletConnection {
            address,
            is_connected: address.is_some(),
        }
    }

    /// Encodes a payment request for display as a QR code.
    #[must_use]
    pub fn generate_qr_code(&self, request: &PaymentRequest) -> QrCodeData {
        QrCodeData::new(request.clone())
    }

    /// Decodes a scanned payment URI. Returns `None` for anything that is not
    /// a complete `musd:pay` URI.
    #[must_use]
    pub fn parse_qr_code(&self, uri: &str) -> Option<QrCodeData> {
        QrCodeData::parse(uri)
    }

    /// Converts a MUSD decimal string into base units.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] if the amount is not a non-negative decimal
    /// with at most 18 fractional digits.
    pub fn parse_amount(&self, amount: &str) -> Result<U256, AmountError> {
        to_base_units(amount, MUSD_DECIMALS)
    }

    /// Formats a MUSD base-unit value as a decimal string.
    #[must_use]
    pub fn format_amount(&self, value: U256) -> String {
        from_base_units(value, MUSD_DECIMALS)
    }

    /// Reads the MUSD balance of `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::BalanceFetch`] wrapping the ledger failure.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(name = "mezopay.get_balance", skip_all, fields(owner = %owner), err)
    )]
    pub async fn get_balance(&self, owner: Address) -> Result<Balance, PaymentError> {
        let value = self
            .ledger
            .read_balance(owner, self.config.musd_address)
            .await
            .map_err(|e| PaymentError::BalanceFetch(e.to_string()))?;
        Ok(Balance::musd(value))
    }

    /// Reads the MUSD balance of the connected wallet, or `None` when no
    /// wallet is connected.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::BalanceFetch`] wrapping the ledger failure.
    pub async fn connected_balance(&self) -> Result<Option<Balance>, PaymentError> {
        match self.ledger.account() {
            Some(owner) => self.get_balance(owner).await.map(Some),
            None => Ok(None),
        }
    }

    /// Validates `request` and submits the MUSD transfer.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::MissingField`] if `to` or `amount` is empty
    /// - [`PaymentError::InvalidAddress`] / [`PaymentError::InvalidAmount`] for
    ///   malformed fields
    /// - [`PaymentError::WalletNotConnected`] without a connected wallet
    /// - [`PaymentError::Transfer`] if the ledger fails to submit
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(
            name = "mezopay.submit_payment",
            skip_all,
            fields(to = %request.to, amount = %request.amount, order_id = ?request.order_id),
            err
        )
    )]
    pub async fn submit_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentOutcome, PaymentError> {
        if request.to.is_empty() {
            return Err(PaymentError::MissingField("to"));
        }
        if request.amount.is_empty() {
            return Err(PaymentError::MissingField("amount"));
        }
        let to = parse_address(&request.to)?;
        let value = self.parse_amount(&request.amount)?;

        if self.ledger.account().is_none() {
            return Err(PaymentError::WalletNotConnected);
        }

        let transaction_hash = self
            .ledger
            .submit_transfer(self.config.musd_address, to, value)
            .await
            .map_err(|e| PaymentError::Transfer(e.to_string()))?;

        #[cfg(feature = "telemetry")]
        tracing::info!(tx = %transaction_hash, "MUSD transfer submitted");

        Ok(PaymentOutcome::Pending {
            transaction_hash,
            order_id: request.order_id.clone(),
        })
    }

    /// Waits for the receipt of a pending payment.
    ///
    /// Confirmed and failed outcomes are returned unchanged.
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(
            name = "mezopay.confirm_payment",
            skip_all,
            fields(tx = ?outcome.transaction_hash())
        )
    )]
    pub async fn confirm_payment(&self, outcome: PaymentOutcome) -> PaymentOutcome {
        let PaymentOutcome::Pending {
            transaction_hash,
            order_id,
        } = outcome
        else {
            return outcome;
        };

        match self.ledger.await_receipt(transaction_hash).await {
            Ok(ReceiptStatus::Success) => PaymentOutcome::Confirmed {
                transaction_hash,
                order_id,
            },
            Ok(ReceiptStatus::Reverted) => PaymentOutcome::Failed {
                transaction_hash: Some(transaction_hash),
                order_id,
                error: "transaction reverted".to_owned(),
            },
            Err(e) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(
                    tx = %transaction_hash,
                    error = %e,
                    "Failed to obtain transfer receipt"
                );
                PaymentOutcome::Failed {
                    transaction_hash: Some(transaction_hash),
                    order_id,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Submits a payment and waits for its receipt.
    ///
    /// Submission errors are reported as [`PaymentOutcome::Failed`] without a
    /// transaction hash.
    pub async fn pay(&self, request: &PaymentRequest) -> PaymentOutcome {
        match self.submit_payment(request).await {
            Ok(pending) => self.confirm_payment(pending).await,
            Err(e) => PaymentOutcome::Failed {
                transaction_hash: None,
                order_id: request.order_id.clone(),
                error: e.to_string(),
            },
        }
    }
}
