//! Payment request, balance and status types.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::address::is_valid_address;
use crate::amount::{MUSD_DECIMALS, MUSD_SYMBOL, to_base_units};
use crate::error::PaymentError;
use crate::uri::{self, UriError};

/// A request to pay a MUSD amount to a recipient.
///
/// Fields are kept as the caller provided them; [`validate`](Self::validate)
/// checks them before anything is submitted on-chain.
///
/// # Example
///
/// ```rust
/// use mezopay::payment::PaymentRequest;
///
/// let request = PaymentRequest::new("0x1234567890123456789012345678901234567890", "100.5")
///     .with_memo("Payment for services")
///     .with_order_id("ORDER-123");
///
/// assert_eq!(
///     request.to_string(),
///     "musd:pay?to=0x1234567890123456789012345678901234567890&amount=100.5&memo=Payment+for+services&orderId=ORDER-123"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Recipient address, `0x` followed by 40 hex characters.
    pub to: String,
    /// Amount in MUSD as a decimal string (e.g. `"100.5"`).
    pub amount: String,
    /// Optional memo shown to the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Optional merchant order reference used for reconciliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl PaymentRequest {
    /// Creates a request without memo or order id.
    #[must_use]
    pub fn new(to: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            amount: amount.into(),
            memo: None,
            order_id: None,
        }
    }

    /// Sets the memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Sets the order id.
    #[must_use]
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Checks that `to` is a canonical address and `amount` a non-empty,
    /// non-negative decimal with at most [`MUSD_DECIMALS`] fractional digits.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::MissingField`] for empty fields,
    /// [`PaymentError::InvalidAddress`] or [`PaymentError::InvalidAmount`]
    /// otherwise.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.to.is_empty() {
            return Err(PaymentError::MissingField("to"));
        }
        if self.amount.is_empty() {
            return Err(PaymentError::MissingField("amount"));
        }
        if !is_valid_address(&self.to) {
            return Err(PaymentError::InvalidAddress(self.to.clone()));
        }
        to_base_units(&self.amount, MUSD_DECIMALS)?;
        Ok(())
    }

    /// Returns the `musd:pay?…` URI for this request.
    #[must_use]
    pub fn to_uri(&self) -> String {
        uri::encode(self)
    }
}

impl fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl FromStr for PaymentRequest {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uri::decode(s).ok_or(UriError::InvalidPaymentUri)
    }
}

/// Payment URI together with the request it encodes, ready for a QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeData {
    /// The `musd:pay?…` URI.
    pub uri: String,
    /// The request fields.
    #[serde(flatten)]
    pub request: PaymentRequest,
}

impl QrCodeData {
    /// Encodes `request` into QR code data.
    #[must_use]
    pub fn new(request: PaymentRequest) -> Self {
        Self {
            uri: request.to_uri(),
            request,
        }
    }

    /// Decodes a scanned URI, keeping the original string.
    #[must_use]
    pub fn parse(uri: &str) -> Option<Self> {
        uri::decode(uri).map(|request| Self {
            uri: uri.to_owned(),
            request,
        })
    }
}

/// A MUSD balance read from the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Decimal rendering of `value` (e.g. `"100.5"`).
    pub formatted: String,
    /// Raw balance in base units.
    pub value: U256,
    /// Token symbol.
    pub symbol: String,
    /// Token decimals.
    pub decimals: u8,
}

impl Balance {
    /// Wraps a raw MUSD balance.
    #[must_use]
    pub fn musd(value: U256) -> Self {
        Self {
            formatted: crate::amount::format_amount(value),
            value,
            symbol: MUSD_SYMBOL.to_owned(),
            decimals: MUSD_DECIMALS,
        }
    }
}

/// Lifecycle state of a submitted payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Submitted, receipt not yet observed.
    Pending,
    /// Mined with a successful receipt.
    Confirmed,
    /// Rejected before submission, reverted, or lost while waiting.
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Confirmed => f.write_str("confirmed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Result of a payment step: the status plus either a transaction hash or an
/// error message.
///
/// Callers inspect the outcome after each asynchronous step instead of
/// registering success/error/pending callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum PaymentOutcome {
    /// The transfer was accepted by the node.
    Pending {
        /// Hash of the submitted transfer.
        transaction_hash: TxHash,
        /// Order id from the request, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_id: Option<String>,
    },
    /// The transfer was mined successfully.
    Confirmed {
        /// Hash of the mined transfer.
        transaction_hash: TxHash,
        /// Order id from the request, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_id: Option<String>,
    },
    /// The payment did not go through.
    Failed {
        /// Hash of the transfer when it was submitted before failing.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transaction_hash: Option<TxHash>,
        /// Order id from the request, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_id: Option<String>,
        /// Human-readable failure reason.
        error: String,
    },
}

impl PaymentOutcome {
    /// Returns the status tag.
    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        match self {
            Self::Pending { .. } => PaymentStatus::Pending,
            Self::Confirmed { .. } => PaymentStatus::Confirmed,
            Self::Failed { .. } => PaymentStatus::Failed,
        }
    }

    /// Returns the transaction hash, if the transfer was submitted.
    #[must_use]
    pub fn transaction_hash(&self) -> Option<TxHash> {
        match self {
            Self::Pending {
                transaction_hash, ..
            }
            | Self::Confirmed {
                transaction_hash, ..
            } => Some(*transaction_hash),
            Self::Failed {
                transaction_hash, ..
            } => *transaction_hash,
        }
    }

    /// Returns the order id carried over from the request.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::Pending { order_id, .. }
            | Self::Confirmed { order_id, .. }
            | Self::Failed { order_id, .. } => order_id.as_deref(),
        }
    }

    /// Returns the failure reason of a failed outcome.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Snapshot of a wallet session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConnection {
    /// Connected account, if any.
    pub address: Option<Address>,
    /// Whether an account is connected.
    pub is_connected: bool,
}
