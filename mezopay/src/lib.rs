#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for accepting MUSD payments on Mezo.
//!
//! This crate contains everything a merchant integration needs that does not
//! talk to a node: the `musd:pay` payment URI used in QR codes, address and
//! amount validation, the Mezo network table, SDK configuration and the
//! [`MezoPay`] facade. Chain access goes through the [`TokenLedger`] trait;
//! `mezopay-evm` provides the alloy-backed implementation.
//!
//! # Example
//!
//! ```rust
//! use mezopay::{PaymentRequest, uri};
//!
//! let request = PaymentRequest::new("0x1234567890123456789012345678901234567890", "50")
//!     .with_memo("order")
//!     .with_order_id("X1");
//! let encoded = uri::encode(&request);
//!
//! assert_eq!(
//!     encoded,
//!     "musd:pay?to=0x1234567890123456789012345678901234567890&amount=50&memo=order&orderId=X1"
//! );
//! assert_eq!(uri::decode(&encoded), Some(request));
//! ```
//!
//! # Modules
//!
//! - [`address`] - Recipient address validation
//! - [`amount`] - Decimal strings to and from token base units
//! - [`config`] - SDK options and their resolved form
//! - [`display`] - Balance badge and pay button view state
//! - [`error`] - Configuration and payment errors
//! - [`ledger`] - The chain access trait
//! - [`networks`] - Mezo networks and MUSD deployments
//! - [`payment`] - Payment requests, balances and outcomes
//! - `qr` - SVG rendering of payment QR codes (requires `qrcode`)
//! - [`sdk`] - The [`MezoPay`] facade
//! - [`uri`] - The `musd:pay` URI codec
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring
//! - `qrcode` - Renders payment URIs as SVG QR codes

pub mod address;
pub mod amount;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod networks;
pub mod payment;
#[cfg(feature = "qrcode")]
pub mod qr;
pub mod sdk;
pub mod uri;

pub use address::is_valid_address;
pub use amount::{AmountError, from_base_units, to_base_units};
pub use config::{MezoPayConfig, ResolvedConfig};
pub use error::{ConfigError, PaymentError};
pub use ledger::{ReceiptStatus, TokenLedger};
pub use payment::{
    Balance, PaymentOutcome, PaymentRequest, PaymentStatus, QrCodeData, WalletConnection,
};
pub use sdk::MezoPay;
