#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM chain access for the MezoPay SDK.
//!
//! This crate implements [`mezopay::TokenLedger`] with alloy: MUSD balances
//! are read through `balanceOf` calls, payments are ERC-20 `transfer`
//! transactions signed by a local [`WalletSession`], and receipts are awaited
//! with the configured confirmations and timeout.
//!
//! # Modules
//!
//! - [`contract`] - The `IERC20` Solidity interface
//! - [`ledger`] - [`EvmLedger`] and the [`connect`] helper
//! - [`wallet`] - Private-key wallet sessions
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for RPC calls

pub mod contract;
pub mod ledger;
pub mod wallet;

pub use ledger::{EvmLedger, EvmLedgerError, connect};
pub use wallet::WalletSession;
