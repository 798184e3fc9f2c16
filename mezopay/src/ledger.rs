//! The chain access seam used by the SDK.
//!
//! [`TokenLedger`] is the minimal surface [`MezoPay`](crate::sdk::MezoPay)
//! needs from a blockchain client and wallet: who is connected, ERC-20 balance
//! reads, transfer submission and receipt waiting. `mezopay-evm` implements it
//! on top of alloy; tests use in-memory ledgers.

use std::future::Future;

use alloy_primitives::{Address, TxHash, U256};

/// Final state of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptStatus {
    /// The transaction executed successfully.
    Success,
    /// The transaction was mined but reverted.
    Reverted,
}

/// Blockchain client and wallet session backing an SDK instance.
pub trait TokenLedger: Send + Sync {
    /// Error type for ledger operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the connected wallet account, if any.
    fn account(&self) -> Option<Address>;

    /// Reads the ERC-20 balance of `owner` on `token`.
    fn read_balance(
        &self,
        owner: Address,
        token: Address,
    ) -> impl Future<Output = Result<U256, Self::Error>> + Send;

    /// Submits an ERC-20 `transfer(to, amount)` on `token` from the connected
    /// account and returns the transaction hash once the node accepts it.
    fn submit_transfer(
        &self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> impl Future<Output = Result<TxHash, Self::Error>> + Send;

    /// Waits for the receipt of a submitted transaction.
    fn await_receipt(
        &self,
        transaction_hash: TxHash,
    ) -> impl Future<Output = Result<ReceiptStatus, Self::Error>> + Send;
}
