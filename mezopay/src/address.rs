//! Canonical EVM address checks.

use std::sync::LazyLock;

use alloy_primitives::Address;
use regex::Regex;

use crate::error::PaymentError;

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid address regex"));

/// Returns `true` if `address` is `0x` followed by exactly 40 hex characters.
///
/// Case-insensitive; the EIP-55 checksum is not verified.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_PATTERN.is_match(address)
}

/// Parses a canonical address string.
///
/// # Errors
///
/// Returns [`PaymentError::InvalidAddress`] if the string fails
/// [`is_valid_address`].
pub fn parse_address(address: &str) -> Result<Address, PaymentError> {
    if !is_valid_address(address) {
        return Err(PaymentError::InvalidAddress(address.to_owned()));
    }
    address
        .parse()
        .map_err(|_| PaymentError::InvalidAddress(address.to_owned()))
}
