//! View state for merchant checkout screens.
//!
//! These helpers compute what a wallet balance badge and a pay button should
//! show from explicit inputs. They hold no state and do no I/O; callers
//! refresh them after each [`MezoPay`](crate::sdk::MezoPay) call.

use alloy_primitives::U256;
use serde::Serialize;

use crate::amount::from_base_units;
use crate::error::PaymentError;
use crate::payment::{Balance, PaymentOutcome, PaymentStatus};

/// Fractional digits shown in a balance badge.
pub const BALANCE_DISPLAY_PLACES: usize = 4;

/// Default pay button label.
pub const PAY_LABEL: &str = "Pay with MUSD";

/// Pay button label while a payment is pending.
pub const PROCESSING_LABEL: &str = "Processing...";

/// A balance rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceView {
    /// Balance with exactly four fractional digits, or `"0"` when unknown or zero.
    pub formatted: String,
    /// Token symbol, when a balance is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl BalanceView {
    /// Renders `balance`, or `"0"` when there is no connected wallet, no
    /// balance has been read yet, or the balance is zero.
    #[must_use]
    pub fn new(balance: Option<&Balance>) -> Self {
        match balance {
            None => Self {
                formatted: "0".to_owned(),
                symbol: None,
            },
            Some(balance) if balance.value.is_zero() => Self {
                formatted: "0".to_owned(),
                symbol: Some(balance.symbol.clone()),
            },
            Some(balance) => Self {
                formatted: fixed_places(balance.value, balance.decimals),
                symbol: Some(balance.symbol.clone()),
            },
        }
    }
}

/// Formats `value` with exactly [`BALANCE_DISPLAY_PLACES`] fractional digits,
/// rounding half-up.
fn fixed_places(value: U256, decimals: u8) -> String {
    let places = BALANCE_DISPLAY_PLACES;
    // Half of the last shown digit; none when every digit is shown
    let half = usize::from(decimals)
        .checked_sub(places + 1)
        .and_then(|exp| U256::from(10).checked_pow(U256::from(exp)))
        .and_then(|unit| unit.checked_mul(U256::from(5)));
    let rounded = half.map_or(value, |half| value.saturating_add(half));

    let formatted = from_base_units(rounded, decimals);
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let fraction: String = fraction.chars().take(places).collect();
    format!("{whole}.{fraction:0<places$}")
}

/// What a pay button should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentButtonState {
    /// Button text.
    pub label: String,
    /// Whether the button should reject clicks.
    pub disabled: bool,
    /// Message shown under the button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PaymentButtonState {
    /// Computes the button state from the wallet connection and the latest
    /// payment outcome.
    ///
    /// The button is disabled without a wallet or while a payment is pending.
    /// A failed outcome surfaces its error message.
    #[must_use]
    pub fn new(connected: bool, outcome: Option<&PaymentOutcome>) -> Self {
        Self::with_label(PAY_LABEL, connected, outcome)
    }

    /// Same as [`new`](Self::new) with a custom idle label.
    #[must_use]
    pub fn with_label(label: &str, connected: bool, outcome: Option<&PaymentOutcome>) -> Self {
        let processing = outcome.is_some_and(|o| o.status() == PaymentStatus::Pending);
        let message = if connected {
            outcome.and_then(PaymentOutcome::error).map(str::to_owned)
        } else {
            Some(PaymentError::WalletNotConnected.to_string())
        };

        Self {
            label: if processing { PROCESSING_LABEL } else { label }.to_owned(),
            disabled: !connected || processing,
            message,
        }
    }
}
