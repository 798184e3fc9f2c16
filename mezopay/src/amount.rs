//! Token amount conversion between human-readable decimals and base units.
//!
//! Amounts travel through the SDK as decimal strings (e.g. `"100.5"`) and are
//! only turned into integers at the contract boundary. Scaling goes through
//! alloy's unit helpers; inputs are checked first, so there is no silent
//! truncation and an amount that cannot be represented exactly is rejected.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::U256;
//! use mezopay::amount::{from_base_units, to_base_units};
//!
//! let value = to_base_units("100.5", 18).unwrap();
//! assert_eq!(value, U256::from(100_500_000_000_000_000_000_u128));
//! assert_eq!(from_base_units(value, 18), "100.5");
//! ```

use std::sync::LazyLock;

use alloy_primitives::U256;
use alloy_primitives::utils::{ParseUnits, Unit};
use regex::Regex;

/// Number of decimals of the MUSD token.
pub const MUSD_DECIMALS: u8 = 18;

/// Ticker symbol of the MUSD token.
pub const MUSD_SYMBOL: &str = "MUSD";

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*)(?:\.([0-9]*))?$").expect("valid amount regex"));

/// Errors that can occur when converting a decimal amount into base units.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The input is not a non-negative decimal number.
    #[error("invalid amount {0:?}: expected a non-negative decimal number")]
    InvalidFormat(String),
    /// The input has more fractional digits than the token supports.
    #[error("amount has {fraction} fractional digits but the token supports {decimals}")]
    TooPrecise {
        /// Fractional digits in the input.
        fraction: usize,
        /// Decimals supported by the token.
        decimals: u8,
    },
    /// The scaled value does not fit in 256 bits.
    #[error("amount does not fit in 256 bits")]
    Overflow,
}

/// Converts a decimal string into its integer base-unit representation.
///
/// Accepted forms are `"12"`, `"12.5"`, `".5"` and `"12."`. Signs, exponents,
/// whitespace and thousands separators are rejected.
///
/// # Errors
///
/// Returns [`AmountError::InvalidFormat`] for anything that is not a
/// non-negative decimal number, [`AmountError::TooPrecise`] when the fraction
/// is longer than `decimals`, and [`AmountError::Overflow`] when the result
/// exceeds `U256::MAX`.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let captures = AMOUNT_PATTERN
        .captures(amount)
        .ok_or_else(|| AmountError::InvalidFormat(amount.to_owned()))?;
    let whole = captures.get(1).map_or("", |m| m.as_str());
    let fraction = captures.get(2).map_or("", |m| m.as_str());

    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::InvalidFormat(amount.to_owned()));
    }

    // parse_units silently truncates extra fractional digits
    let scale = usize::from(decimals);
    if fraction.len() > scale {
        return Err(AmountError::TooPrecise {
            fraction: fraction.len(),
            decimals,
        });
    }

    let Some(unit) = Unit::new(decimals) else {
        // Scales past 10^77 only fit amounts below one whole token
        let digits = format!("{whole}{fraction:0<scale$}");
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(U256::ZERO);
        }
        return U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow);
    };

    let whole_value = match whole.trim_start_matches('0') {
        "" => U256::ZERO,
        digits => U256::from_str_radix(digits, 10).map_err(|_| AmountError::Overflow)?,
    };
    let value = match ParseUnits::parse_units(amount, unit) {
        Ok(ParseUnits::U256(value)) => value,
        Ok(ParseUnits::I256(_)) | Err(_) => return Err(AmountError::Overflow),
    };
    // Scaling wraps instead of failing, so a wrapped result has the wrong whole part
    if value / unit.wei() != whole_value {
        return Err(AmountError::Overflow);
    }
    Ok(value)
}

/// Converts an integer base-unit value into a decimal string.
///
/// Trailing fractional zeros are dropped, and the decimal point is omitted
/// when the fraction is zero (`10^18` with 18 decimals formats as `"1"`).
#[must_use]
pub fn from_base_units(value: U256, decimals: u8) -> String {
    let formatted = match Unit::new(decimals) {
        Some(unit) => ParseUnits::U256(value).format_units(unit),
        None => {
            // Below 10^78 the whole part is always zero; shift the 77-place rendering
            let digits = ParseUnits::U256(value)
                .format_units(Unit::MAX)
                .replace('.', "");
            let padding = "0".repeat(usize::from(decimals) - digits.len());
            format!("0.{padding}{digits}")
        }
    };
    trim_fraction(&formatted).to_owned()
}

/// Drops trailing fractional zeros and a dangling decimal point.
fn trim_fraction(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}

/// Converts a MUSD decimal string into base units.
///
/// # Errors
///
/// See [`to_base_units`].
pub fn parse_amount(amount: &str) -> Result<U256, AmountError> {
    to_base_units(amount, MUSD_DECIMALS)
}

/// Formats a MUSD base-unit value as a decimal string.
#[must_use]
pub fn format_amount(value: U256) -> String {
    from_base_units(value, MUSD_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_units_fractional() {
        let value = to_base_units("100.5", 18).unwrap();
        assert_eq!(value, U256::from(100_500_000_000_000_000_000_u128));
    }

    #[test]
    fn test_to_base_units_whole_and_edge_forms() {
        let one = U256::from(10).pow(U256::from(18));
        assert_eq!(to_base_units("50", 18).unwrap(), U256::from(50) * one);
        assert_eq!(to_base_units(".5", 1).unwrap(), U256::from(5));
        assert_eq!(to_base_units("7.", 2).unwrap(), U256::from(700));
        assert_eq!(to_base_units("0", 18).unwrap(), U256::ZERO);
        assert_eq!(to_base_units("000.000", 6).unwrap(), U256::ZERO);
        assert_eq!(to_base_units("42", 0).unwrap(), U256::from(42));
    }

    #[test]
    fn test_to_base_units_rejects_non_numeric() {
        for input in ["abc", "-1", "", ".", "1.2.3", " 1", "1e18", "1,000", "+5", "١٢"] {
            assert!(
                matches!(to_base_units(input, 18), Err(AmountError::InvalidFormat(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_to_base_units_rejects_excess_precision() {
        let err = to_base_units("1.23456789012345678901", 18).unwrap_err();
        assert_eq!(
            err,
            AmountError::TooPrecise {
                fraction: 20,
                decimals: 18
            }
        );
        assert!(to_base_units("0.1", 0).is_err());
    }

    #[test]
    fn test_to_base_units_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(to_base_units(&max, 0).unwrap(), U256::MAX);
        assert_eq!(to_base_units(&max, 1), Err(AmountError::Overflow));

        // U256::MAX is about 1.16 * 10^77
        let e77 = U256::from(10).pow(U256::from(77));
        assert_eq!(to_base_units("1", 77), Ok(e77));
        assert_eq!(to_base_units("1.1", 77), Ok(e77 + e77 / U256::from(10)));
        assert_eq!(to_base_units("1.2", 77), Err(AmountError::Overflow));
        assert_eq!(to_base_units("2", 77), Err(AmountError::Overflow));
    }

    #[test]
    fn test_scales_beyond_alloy_units() {
        let tiny = format!("0.{}1", "0".repeat(77));
        assert_eq!(to_base_units(&tiny, 78), Ok(U256::from(1)));
        assert_eq!(from_base_units(U256::from(1), 78), tiny);
        assert_eq!(to_base_units("1", 78), Err(AmountError::Overflow));
        assert_eq!(to_base_units("0.0", 200), Ok(U256::ZERO));
        assert_eq!(from_base_units(U256::ZERO, 200), "0");
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(
            from_base_units(U256::from(100_500_000_000_000_000_000_u128), 18),
            "100.5"
        );
        assert_eq!(
            from_base_units(U256::from(100_500_000_000_000_000_u128), 18),
            "0.1005"
        );
        assert_eq!(from_base_units(U256::from(10).pow(U256::from(18)), 18), "1");
        assert_eq!(from_base_units(U256::ZERO, 18), "0");
        assert_eq!(from_base_units(U256::from(1), 18), "0.000000000000000001");
        assert_eq!(from_base_units(U256::from(1234), 0), "1234");
    }

    #[test]
    fn test_base_units_roundtrip() {
        let values = [
            U256::ZERO,
            U256::from(1),
            U256::from(999_999),
            U256::from(100_500_000_000_000_000_000_u128),
            U256::MAX,
        ];
        for decimals in [0_u8, 1, 6, 18, 77, 78, 255] {
            for value in values {
                let formatted = from_base_units(value, decimals);
                assert_eq!(
                    to_base_units(&formatted, decimals),
                    Ok(value),
                    "{value} with {decimals} decimals"
                );
            }
        }
    }

    #[test]
    fn test_musd_helpers() {
        let value = parse_amount("2.25").unwrap();
        assert_eq!(value, U256::from(2_250_000_000_000_000_000_u128));
        assert_eq!(format_amount(value), "2.25");
    }
}
