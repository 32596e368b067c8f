//! # Grain Conversion
//!
//! Fixed-point conversion between human-readable decimal amounts and grains,
//! the chain's smallest indivisible unit. Both chain tokens carry 12
//! decimals. Conversion happens exactly once, at the API boundary; every
//! type past this module holds `Balance` grains.

use crate::primitives::Balance;
use thiserror::Error;

/// Decimal places carried by both chain tokens.
pub const DECIMALS: u32 = 12;

/// Grains per whole token unit (`10^12`).
pub const GRAINS_PER_UNIT: Balance = 1_000_000_000_000;

/// Errors produced while parsing a decimal amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The input was empty or contained a non-digit character.
    #[error("invalid amount: {0:?}")]
    Invalid(String),

    /// More fractional digits than the chain can represent.
    #[error("too many decimal places: {got} > {max}")]
    TooManyDecimals { got: usize, max: u32 },

    /// The amount does not fit in a `Balance`.
    #[error("amount overflows the balance type")]
    Overflow,
}

/// Parse a decimal string such as `"1.5"` into grains.
///
/// Accepts an optional single `.` separator. Rejects empty parts, more than
/// [`DECIMALS`] fractional digits, and values that overflow `Balance`.
pub fn to_grains(amount: &str) -> Result<Balance, AmountError> {
    let (whole_part, frac_part) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Invalid(amount.to_string()));
    }
    if frac_part.len() > DECIMALS as usize {
        return Err(AmountError::TooManyDecimals {
            got: frac_part.len(),
            max: DECIMALS,
        });
    }

    let whole: Balance = parse_digits(whole_part, amount)?;
    let frac: Balance = if frac_part.is_empty() {
        0
    } else {
        let parsed = parse_digits(frac_part, amount)?;
        // Scale "5" in "1.5" up to 500_000_000_000.
        parsed * 10u128.pow(DECIMALS - frac_part.len() as u32)
    };

    whole
        .checked_mul(GRAINS_PER_UNIT)
        .and_then(|g| g.checked_add(frac))
        .ok_or(AmountError::Overflow)
}

/// Render grains as a canonical decimal string.
///
/// No trailing fractional zeros, no fractional part at all for whole
/// amounts. `to_grains(from_grains(g)) == g` for every `g`.
pub fn from_grains(grains: Balance) -> String {
    let whole = grains / GRAINS_PER_UNIT;
    let frac = grains % GRAINS_PER_UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let padded = format!("{frac:012}");
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

fn parse_digits(part: &str, original: &str) -> Result<Balance, AmountError> {
    if part.is_empty() {
        return Ok(0);
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Invalid(original.to_string()));
    }
    part.parse::<Balance>()
        .map_err(|_| AmountError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_whole_amount() {
        assert_eq!(to_grains("100").unwrap(), 100 * GRAINS_PER_UNIT);
    }

    #[test]
    fn test_fractional_amount() {
        assert_eq!(to_grains("1.5").unwrap(), 1_500_000_000_000);
        assert_eq!(to_grains("0.000000000001").unwrap(), 1);
    }

    #[test]
    fn test_leading_dot_and_trailing_dot() {
        assert_eq!(to_grains(".5").unwrap(), 500_000_000_000);
        assert_eq!(to_grains("5.").unwrap(), 5 * GRAINS_PER_UNIT);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(to_grains(""), Err(AmountError::Invalid(_))));
        assert!(matches!(to_grains("."), Err(AmountError::Invalid(_))));
        assert!(matches!(to_grains("1x"), Err(AmountError::Invalid(_))));
        assert!(matches!(to_grains("1.2.3"), Err(AmountError::Invalid(_))));
        assert!(matches!(to_grains("-1"), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn test_rejects_excess_decimals() {
        let result = to_grains("0.0000000000001");
        assert!(matches!(
            result,
            Err(AmountError::TooManyDecimals { got: 13, max: 12 })
        ));
    }

    #[test]
    fn test_rejects_overflow() {
        let huge = Balance::MAX.to_string();
        assert!(matches!(to_grains(&huge), Err(AmountError::Overflow)));
    }

    #[test]
    fn test_from_grains_canonical() {
        assert_eq!(from_grains(0), "0");
        assert_eq!(from_grains(GRAINS_PER_UNIT), "1");
        assert_eq!(from_grains(1_500_000_000_000), "1.5");
        assert_eq!(from_grains(1), "0.000000000001");
    }

    proptest! {
        #[test]
        fn prop_roundtrip_grains(g in any::<u128>()) {
            let rendered = from_grains(g);
            prop_assert_eq!(to_grains(&rendered).unwrap(), g);
        }

        #[test]
        fn prop_whole_units_scale(units in 0u128..1_000_000_000) {
            let grains = to_grains(&units.to_string()).unwrap();
            prop_assert_eq!(grains, units * GRAINS_PER_UNIT);
        }
    }
}
