use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine so that the
/// dollar amounts typed into a form never pass through floating point.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "$12.34");
/// ```
///
/// Parsing from user input rounds to the nearest cent:
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("250.00".parse::<MoneyCents>().unwrap().cents(), 25_000);
/// assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert_eq!("1.005".parse::<MoneyCents>().unwrap().cents(), 101);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

/// Why a dollar string could not be turned into cents.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMoneyError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("amount too large")]
    Overflow,
}

impl MoneyCents {
    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let dollars = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}${dollars}.{cents:02}")
    }
}

impl FromStr for MoneyCents {
    type Err = ParseMoneyError;

    /// Parses a decimal dollar string into cents, i.e. `round(dollars * 100)`.
    ///
    /// Accepts an optional leading `+`/`-`, an optional integer part when a
    /// fractional part is present (`.5`), a trailing dot (`5.`) and an
    /// exponent suffix (`1e3`, `2.5E-1`). The exponent only moves the decimal
    /// point over the digit string. Digits past the second decimal round half
    /// away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, parse_exponent(exponent)?),
            None => (rest, 0),
        };

        let (whole, frac) = match mantissa.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (mantissa, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(ParseMoneyError::Invalid);
        }
        if !all_digits(whole) || !all_digits(frac) {
            return Err(ParseMoneyError::Invalid);
        }

        // Position of the cents boundary inside `whole ++ frac`.
        let point = i64::try_from(whole.len())
            .map_err(|_| ParseMoneyError::Overflow)?
            .saturating_add(exponent)
            .saturating_add(2);

        let mut total: i64 = 0;
        let mut round_up = false;
        let mut consumed: i64 = 0;
        for digit in whole.bytes().chain(frac.bytes()).map(|b| i64::from(b - b'0')) {
            if consumed == point {
                round_up = digit >= 5;
                break;
            }
            if consumed > point {
                break;
            }
            total = push_digit(total, digit)?;
            consumed += 1;
        }
        // Decimal point past the last digit: pad with zeros.
        if total != 0 {
            while consumed < point {
                total = push_digit(total, 0)?;
                consumed += 1;
            }
        }
        let total = total
            .checked_add(i64::from(round_up))
            .ok_or(ParseMoneyError::Overflow)?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

fn all_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

fn push_digit(total: i64, digit: i64) -> Result<i64, ParseMoneyError> {
    total
        .checked_mul(10)
        .and_then(|v| v.checked_add(digit))
        .ok_or(ParseMoneyError::Overflow)
}

/// `[+-]digits`. Exponents too large for `i64` saturate: the amount then
/// either overflows or rounds to zero.
fn parse_exponent(raw: &str) -> Result<i64, ParseMoneyError> {
    let (negative, digits) = if let Some(stripped) = raw.strip_prefix('-') {
        (true, stripped)
    } else if let Some(stripped) = raw.strip_prefix('+') {
        (false, stripped)
    } else {
        (false, raw)
    };
    if digits.is_empty() || !all_digits(digits) {
        return Err(ParseMoneyError::Invalid);
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(input: &str) -> i64 {
        input.parse::<MoneyCents>().unwrap().cents()
    }

    #[test]
    fn display_formats_dollars() {
        assert_eq!(MoneyCents::new(0).to_string(), "$0.00");
        assert_eq!(MoneyCents::new(7).to_string(), "$0.07");
        assert_eq!(MoneyCents::new(1050).to_string(), "$10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-$10.50");
    }

    #[test]
    fn parse_whole_and_fractional_dollars() {
        assert_eq!(cents("10"), 1000);
        assert_eq!(cents("250.00"), 25_000);
        assert_eq!(cents("30"), 3000);
        assert_eq!(cents("0.1"), 10);
        assert_eq!(cents(".5"), 50);
        assert_eq!(cents("5."), 500);
        assert_eq!(cents("+1.00"), 100);
        assert_eq!(cents("-5"), -500);
        assert_eq!(cents("  2.30 "), 230);
    }

    #[test]
    fn parse_rounds_to_nearest_cent() {
        assert_eq!(cents("1.005"), 101);
        assert_eq!(cents("1.004"), 100);
        assert_eq!(cents("0.129"), 13);
        assert_eq!(cents("0.001"), 0);
        assert_eq!(cents("19.999"), 2000);
        assert_eq!(cents("-1.005"), -101);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<MoneyCents>(), Err(ParseMoneyError::Empty));
        assert_eq!("   ".parse::<MoneyCents>(), Err(ParseMoneyError::Empty));
        assert_eq!("abc".parse::<MoneyCents>(), Err(ParseMoneyError::Invalid));
        assert_eq!("1.2.3".parse::<MoneyCents>(), Err(ParseMoneyError::Invalid));
        assert_eq!(".".parse::<MoneyCents>(), Err(ParseMoneyError::Invalid));
        assert_eq!("1,50".parse::<MoneyCents>(), Err(ParseMoneyError::Invalid));
        assert_eq!("- 5".parse::<MoneyCents>(), Err(ParseMoneyError::Invalid));
        assert_eq!(
            "99999999999999999999".parse::<MoneyCents>(),
            Err(ParseMoneyError::Overflow)
        );
    }

    #[test]
    fn parse_applies_exponent_exactly() {
        assert_eq!(cents("1e3"), 100_000);
        assert_eq!(cents("2.5e-1"), 25);
        assert_eq!(cents("1.5E+2"), 15_000);
        assert_eq!(cents("12e-2"), 12);
        assert_eq!(cents("5e-3"), 1);
        assert_eq!(cents("1e-3"), 0);
        assert_eq!(cents(".5e1"), 500);
        assert_eq!(cents("-1e2"), -10_000);
        assert_eq!(cents("0e99999999999999999999"), 0);
        assert_eq!(cents("1e-99999999999999999999"), 0);
    }

    #[test]
    fn parse_rejects_malformed_exponents() {
        for input in ["1e", "e3", ".e3", "1e+", "1e3.5", "1ee3", "1e 3"] {
            assert_eq!(
                input.parse::<MoneyCents>(),
                Err(ParseMoneyError::Invalid),
                "input {input:?}"
            );
        }
        assert_eq!("9e18".parse::<MoneyCents>(), Err(ParseMoneyError::Overflow));
        assert_eq!("1e99999999999999999999".parse::<MoneyCents>(), Err(ParseMoneyError::Overflow));
    }
}
