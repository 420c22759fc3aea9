// SPDX-License-Identifier: MPL-2.0
//! Fixed-point monetary types.
//!
//! All amounts are stored as `i64` counts of the smallest indivisible unit:
//! 10^8 units per coin and 10^4 units per fiat major unit. Arithmetic that
//! could leave the `i64` range widens to `i128` and reports
//! [`MoneyError::Overflow`](crate::error::MoneyError) instead of wrapping.

pub mod format;
pub mod rate;

pub use format::MonetaryFormat;
pub use rate::{currency_symbol, ExchangeRate};

use crate::error::{MoneyError, Result};

/// An amount of the base cryptocurrency, in smallest units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coin {
    value: i64,
}

impl Coin {
    /// Number of decimal places the smallest unit is shifted from one coin.
    pub const SMALLEST_UNIT_EXPONENT: u32 = 8;

    /// Smallest units per whole coin.
    pub const UNITS_PER_COIN: i64 = 100_000_000;

    pub const ZERO: Coin = Coin { value: 0 };
    pub const COIN: Coin = Coin {
        value: Self::UNITS_PER_COIN,
    };

    /// Wraps a raw smallest-unit value. The sign is preserved and not
    /// interpreted.
    #[must_use]
    pub const fn from_units(value: i64) -> Self {
        Self { value }
    }

    /// Builds an amount from a whole number of coins.
    pub fn from_coins(coins: i64) -> Result<Self> {
        let value = coins
            .checked_mul(Self::UNITS_PER_COIN)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self { value })
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.value
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.value < 0
    }
}

/// An amount of real-world currency, in smallest units (10^-4 of the major
/// unit), tagged with its ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fiat {
    value: i64,
    currency_code: String,
}

impl Fiat {
    /// Number of decimal places the smallest unit is shifted from one major
    /// unit.
    pub const SMALLEST_UNIT_EXPONENT: u32 = 4;

    /// Smallest units per major unit.
    pub const UNITS_PER_MAJOR: i64 = 10_000;

    /// Wraps a raw smallest-unit value under a validated currency code.
    pub fn from_units(currency_code: &str, value: i64) -> Result<Self> {
        Ok(Self {
            value,
            currency_code: validate_currency_code(currency_code)?,
        })
    }

    /// Builds an amount from a whole number of major units.
    pub fn from_major(currency_code: &str, major: i64) -> Result<Self> {
        let value = major
            .checked_mul(Self::UNITS_PER_MAJOR)
            .ok_or(MoneyError::Overflow)?;
        Self::from_units(currency_code, value)
    }

    /// Parses a decimal string such as `"50"`, `"50.25"` or `"0,5"` into a
    /// fiat amount. Both `.` and `,` are accepted as the decimal separator;
    /// at most four fractional digits are allowed.
    pub fn parse(currency_code: &str, input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let invalid = || MoneyError::InvalidAmount(input.to_string());
        let (int_part, frac_part) = match body.split_once(['.', ',']) {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid().into());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid().into());
        }
        if frac_part.len() as u32 > Self::SMALLEST_UNIT_EXPONENT {
            return Err(invalid().into());
        }

        let major: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut frac: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| invalid())?
        };
        for _ in frac_part.len() as u32..Self::SMALLEST_UNIT_EXPONENT {
            frac *= 10;
        }

        let mut value = major
            .checked_mul(Self::UNITS_PER_MAJOR)
            .and_then(|v| v.checked_add(frac))
            .ok_or(MoneyError::Overflow)?;
        if negative {
            value = -value;
        }
        Self::from_units(currency_code, value)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.value > 0
    }
}

/// Checks that a currency code is three ASCII letters and normalizes it to
/// upper case.
fn validate_currency_code(code: &str) -> Result<String> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(MoneyError::InvalidCurrency(code.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, MoneyError};

    #[test]
    fn coin_constants_are_consistent() {
        assert_eq!(Coin::COIN.value(), Coin::UNITS_PER_COIN);
        assert_eq!(Coin::from_coins(1).unwrap(), Coin::COIN);
        assert!(Coin::ZERO.is_zero());
    }

    #[test]
    fn coin_from_coins_detects_overflow() {
        let result = Coin::from_coins(i64::MAX);
        assert!(matches!(
            result,
            Err(Error::Money(MoneyError::Overflow))
        ));
    }

    #[test]
    fn negative_coin_keeps_its_sign() {
        let coin = Coin::from_units(-42);
        assert!(coin.is_negative());
        assert_eq!(coin.value(), -42);
    }

    #[test]
    fn fiat_parse_whole_number() {
        let fiat = Fiat::parse("USD", "50").unwrap();
        assert_eq!(fiat.value(), 50 * Fiat::UNITS_PER_MAJOR);
        assert_eq!(fiat.currency_code(), "USD");
    }

    #[test]
    fn fiat_parse_decimal_and_comma_separator() {
        assert_eq!(Fiat::parse("USD", "50.25").unwrap().value(), 502_500);
        assert_eq!(Fiat::parse("EUR", "0,5").unwrap().value(), 5_000);
    }

    #[test]
    fn fiat_parse_partial_fraction_is_padded() {
        // ".5" means half a major unit, not five smallest units
        assert_eq!(Fiat::parse("USD", ".5").unwrap().value(), 5_000);
        assert_eq!(Fiat::parse("USD", "1.2345").unwrap().value(), 12_345);
    }

    #[test]
    fn fiat_parse_negative() {
        assert_eq!(Fiat::parse("USD", "-1.50").unwrap().value(), -15_000);
    }

    #[test]
    fn fiat_parse_rejects_garbage() {
        for input in ["", "-", "12..3", "1.23456", "abc", "1.2e3"] {
            assert!(
                Fiat::parse("USD", input).is_err(),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn currency_code_is_normalized() {
        let fiat = Fiat::from_units("usd", 100).unwrap();
        assert_eq!(fiat.currency_code(), "USD");
    }

    #[test]
    fn bad_currency_codes_are_rejected() {
        for code in ["", "US", "USDT", "U$D", "12A"] {
            assert!(
                Fiat::from_units(code, 0).is_err(),
                "code {:?} should be rejected",
                code
            );
        }
    }
}
