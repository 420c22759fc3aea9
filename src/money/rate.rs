// SPDX-License-Identifier: MPL-2.0
//! Coin-to-fiat exchange rates.

use super::{Coin, Fiat};
use crate::error::{MoneyError, Result};
use chrono::{DateTime, Utc};

/// An exchange rate, expressed as the pair of a coin amount and the fiat
/// amount it is worth.
///
/// Keeping the pair instead of a ratio lets the conversion stay in integer
/// arithmetic: `fiat_out = coin_in * fiat / coin`, widened to `i128`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    coin: Coin,
    fiat: Fiat,
    as_of: Option<DateTime<Utc>>,
}

impl ExchangeRate {
    /// Creates a rate from an explicit coin/fiat pair. Both sides must be
    /// positive.
    pub fn new(coin: Coin, fiat: Fiat) -> Result<Self> {
        if coin.value() <= 0 {
            return Err(MoneyError::InvalidAmount(format!("{}", coin.value())).into());
        }
        if !fiat.is_positive() {
            return Err(MoneyError::InvalidAmount(format!("{}", fiat.value())).into());
        }
        Ok(Self {
            coin,
            fiat,
            as_of: None,
        })
    }

    /// Creates a rate quoting `fiat` per one whole coin.
    pub fn per_coin(fiat: Fiat) -> Result<Self> {
        Self::new(Coin::COIN, fiat)
    }

    /// Attaches the timestamp the rate was quoted at.
    #[must_use]
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Converts a coin amount into its fiat equivalent at this rate.
    ///
    /// The division truncates toward zero, matching smallest-unit wallet
    /// arithmetic. A result outside the `i64` range is an overflow error.
    pub fn coin_to_fiat(&self, amount: Coin) -> Result<Fiat> {
        let converted =
            amount.value() as i128 * self.fiat.value() as i128 / self.coin.value() as i128;
        let value = i64::try_from(converted).map_err(|_| MoneyError::Overflow)?;
        Fiat::from_units(self.fiat.currency_code(), value)
    }

    #[must_use]
    pub fn currency_code(&self) -> &str {
        self.fiat.currency_code()
    }

    #[must_use]
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }
}

/// Returns the display symbol for an ISO 4217 currency code, falling back to
/// the code itself when no dedicated symbol is known.
#[must_use]
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" | "AUD" | "CAD" | "NZD" | "SGD" | "HKD" | "MXN" => "$",
        "EUR" => "\u{20ac}",
        "GBP" => "\u{a3}",
        "JPY" | "CNY" => "\u{a5}",
        "KRW" => "\u{20a9}",
        "INR" => "\u{20b9}",
        "RUB" => "\u{20bd}",
        "TRY" => "\u{20ba}",
        "UAH" => "\u{20b4}",
        "PLN" => "z\u{142}",
        "BRL" => "R$",
        "ILS" => "\u{20aa}",
        "THB" => "\u{e3f}",
        "VND" => "\u{20ab}",
        _ => code,
    }
}
