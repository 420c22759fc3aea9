// SPDX-License-Identifier: MPL-2.0
//! Human-readable formatting for fixed-point monetary values.
//!
//! The formatter follows the classic wallet convention: a fixed number of
//! minimum decimals, then optional groups of further decimals that are only
//! shown when the value needs them. One whole coin renders as `"1.00"`, a
//! value with eight significant decimals as `"1.23456789"`, and a value that
//! ends inside an optional group keeps the whole group (`"1.00000010"`).

use unic_langid::LanguageIdentifier;

/// Configurable monetary formatter.
///
/// `format` never emits a currency code or symbol; callers render those
/// separately so the symbol can be styled on its own.
#[derive(Debug, Clone)]
pub struct MonetaryFormat {
    min_decimals: usize,
    decimal_groups: Vec<usize>,
    decimal_separator: char,
}

impl MonetaryFormat {
    /// Coin format: two minimum decimals plus three optional groups of two,
    /// for a maximum of eight.
    #[must_use]
    pub fn coin() -> Self {
        Self {
            min_decimals: 2,
            decimal_groups: vec![2, 2, 2],
            decimal_separator: '.',
        }
    }

    /// Fiat format: exactly two decimals.
    #[must_use]
    pub fn fiat() -> Self {
        Self {
            min_decimals: 2,
            decimal_groups: Vec::new(),
            decimal_separator: '.',
        }
    }

    /// Replaces the decimal separator, e.g. `','` for French locales.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Formats `value` smallest units, where one major unit is
    /// `10^smallest_unit_exponent` smallest units.
    ///
    /// Values beyond the maximum decimals are rounded half-up. Trailing
    /// optional groups that would be all zeros are dropped; a group is shown
    /// in full or not at all.
    #[must_use]
    pub fn format(&self, value: i64, smallest_unit_exponent: u32) -> String {
        let max_decimals = self.min_decimals + self.decimal_groups.iter().sum::<usize>();
        debug_assert!(max_decimals as u32 <= smallest_unit_exponent);

        // Round half-up to the maximum displayable precision.
        let precision = 10_u128.pow(smallest_unit_exponent - max_decimals as u32);
        let rounded = ((value as i128).unsigned_abs() + precision / 2) / precision;

        let scale = 10_u128.pow(max_decimals as u32);
        let major = rounded / scale;
        let digits = format!("{:0width$}", rounded % scale, width = max_decimals);

        let mut decimals = self.min_decimals;
        for group in &self.decimal_groups {
            if digits[decimals..].bytes().all(|b| b == b'0') {
                break;
            }
            decimals += group;
        }

        let mut out = String::new();
        if value < 0 && rounded != 0 {
            out.push('-');
        }
        out.push_str(&major.to_string());
        if decimals > 0 {
            out.push(self.decimal_separator);
            out.push_str(&digits[..decimals]);
        }
        out
    }
}

/// Returns the decimal separator conventional for the given locale.
///
/// This intentionally covers only the languages the application ships
/// translations for, plus the common comma-separator languages; everything
/// else falls back to `'.'`.
#[must_use]
pub fn decimal_separator_for(locale: &LanguageIdentifier) -> char {
    match locale.language.as_str() {
        "fr" | "de" | "es" | "it" | "pt" | "nl" | "sv" | "da" | "fi" | "nb" | "pl" | "cs"
        | "ru" | "tr" | "uk" | "id" | "vi" => ',',
        _ => '.',
    }
}
