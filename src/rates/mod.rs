// SPDX-License-Identifier: MPL-2.0
//! Exchange-rate sources.
//!
//! The dialog never fetches rates itself; it observes whatever the
//! application's [`RateSource`] currently quotes. A source may legitimately
//! have no rate at all, which the UI renders as a localized placeholder.

use crate::config::PaymentConfig;
use crate::error::{Error, Result};
use crate::money::{ExchangeRate, Fiat};
use chrono::DateTime;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Seam between the application and wherever exchange rates come from.
///
/// `current` is polled on the UI refresh timer while the confirmation dialog
/// is visible; results re-enter the update loop as messages.
pub trait RateSource: Send + Sync {
    /// Returns the current quote, or `None` when no rate is known.
    fn current(&self) -> Result<Option<ExchangeRate>>;
}

/// A source quoting a constant rate (or constantly nothing).
///
/// Backs the `fiat-per-coin` config setting and most tests.
#[derive(Debug, Clone, Default)]
pub struct FixedRateSource {
    rate: Option<ExchangeRate>,
}

impl FixedRateSource {
    #[must_use]
    pub fn new(rate: Option<ExchangeRate>) -> Self {
        Self { rate }
    }
}

impl RateSource for FixedRateSource {
    fn current(&self) -> Result<Option<ExchangeRate>> {
        Ok(self.rate.clone())
    }
}

/// On-disk rate document, re-read on every poll so the quote can change while
/// the dialog is open.
///
/// ```toml
/// currency = "USD"
/// fiat-per-coin = "50.00"
/// as-of = "2026-08-07T12:00:00Z"   # optional, RFC 3339
/// ```
#[derive(Debug, Clone)]
pub struct TomlRateSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RateDoc {
    currency: String,
    fiat_per_coin: String,
    #[serde(default)]
    as_of: Option<String>,
}

impl TomlRateSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RateSource for TomlRateSource {
    fn current(&self) -> Result<Option<ExchangeRate>> {
        // A rate document that does not exist yet means "no rate", not an
        // error; anything unreadable or unparsable is reported.
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let doc: RateDoc =
            toml::from_str(&content).map_err(|e| Error::Rates(e.to_string()))?;
        let mut rate = ExchangeRate::per_coin(Fiat::parse(&doc.currency, &doc.fiat_per_coin)?)?;
        if let Some(as_of) = doc.as_of {
            let quoted = DateTime::parse_from_rfc3339(&as_of)
                .map_err(|e| Error::Rates(format!("invalid as-of timestamp: {}", e)))?;
            rate = rate.with_as_of(quoted.to_utc());
        }
        Ok(Some(rate))
    }
}

/// Builds the rate source the app will poll, in order of precedence:
/// an explicit rates file (CLI flag), the configured rates file, the
/// configured fixed quote, and finally a source with no rate.
///
/// A malformed fixed quote in the config is treated as "no rate" here; the
/// first poll of a malformed rates *file* surfaces the error instead, since
/// the file is expected to change at runtime.
#[must_use]
pub fn build_source(payment: &PaymentConfig, rates_file: Option<&Path>) -> Arc<dyn RateSource> {
    if let Some(path) = rates_file.or(payment.rates_file.as_deref()) {
        return Arc::new(TomlRateSource::new(path));
    }
    let fixed = payment.fiat_per_coin.as_deref().and_then(|quote| {
        let fiat = Fiat::parse(&payment.currency, quote).ok()?;
        ExchangeRate::per_coin(fiat).ok()
    });
    Arc::new(FixedRateSource::new(fixed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Coin;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn fixed_source_returns_its_rate() {
        let rate = ExchangeRate::per_coin(Fiat::parse("USD", "50.00").unwrap()).unwrap();
        let source = FixedRateSource::new(Some(rate.clone()));
        assert_eq!(source.current().unwrap(), Some(rate));
    }

    #[test]
    fn empty_fixed_source_returns_none() {
        let source = FixedRateSource::default();
        assert_eq!(source.current().unwrap(), None);
    }

    #[test]
    fn toml_source_reads_quote_and_timestamp() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("rates.toml");
        fs::write(
            &path,
            "currency = \"EUR\"\nfiat-per-coin = \"42.50\"\nas-of = \"2026-08-07T12:00:00Z\"\n",
        )
        .expect("write");

        let rate = TomlRateSource::new(&path).current().unwrap().unwrap();
        assert_eq!(rate.currency_code(), "EUR");
        assert!(rate.as_of().is_some());
        let fiat = rate.coin_to_fiat(Coin::COIN).unwrap();
        assert_eq!(fiat.value(), 425_000);
    }

    #[test]
    fn toml_source_missing_file_is_no_rate() {
        let dir = tempdir().expect("temp dir");
        let source = TomlRateSource::new(dir.path().join("nope.toml"));
        assert_eq!(source.current().unwrap(), None);
    }

    #[test]
    fn toml_source_reports_malformed_documents() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("rates.toml");
        fs::write(&path, "currency = \"EUR\"\n").expect("write");

        assert!(TomlRateSource::new(&path).current().is_err());
    }

    #[test]
    fn toml_source_reports_bad_quote() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("rates.toml");
        fs::write(&path, "currency = \"EUR\"\nfiat-per-coin = \"lots\"\n").expect("write");

        assert!(TomlRateSource::new(&path).current().is_err());
    }

    #[test]
    fn build_source_prefers_rates_file_over_fixed_quote() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("rates.toml");
        fs::write(&path, "currency = \"GBP\"\nfiat-per-coin = \"10\"\n").expect("write");

        let mut payment = PaymentConfig::default();
        payment.fiat_per_coin = Some("99.99".to_string());

        let source = build_source(&payment, Some(&path));
        let rate = source.current().unwrap().unwrap();
        assert_eq!(rate.currency_code(), "GBP");
    }

    #[test]
    fn build_source_uses_configured_fixed_quote() {
        let mut payment = PaymentConfig::default();
        payment.currency = "USD".to_string();
        payment.fiat_per_coin = Some("50.00".to_string());

        let source = build_source(&payment, None);
        let rate = source.current().unwrap().unwrap();
        assert_eq!(rate.currency_code(), "USD");
    }

    #[test]
    fn build_source_without_quote_has_no_rate() {
        let payment = PaymentConfig::default();
        let source = build_source(&payment, None);
        assert_eq!(source.current().unwrap(), None);
    }
}
