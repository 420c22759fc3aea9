// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Rates(String),
    Money(MoneyError),
}

/// Specific error types for the monetary domain.
/// All arithmetic is fixed-point on `i64` smallest units, so overflow and
/// malformed decimal input are the only failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// A conversion or rounding step left the `i64` range.
    Overflow,

    /// A decimal amount string could not be parsed.
    InvalidAmount(String),

    /// A currency code is not a three-letter ISO 4217 code.
    InvalidCurrency(String),
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::Overflow => write!(f, "amount out of range"),
            MoneyError::InvalidAmount(s) => write!(f, "invalid amount: {}", s),
            MoneyError::InvalidCurrency(code) => write!(f, "invalid currency code: {}", code),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Rates(e) => write!(f, "Rates Error: {}", e),
            Error::Money(e) => write!(f, "Money Error: {}", e),
        }
    }
}

impl From<MoneyError> for Error {
    fn from(err: MoneyError) -> Self {
        Error::Money(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
