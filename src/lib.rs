// SPDX-License-Identifier: MPL-2.0
//! `payprompt` is a payment confirmation surface built with the Iced GUI framework.
//!
//! It presents a modal, checkbox-gated confirmation dialog for cryptocurrency
//! payments: a title, a rich-text message, the coin amount, and its fiat
//! equivalent derived from an exchange-rate source. The user's decision is
//! reported to the hosting screen over a one-shot channel. The crate also
//! demonstrates internationalization with Fluent and user preference
//! management.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod money;
pub mod rates;
pub mod ui;
