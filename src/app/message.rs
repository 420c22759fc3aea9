// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::money::ExchangeRate;
use crate::ui::confirm_dialog;
use crate::ui::home;
use crate::ui::notifications;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Dialog(confirm_dialog::Message),
    Notification(notifications::Message),
    /// Poll the rate source (fires only while the dialog is open).
    RateTick(Instant),
    /// Result of polling the rate source.
    RateFetched(Result<Option<ExchangeRate>, Error>),
    /// The dialog's decision channel resolved; `None` means it was
    /// abandoned without a decision.
    DecisionResolved(Option<bool>),
    /// Periodic tick for toast auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
///
/// Payment fields override their config counterparts; everything is optional
/// so a bare launch falls back entirely to `settings.toml`.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional dialog title.
    pub title: Option<String>,
    /// Optional dialog message (HTML-subset markup).
    pub message: Option<String>,
    /// Optional amount in smallest coin units.
    pub amount: Option<i64>,
    /// Optional path to a TOML rate document.
    pub rates_file: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `PAYPROMPT_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
}
