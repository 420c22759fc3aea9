// SPDX-License-Identifier: MPL-2.0
//! Modal payment confirmation dialog.
//!
//! The dialog renders a title, a rich-text message, and the payment amount
//! with its fiat equivalent, then gates the confirm action behind an explicit
//! acknowledgment checkbox. The user's decision leaves the component through
//! a one-shot [`channel`]; dismissing the dialog any other way emits nothing.
//!
//! The interaction is an explicit state machine rather than a pile of view
//! flags:
//!
//! ```text
//! Unacknowledged <-> Acknowledged -> Confirmed (terminal)
//! ```
//!
//! `Confirm` is only honored in `Acknowledged`, which keeps the "no decision
//! without acknowledgment" invariant in one place instead of relying on the
//! button being disabled.

pub mod channel;
mod view;

pub use channel::{decision_channel, DecisionReceiver, DecisionSender};
pub use view::{view, ViewContext};

use crate::i18n::fluent::I18n;
use crate::money::format::decimal_separator_for;
use crate::money::{currency_symbol, Coin, ExchangeRate, Fiat, MonetaryFormat};
use crate::ui::markup::{self, Segment};

/// Immutable payment request the dialog was opened for.
///
/// All three fields are required constructor inputs; the dialog does not
/// interpret the amount's sign or range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Shown verbatim as the dialog heading.
    pub title: String,
    /// HTML-subset markup, parsed once at open time.
    pub message_markup: String,
    /// Amount in smallest coin units.
    pub amount: Coin,
}

/// Dialog interaction stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unacknowledged,
    Acknowledged,
    Confirmed,
}

impl Stage {
    #[must_use]
    pub fn is_acknowledged(self) -> bool {
        matches!(self, Stage::Acknowledged)
    }
}

/// Messages emitted by the dialog's widgets (and the host's Escape handler).
#[derive(Debug, Clone)]
pub enum Message {
    /// The acknowledgment checkbox was toggled.
    AcknowledgeToggled(bool),
    /// The confirm button was pressed.
    ConfirmPressed,
    /// Backdrop click, Escape, or any other host-side dismissal.
    Dismissed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The user confirmed while acknowledged. The host must close the dialog
    /// and then call [`State::send_decision`].
    Confirmed,
    /// The dialog should be discarded without emitting a decision.
    Dismissed,
}

/// Dialog state for one payment request.
///
/// The acknowledgment stage resets on every construction and is never
/// persisted.
#[derive(Debug)]
pub struct State {
    request: Request,
    segments: Vec<Segment>,
    stage: Stage,
    decision: Option<DecisionSender>,
}

impl State {
    /// Opens the dialog for `request`, wiring it to the host's decision
    /// channel.
    #[must_use]
    pub fn open(request: Request, decision: DecisionSender) -> Self {
        let segments = markup::parse(&request.message_markup);
        Self {
            request,
            segments,
            stage: Stage::Unacknowledged,
            decision: Some(decision),
        }
    }

    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Parsed message segments, as rendered.
    #[must_use]
    pub fn message_segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Advances the state machine; returns the event the host must act on.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::AcknowledgeToggled(checked) => {
                // Toggles after confirmation are stale UI events
                if self.stage != Stage::Confirmed {
                    self.stage = if checked {
                        Stage::Acknowledged
                    } else {
                        Stage::Unacknowledged
                    };
                }
                Event::None
            }
            Message::ConfirmPressed => {
                if self.stage == Stage::Acknowledged {
                    self.stage = Stage::Confirmed;
                    Event::Confirmed
                } else {
                    // The button is unreachable outside Acknowledged; this
                    // guard keeps the invariant even for synthetic messages.
                    Event::None
                }
            }
            Message::Dismissed => {
                if self.stage == Stage::Confirmed {
                    Event::None
                } else {
                    Event::Dismissed
                }
            }
        }
    }

    /// Consumes the closed dialog and emits `true` on its decision channel.
    ///
    /// Called by the host after it has removed the dialog from view, so the
    /// close happens before the emission. Dropping the state instead (the
    /// dismiss path) drops the sender and emits nothing.
    pub fn send_decision(mut self) {
        debug_assert_eq!(self.stage, Stage::Confirmed);
        if let Some(decision) = self.decision.take() {
            decision.send(true);
        }
    }
}

/// Formatted coin amount for display, without a currency code.
#[must_use]
pub fn coin_display(amount: Coin) -> String {
    MonetaryFormat::coin().format(amount.value(), Coin::SMALLEST_UNIT_EXPONENT)
}

/// Fiat line for display: `(symbol, amount text)`.
///
/// With a usable rate the amount is converted and formatted with the active
/// locale's decimal separator and the rate currency's symbol. Without one
/// (including a conversion overflow) the localized "not available"
/// placeholder is shown with an empty symbol.
#[must_use]
pub fn fiat_display(
    amount: Coin,
    rate: Option<&ExchangeRate>,
    i18n: &I18n,
) -> (String, String) {
    match rate.and_then(|rate| rate.coin_to_fiat(amount).ok()) {
        Some(fiat) => {
            let separator = decimal_separator_for(i18n.current_locale());
            let text = MonetaryFormat::fiat()
                .with_separator(separator)
                .format(fiat.value(), Fiat::SMALLEST_UNIT_EXPONENT);
            (currency_symbol(fiat.currency_code()).to_string(), text)
        }
        None => (String::new(), i18n.tr("rate-not-available")),
    }
}
