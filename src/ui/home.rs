// SPDX-License-Identifier: MPL-2.0
//! Home screen hosting the confirmation dialog.
//!
//! The screen shows the pending payment request, opens the dialog on demand,
//! and reflects the decision that comes back over the dialog's one-shot
//! channel.

use crate::i18n::fluent::I18n;
use crate::money::ExchangeRate;
use crate::ui::confirm_dialog::coin_display;
use crate::ui::design_tokens::{radius, spacing, typography};
use crate::ui::markup;
use iced::widget::{button, container, text, Column, Container};
use iced::{alignment, Border, Element, Length, Theme};

/// Where the hosted payment request currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// The dialog has not been opened yet.
    #[default]
    Idle,
    /// The dialog is open and no decision has arrived.
    Pending,
    /// The decision channel delivered a confirmation.
    Confirmed,
    /// The dialog went away without confirming.
    Dismissed,
}

impl Outcome {
    fn status_key(self) -> &'static str {
        match self {
            Outcome::Idle => "home-status-idle",
            Outcome::Pending => "home-status-pending",
            Outcome::Confirmed => "home-status-confirmed",
            Outcome::Dismissed => "home-status-dismissed",
        }
    }
}

/// Host screen state: the request to be confirmed and its outcome so far.
#[derive(Debug, Clone)]
pub struct State {
    pub title: String,
    pub message_markup: String,
    pub amount: crate::money::Coin,
    outcome: Outcome,
}

impl State {
    #[must_use]
    pub fn new(title: String, message_markup: String, amount: crate::money::Coin) -> Self {
        Self {
            title,
            message_markup,
            amount,
            outcome: Outcome::Idle,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }
}

/// Messages emitted by the home screen.
#[derive(Debug, Clone)]
pub enum Message {
    ReviewPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user asked to review the payment; the host should open the dialog.
    OpenRequested,
}

/// Process a home screen message and return the corresponding event.
#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::ReviewPressed => Event::OpenRequested,
    }
}

/// Contextual data needed to render the home screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub rate: Option<&'a ExchangeRate>,
}

/// Render the home screen.
#[must_use]
pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let heading = text(ctx.i18n.tr("home-heading")).size(typography::TITLE_LG);

    let summary = request_summary(state);

    let review = button(
        text(ctx.i18n.tr("home-review-button")).size(typography::BODY),
    )
    .padding(spacing::SM)
    .style(button::primary)
    .on_press_maybe((state.outcome() != Outcome::Pending).then_some(Message::ReviewPressed));

    let status = text(ctx.i18n.tr(state.outcome().status_key())).size(typography::BODY);

    let mut content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(heading)
        .push(summary)
        .push(review)
        .push(status);

    // Rate freshness is only worth a caption when the source stamps it.
    if let Some(as_of) = ctx.rate.and_then(ExchangeRate::as_of) {
        let stamp = as_of.format("%Y-%m-%d %H:%M UTC").to_string();
        content = content.push(
            text(ctx.i18n.tr_with_args("home-rate-caption", &[("time", stamp.as_str())]))
                .size(typography::CAPTION),
        );
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::XL)
        .into()
}

/// The request card: title, plain-text message, coin amount.
fn request_summary(state: &State) -> Element<'_, Message> {
    let inner = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(text(state.title.as_str()).size(typography::BODY_LG))
        .push(text(markup::plain_text(&state.message_markup)).size(typography::BODY))
        .push(text(coin_display(state.amount)).size(typography::TITLE_MD));

    Container::new(inner)
        .padding(spacing::MD)
        .style(|theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Coin;

    fn sample_state() -> State {
        State::new(
            "Confirm Payment".to_string(),
            "<b>Pay now?</b>".to_string(),
            Coin::COIN,
        )
    }

    #[test]
    fn review_press_requests_dialog() {
        assert_eq!(update(&Message::ReviewPressed), Event::OpenRequested);
    }

    #[test]
    fn outcome_starts_idle_and_is_settable() {
        let mut state = sample_state();
        assert_eq!(state.outcome(), Outcome::Idle);
        state.set_outcome(Outcome::Confirmed);
        assert_eq!(state.outcome(), Outcome::Confirmed);
    }

    #[test]
    fn every_outcome_has_a_status_key() {
        let i18n = I18n::default();
        for outcome in [
            Outcome::Idle,
            Outcome::Pending,
            Outcome::Confirmed,
            Outcome::Dismissed,
        ] {
            let resolved = i18n.tr(outcome.status_key());
            assert!(!resolved.starts_with("MISSING:"), "{:?}", outcome);
        }
    }

    #[test]
    fn home_view_renders() {
        let state = sample_state();
        let i18n = I18n::default();
        let _element = view(&state, ViewContext { i18n: &i18n, rate: None });
    }
}
