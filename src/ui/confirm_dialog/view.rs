// SPDX-License-Identifier: MPL-2.0
//! Rendering for the confirmation dialog card.
//!
//! The card re-renders on every state or rate change; all display strings are
//! derived here so the state struct stays free of presentation concerns.

use super::{coin_display, fiat_display, Message, State};
use crate::i18n::fluent::I18n;
use crate::money::ExchangeRate;
use crate::ui::design_tokens::{radius, shadow, sizing, spacing, typography};
use crate::ui::markup::Segment;
use iced::font::{Style as FontStyle, Weight};
use iced::widget::{button, checkbox, container, rich_text, span, text, Column, Container, Row};
use iced::{alignment, Element, Font, Length, Theme};

/// Contextual data needed to render the dialog.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Latest observed exchange rate, if any.
    pub rate: Option<&'a ExchangeRate>,
}

/// Render the dialog card.
#[must_use]
pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = text(state.request().title.as_str()).size(typography::TITLE_MD);

    let message = message_view(state.message_segments());

    let amount_row = amount_view(state, &ctx);

    let acknowledge = checkbox(state.stage().is_acknowledged())
        .label(ctx.i18n.tr("confirm-dialog-acknowledge"))
        .on_toggle(Message::AcknowledgeToggled)
        .text_size(typography::BODY);

    let confirm = button(
        text(ctx.i18n.tr("confirm-dialog-confirm-button"))
            .size(typography::BODY)
            .align_x(alignment::Horizontal::Center)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(button::primary)
    .on_press_maybe(
        state
            .stage()
            .is_acknowledged()
            .then_some(Message::ConfirmPressed),
    );

    let content = Column::new()
        .spacing(spacing::MD)
        .push(title)
        .push(message)
        .push(amount_row)
        .push(acknowledge)
        .push(confirm);

    Container::new(content)
        .width(Length::Fixed(sizing::DIALOG_WIDTH))
        .padding(spacing::LG)
        .style(card_style)
        .into()
}

/// Renders the parsed message segments as rich text.
fn message_view(segments: &[Segment]) -> Element<'_, Message> {
    // No spans carry links, hence the unit link type.
    let spans: Vec<iced::widget::text::Span<'_, ()>> = segments
        .iter()
        .map(|segment| {
            let mut font = Font::DEFAULT;
            if segment.bold {
                font.weight = Weight::Bold;
            }
            if segment.italic {
                font.style = FontStyle::Italic;
            }
            span(segment.text.as_str())
                .font(font)
                .underline(segment.underline)
        })
        .collect();

    rich_text(spans).size(typography::BODY).into()
}

/// Renders the coin amount with its fiat equivalent underneath.
fn amount_view<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let amount = state.request().amount;
    let coin_text = text(coin_display(amount)).size(typography::BODY_LG);

    let (fiat_symbol, fiat_amount) = fiat_display(amount, ctx.rate, ctx.i18n);
    let fiat_row = Row::new()
        .spacing(spacing::XXS)
        .push(text(fiat_symbol).size(typography::BODY))
        .push(text(fiat_amount).size(typography::BODY).style(
            |theme: &Theme| text::Style {
                color: Some(theme.extended_palette().background.strong.color),
            },
        ));

    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(coin_text)
        .push(fiat_row)
        .into()
}

/// Style function for the dialog card.
fn card_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.base.color,
        )),
        border: iced::Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::LG,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
