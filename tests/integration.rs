// SPDX-License-Identifier: MPL-2.0
//! End-to-end exercises of the confirmation flow through the public API:
//! request construction, the acknowledgment state machine, the one-shot
//! decision channel, and the display formatting contracts.

use payprompt::config::{self, Config};
use payprompt::i18n::fluent::I18n;
use payprompt::money::{Coin, ExchangeRate, Fiat};
use payprompt::rates::{RateSource, TomlRateSource};
use payprompt::ui::confirm_dialog::{
    channel::Poll, coin_display, decision_channel, fiat_display, Event, Message, Request, Stage,
    State,
};
use tempfile::tempdir;

fn sample_request() -> Request {
    Request {
        title: "Confirm Payment".to_string(),
        message_markup: "<b>Pay now?</b>".to_string(),
        amount: Coin::from_units(100_000_000),
    }
}

fn english_i18n() -> I18n {
    I18n::new(Some("en-US".to_string()), None, &Config::default())
}

#[test]
fn full_confirmation_flow_emits_one_decision() {
    let (sender, mut receiver) = decision_channel();
    let mut dialog = State::open(sample_request(), sender);

    // render-facing state after open
    assert_eq!(dialog.stage(), Stage::Unacknowledged);
    assert_eq!(dialog.request().title, "Confirm Payment");
    assert_eq!(dialog.message_segments()[0].text, "Pay now?");
    assert!(dialog.message_segments()[0].bold);

    // the confirm action is unreachable until acknowledged
    assert_eq!(dialog.update(Message::ConfirmPressed), Event::None);
    assert_eq!(receiver.try_poll(), Poll::Pending);

    // acknowledge, confirm: dialog closes first, then the decision lands
    dialog.update(Message::AcknowledgeToggled(true));
    assert_eq!(dialog.update(Message::ConfirmPressed), Event::Confirmed);
    dialog.send_decision();
    assert_eq!(receiver.try_poll(), Poll::Decided(true));
}

#[test]
fn dismissal_never_emits_a_decision() {
    // unacknowledged backdrop dismiss
    let (sender, mut receiver) = decision_channel();
    let mut dialog = State::open(sample_request(), sender);
    assert_eq!(dialog.update(Message::Dismissed), Event::Dismissed);
    drop(dialog);
    assert_eq!(receiver.try_poll(), Poll::Abandoned);

    // acknowledged dismiss behaves the same
    let (sender, mut receiver) = decision_channel();
    let mut dialog = State::open(sample_request(), sender);
    dialog.update(Message::AcknowledgeToggled(true));
    assert_eq!(dialog.update(Message::Dismissed), Event::Dismissed);
    drop(dialog);
    assert_eq!(receiver.try_poll(), Poll::Abandoned);
}

#[tokio::test]
async fn host_receives_decision_asynchronously() {
    let (sender, receiver) = decision_channel();
    let mut dialog = State::open(sample_request(), sender);

    dialog.update(Message::AcknowledgeToggled(true));
    dialog.update(Message::ConfirmPressed);
    dialog.send_decision();

    assert_eq!(receiver.recv().await, Some(true));
}

#[test]
fn one_coin_without_rate_renders_placeholder() {
    let i18n = english_i18n();
    let amount = Coin::from_units(100_000_000);

    assert_eq!(coin_display(amount), "1.00");
    let (symbol, fiat) = fiat_display(amount, None, &i18n);
    assert_eq!(symbol, "");
    assert_eq!(fiat, "Not Available");
}

#[test]
fn one_coin_at_fifty_dollars_renders_fiat() {
    let i18n = english_i18n();
    let amount = Coin::from_units(100_000_000);
    let rate = ExchangeRate::per_coin(Fiat::parse("USD", "50.00").unwrap()).unwrap();

    let (symbol, fiat) = fiat_display(amount, Some(&rate), &i18n);
    assert_eq!(symbol, "$");
    assert_eq!(fiat, "50.00");
}

#[test]
fn rate_changes_between_polls_are_observed() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("rates.toml");
    let source = TomlRateSource::new(&path);

    assert_eq!(source.current().unwrap(), None);

    std::fs::write(&path, "currency = \"USD\"\nfiat-per-coin = \"50.00\"\n").expect("write");
    let first = source.current().unwrap().unwrap();

    std::fs::write(&path, "currency = \"USD\"\nfiat-per-coin = \"51.25\"\n").expect("write");
    let second = source.current().unwrap().unwrap();

    let amount = Coin::COIN;
    assert_eq!(first.coin_to_fiat(amount).unwrap().value(), 500_000);
    assert_eq!(second.coin_to_fiat(amount).unwrap().value(), 512_500);
}

#[test]
fn config_language_drives_locale_and_placeholder() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    let mut written = Config::default();
    written.general.language = Some("fr".to_string());
    config::save_to_path(&written, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    let i18n = I18n::new(None, None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");

    let (symbol, fiat) = fiat_display(Coin::COIN, None, &i18n);
    assert_eq!(symbol, "");
    assert_eq!(fiat, "Non disponible");
}
