// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the home screen and the
//! confirmation dialog.
//!
//! The `App` struct wires together the domains (home screen, dialog,
//! localization, exchange rates) and translates messages into side effects.
//! The decision-channel plumbing lives here on purpose: the host creates the
//! channel, the dialog owns the sender, and the outcome re-enters the update
//! loop as a message, so the whole confirmation flow is auditable in one
//! place.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::money::{Coin, ExchangeRate};
use crate::rates::{self, RateSource};
use crate::ui::confirm_dialog::{self, decision_channel};
use crate::ui::home::{self, Outcome};
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use iced::widget::{center, container, mouse_area, opaque, Stack};
use iced::{window, Color, Element, Length, Subscription, Task, Theme};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 560;
pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Root Iced application state that bridges the host screen, the modal
/// dialog, localization, and the exchange-rate source.
pub struct App {
    pub i18n: I18n,
    home: home::State,
    dialog: Option<confirm_dialog::State>,
    /// Latest rate observed while the dialog is open.
    rate: Option<ExchangeRate>,
    rate_source: Arc<dyn RateSource>,
    rate_refresh: Duration,
    theme_mode: ThemeMode,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("dialog_open", &self.dialog.is_some())
            .field("outcome", &self.home.outcome())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        (App::new(flags), Task::none())
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(Config::default(), None, I18n::default())
    }
}

impl App {
    /// Initializes application state from CLI flags and the config file.
    fn new(flags: Flags) -> Self {
        let config_dir = flags.config_dir.as_deref().map(Path::new);
        let (mut config, config_warning) = config::load(config_dir);

        if let Some(title) = flags.title {
            config.payment.title = title;
        }
        if let Some(message) = flags.message {
            config.payment.message = message;
        }
        if let Some(amount) = flags.amount {
            config.payment.amount = amount;
        }

        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);
        let rates_file = flags.rates_file.as_deref().map(Path::new);
        let mut app = Self::with_config(config, rates_file, i18n);

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }
        app
    }

    /// Builds the app around an explicit config; shared by `new`, `Default`,
    /// and tests.
    fn with_config(config: Config, rates_file: Option<&Path>, i18n: I18n) -> Self {
        let home = home::State::new(
            config.payment.title.clone(),
            config.payment.message.clone(),
            Coin::from_units(config.payment.amount),
        );
        let rate_source = rates::build_source(&config.payment, rates_file);

        Self {
            i18n,
            home,
            dialog: None,
            rate: None,
            rate_source,
            rate_refresh: Duration::from_secs(config.payment.rate_refresh_secs.max(1)),
            theme_mode: config.general.theme_mode,
            notifications: notifications::Manager::new(),
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.resolve()
    }

    fn subscription(&self) -> Subscription<Message> {
        let dialog_open = self.dialog.is_some();
        Subscription::batch([
            subscription::rate_refresh(dialog_open, self.rate_refresh),
            subscription::dialog_keys(dialog_open),
            subscription::notification_tick(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Home(home_message) => match home::update(&home_message) {
                home::Event::OpenRequested => self.open_payment_dialog(),
            },
            Message::Dialog(dialog_message) => self.handle_dialog_message(dialog_message),
            Message::RateTick(_instant) => self.fetch_rate_task(),
            Message::RateFetched(Ok(rate)) => {
                // The subscription dies with the dialog, but a poll already in
                // flight at teardown may still land here; drop it.
                if self.dialog.is_some() {
                    self.rate = rate;
                }
                Task::none()
            }
            Message::RateFetched(Err(_error)) => {
                self.notifications
                    .push(notifications::Notification::warning(
                        "notification-rates-load-error",
                    ));
                Task::none()
            }
            Message::DecisionResolved(decision) => {
                self.home.set_outcome(match decision {
                    Some(true) => Outcome::Confirmed,
                    Some(false) | None => Outcome::Dismissed,
                });
                Task::none()
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_instant) => {
                self.notifications.tick();
                Task::none()
            }
        }
    }

    /// Opens the confirmation dialog for the hosted payment request.
    ///
    /// Opening while a dialog is already up is a host programming error; it
    /// fails fast instead of silently re-wiring the channel.
    fn open_payment_dialog(&mut self) -> Task<Message> {
        if self.dialog.is_some() {
            debug_assert!(false, "confirmation dialog already open");
            self.notifications.push(notifications::Notification::error(
                "notification-dialog-already-open",
            ));
            return Task::none();
        }

        let request = confirm_dialog::Request {
            title: self.home.title.clone(),
            message_markup: self.home.message_markup.clone(),
            amount: self.home.amount,
        };

        let (sender, receiver) = decision_channel();
        self.dialog = Some(confirm_dialog::State::open(request, sender));
        self.home.set_outcome(Outcome::Pending);

        // Await the decision, and fetch a first rate right away; the refresh
        // subscription takes over from there.
        Task::batch([
            Task::perform(receiver.recv(), Message::DecisionResolved),
            self.fetch_rate_task(),
        ])
    }

    fn handle_dialog_message(&mut self, message: confirm_dialog::Message) -> Task<Message> {
        let Some(dialog) = self.dialog.as_mut() else {
            // Stale message from a subscription racing the close
            return Task::none();
        };

        match dialog.update(message) {
            confirm_dialog::Event::None => {}
            confirm_dialog::Event::Confirmed => {
                // Close first, then emit on the channel.
                if let Some(dialog) = self.dialog.take() {
                    self.rate = None;
                    dialog.send_decision();
                }
            }
            confirm_dialog::Event::Dismissed => {
                // Dropping the dialog drops the sender; the receiver resolves
                // with "abandoned" and no decision is ever emitted.
                self.dialog = None;
                self.rate = None;
            }
        }
        Task::none()
    }

    fn fetch_rate_task(&self) -> Task<Message> {
        let source = Arc::clone(&self.rate_source);
        Task::perform(async move { source.current() }, Message::RateFetched)
    }

    fn view(&self) -> Element<'_, Message> {
        let home_view = home::view(
            &self.home,
            home::ViewContext {
                i18n: &self.i18n,
                rate: self.rate.as_ref(),
            },
        )
        .map(Message::Home);

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(home_view);

        if let Some(dialog) = &self.dialog {
            layers = layers.push(self.dialog_overlay(dialog));
        }

        layers = layers.push(
            notifications::Toast::view_overlay(&self.notifications, &self.i18n)
                .map(Message::Notification),
        );

        layers.into()
    }

    /// Dims the screen behind the dialog card; clicking the backdrop is the
    /// pointer form of the generic dismiss.
    fn dialog_overlay<'a>(&'a self, dialog: &'a confirm_dialog::State) -> Element<'a, Message> {
        let card = confirm_dialog::view(
            dialog,
            confirm_dialog::ViewContext {
                i18n: &self.i18n,
                rate: self.rate.as_ref(),
            },
        )
        .map(Message::Dialog);

        let backdrop = container(center(opaque(card)))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(Color {
                    a: crate::ui::design_tokens::opacity::OVERLAY_STRONG,
                    ..Color::BLACK
                })),
                ..Default::default()
            });

        opaque(
            mouse_area(backdrop)
                .on_press(Message::Dialog(confirm_dialog::Message::Dismissed)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentConfig;
    use crate::money::Fiat;
    use crate::ui::confirm_dialog::{Message as DialogMessage, Stage};

    fn app_with_payment(payment: PaymentConfig) -> App {
        let config = Config {
            payment,
            ..Config::default()
        };
        App::with_config(config, None, I18n::default())
    }

    fn default_app() -> App {
        App::default()
    }

    fn usd_rate(quote: &str) -> ExchangeRate {
        ExchangeRate::per_coin(Fiat::parse("USD", quote).unwrap()).unwrap()
    }

    #[test]
    fn starts_idle_without_dialog() {
        let app = default_app();
        assert!(app.dialog.is_none());
        assert_eq!(app.home.outcome(), Outcome::Idle);
    }

    #[test]
    fn review_opens_dialog_and_marks_pending() {
        let mut app = default_app();
        let _ = app.update(Message::Home(home::Message::ReviewPressed));

        assert!(app.dialog.is_some());
        assert_eq!(app.home.outcome(), Outcome::Pending);
        assert_eq!(
            app.dialog.as_ref().unwrap().stage(),
            Stage::Unacknowledged
        );
    }

    #[test]
    fn dialog_carries_the_configured_request() {
        let mut payment = PaymentConfig::default();
        payment.title = "Upgrade".to_string();
        payment.message = "<b>Upgrade now?</b>".to_string();
        payment.amount = 250_000_000;
        let mut app = app_with_payment(payment);

        let _ = app.update(Message::Home(home::Message::ReviewPressed));

        let request = app.dialog.as_ref().unwrap().request();
        assert_eq!(request.title, "Upgrade");
        assert_eq!(request.message_markup, "<b>Upgrade now?</b>");
        assert_eq!(request.amount, Coin::from_units(250_000_000));
    }

    #[test]
    fn confirm_requires_acknowledgment() {
        let mut app = default_app();
        let _ = app.update(Message::Home(home::Message::ReviewPressed));

        let _ = app.update(Message::Dialog(DialogMessage::ConfirmPressed));
        assert!(app.dialog.is_some(), "unacknowledged confirm must be ignored");

        let _ = app.update(Message::Dialog(DialogMessage::AcknowledgeToggled(true)));
        let _ = app.update(Message::Dialog(DialogMessage::ConfirmPressed));
        assert!(app.dialog.is_none(), "acknowledged confirm closes the dialog");
    }

    #[test]
    fn decision_resolution_updates_outcome() {
        let mut app = default_app();
        let _ = app.update(Message::Home(home::Message::ReviewPressed));

        let _ = app.update(Message::DecisionResolved(Some(true)));
        assert_eq!(app.home.outcome(), Outcome::Confirmed);

        let _ = app.update(Message::DecisionResolved(None));
        assert_eq!(app.home.outcome(), Outcome::Dismissed);
    }

    #[test]
    fn dismiss_closes_dialog_and_clears_rate() {
        let mut app = default_app();
        let _ = app.update(Message::Home(home::Message::ReviewPressed));
        let _ = app.update(Message::RateFetched(Ok(Some(usd_rate("50.00")))));
        assert!(app.rate.is_some());

        let _ = app.update(Message::Dialog(DialogMessage::Dismissed));
        assert!(app.dialog.is_none());
        assert!(app.rate.is_none());
    }

    #[test]
    fn rate_updates_are_dropped_after_teardown() {
        let mut app = default_app();
        let _ = app.update(Message::RateFetched(Ok(Some(usd_rate("50.00")))));
        assert!(app.rate.is_none(), "no dialog, no observed rate");
    }

    #[test]
    fn rate_fetch_errors_surface_as_warnings() {
        let mut app = default_app();
        let _ = app.update(Message::RateFetched(Err(crate::error::Error::Rates(
            "boom".to_string(),
        ))));
        assert!(app.notifications.has_notifications());
    }

    #[test]
    fn dialog_messages_after_close_are_ignored() {
        let mut app = default_app();
        let _ = app.update(Message::Dialog(DialogMessage::Dismissed));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn subscription_builds_in_every_state() {
        let mut app = default_app();
        let _ = app.subscription();

        let _ = app.update(Message::Home(home::Message::ReviewPressed));
        let _ = app.subscription();
    }

    #[test]
    fn view_renders_with_and_without_dialog() {
        let mut app = default_app();
        let _ = app.view();
        let _ = app.update(Message::Home(home::Message::ReviewPressed));
        let _ = app.update(Message::RateFetched(Ok(Some(usd_rate("50.00")))));
        let _ = app.view();
    }
}
