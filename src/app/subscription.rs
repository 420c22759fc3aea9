// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! All three subscriptions are scoped: rate polling and the Escape handler
//! exist only while the dialog is visible, and the toast tick only while
//! something is showing. Scoping the rate subscription to the dialog's
//! lifetime is what guarantees no rate update is delivered after teardown.

use super::Message;
use crate::ui::confirm_dialog;
use iced::{keyboard, time, Subscription};
use std::time::Duration;

/// Polls the exchange-rate source while the dialog is open.
pub fn rate_refresh(dialog_open: bool, refresh: Duration) -> Subscription<Message> {
    if dialog_open {
        time::every(refresh).map(Message::RateTick)
    } else {
        Subscription::none()
    }
}

/// Routes Escape to a dialog dismissal while the dialog is open.
///
/// Escape is the keyboard form of the host framework's generic dismiss; like
/// a backdrop click it discards the dialog without emitting a decision.
pub fn dialog_keys(dialog_open: bool) -> Subscription<Message> {
    if dialog_open {
        keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            } => Some(Message::Dialog(confirm_dialog::Message::Dismissed)),
            _ => None,
        })
    } else {
        Subscription::none()
    }
}

/// Creates a periodic tick subscription for toast auto-dismiss.
pub fn notification_tick(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(250)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
