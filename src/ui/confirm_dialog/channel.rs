// SPDX-License-Identifier: MPL-2.0
//! One-shot decision channel between the dialog and its host.
//!
//! The host creates the channel when it opens the dialog, keeps the receiver,
//! and hands the sender to the dialog. Sending consumes the sender, so at
//! most one decision can ever be emitted; dropping the dialog without
//! confirming drops the sender and resolves the receiver with "abandoned".

use tokio::sync::oneshot;

/// Creates a fresh decision channel for one dialog instance.
#[must_use]
pub fn decision_channel() -> (DecisionSender, DecisionReceiver) {
    let (tx, rx) = oneshot::channel();
    (DecisionSender(tx), DecisionReceiver(rx))
}

/// Sending half, owned by the dialog.
#[derive(Debug)]
pub struct DecisionSender(oneshot::Sender<bool>);

impl DecisionSender {
    /// Emits the decision, consuming the sender. A receiver that has already
    /// gone away is ignored; the dialog has nothing left to do with the
    /// decision either way.
    pub fn send(self, confirmed: bool) {
        let _ = self.0.send(confirmed);
    }
}

/// Receiving half, owned by the host.
#[derive(Debug)]
pub struct DecisionReceiver(oneshot::Receiver<bool>);

/// Result of a non-blocking poll of the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// The dialog is still open.
    Pending,
    /// The dialog emitted a decision.
    Decided(bool),
    /// The dialog went away without deciding.
    Abandoned,
}

impl DecisionReceiver {
    /// Waits for the dialog's decision. Resolves to `None` when the dialog
    /// was dismissed without confirming.
    pub async fn recv(self) -> Option<bool> {
        self.0.await.ok()
    }

    /// Non-blocking check, used by synchronous test drivers.
    pub fn try_poll(&mut self) -> Poll {
        use tokio::sync::oneshot::error::TryRecvError;
        match self.0.try_recv() {
            Ok(confirmed) => Poll::Decided(confirmed),
            Err(TryRecvError::Empty) => Poll::Pending,
            Err(TryRecvError::Closed) => Poll::Abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_resolves_receiver_once() {
        let (tx, mut rx) = decision_channel();
        assert_eq!(rx.try_poll(), Poll::Pending);

        tx.send(true);
        assert_eq!(rx.try_poll(), Poll::Decided(true));
    }

    #[test]
    fn dropping_sender_abandons_receiver() {
        let (tx, mut rx) = decision_channel();
        drop(tx);
        assert_eq!(rx.try_poll(), Poll::Abandoned);
    }

    #[tokio::test]
    async fn recv_returns_decision() {
        let (tx, rx) = decision_channel();
        tx.send(true);
        assert_eq!(rx.recv().await, Some(true));
    }

    #[tokio::test]
    async fn recv_returns_none_when_abandoned() {
        let (tx, rx) = decision_channel();
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn send_to_dropped_receiver_does_not_panic() {
        let (tx, rx) = decision_channel();
        drop(rx);
        tx.send(true);
    }
}
