//! Terminal notification sink.
//!
//! The quote service emits events synchronously; this sink forwards them over
//! an unbounded channel so the front end can print notifications and refresh
//! the displayed quote at its own pace.

use tokio::sync::mpsc;

use quotebook_core::events::{QuoteEvent, QuoteEventSink};

/// Receiving half handed to the front end.
pub type NotificationReceiver = mpsc::UnboundedReceiver<QuoteEvent>;

pub struct TerminalEventSink {
    tx: mpsc::UnboundedSender<QuoteEvent>,
}

impl TerminalEventSink {
    /// Creates the sink and the receiver its events are delivered to.
    pub fn channel() -> (Self, NotificationReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl QuoteEventSink for TerminalEventSink {
    fn emit(&self, event: QuoteEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Notification dropped: receiver closed");
        }
    }
}

/// Takes every notification queued so far without waiting.
pub fn drain(rx: &mut NotificationReceiver) -> Vec<QuoteEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
