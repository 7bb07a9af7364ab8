use super::QuoteEvent;

/// Receiver of the events raised by [`crate::quotes::QuoteService`].
///
/// Called synchronously after the change has been persisted, so `emit()`
/// should hand the event off (channel, buffer) rather than do slow work.
/// Delivery failures are the sink's own business.
pub trait QuoteEventSink: Send + Sync {
    fn emit(&self, event: QuoteEvent);

    /// Emits each event in order.
    fn emit_batch(&self, events: Vec<QuoteEvent>) {
        events.into_iter().for_each(|event| self.emit(event));
    }
}
