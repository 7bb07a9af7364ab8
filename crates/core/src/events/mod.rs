//! Quote events module.
//!
//! Provides the event types emitted after the quote collection changes and
//! the sink trait used to deliver them. Front ends implement the sink to turn
//! events into user-facing notifications and re-renders.

mod quote_event;
mod sink;

pub use quote_event::*;
pub use sink::*;
