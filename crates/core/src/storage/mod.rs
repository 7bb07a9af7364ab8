//! Storage module.
//!
//! - [`traits`] - the key-value store abstraction shared by persistent and
//!   session-scoped backends
//! - [`gateway`] - typed access to the quote collection, the selected
//!   category and the last-viewed quote

mod gateway;
mod traits;

pub use gateway::*;
pub use traits::*;
