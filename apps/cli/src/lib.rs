pub mod commands;
pub mod config;
pub mod main_lib;
pub mod notifications;
pub mod render;
pub mod scheduler;
pub mod session;

pub use main_lib::{build_state, init_tracing, AppState};
