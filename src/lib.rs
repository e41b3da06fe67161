//! Countdown Panel - A countdown timer, counter and offer modal served over HTTP
//! 
//! The countdown timer is a pure state machine (`countdown`) driven by a
//! scheduled tick task (`tasks`). When it reaches zero the user is told through
//! a desktop notification or a terminal alert (`notify`).

pub mod config;
pub mod countdown;
pub mod state;
pub mod api;
pub mod notify;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
