//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod ticker;

// Re-export main types
pub use ticker::{tick_task, TickHandle};
