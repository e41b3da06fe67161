//! State management module
//! 
//! This module contains the widget states and the shared application state.

pub mod app_state;
pub mod counter_state;
pub mod offer_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use counter_state::CounterState;
pub use offer_state::OfferState;
pub use timer_state::TimerState;
