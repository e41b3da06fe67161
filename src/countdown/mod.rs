//! Countdown timer widget
//!
//! Input fields, the HH:MM:SS formatter and the pure countdown state machine.

pub mod clock;
pub mod format;
pub mod input;

// Re-export main types
pub use clock::{transition, CountdownState, Effect, Phase, TimerEvent, Transition};
pub use format::format_time;
pub use input::{parse_field, Field, TimeInput};
