//! Timer snapshot published to API clients and watchers

use serde::{Deserialize, Serialize};

use crate::countdown::{format_time, CountdownState, Phase, TimeInput};

/// Read-only view of the countdown widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: String,
    /// `None` until the first start computes a remaining time
    pub remaining_seconds: Option<u64>,
    /// Remaining time as `HH:MM:SS`, shown in place of the inputs once configured
    pub display: Option<String>,
    pub is_running: bool,
    pub is_paused: bool,
    /// Label of the primary button, if one is shown
    pub button: Option<String>,
    pub inputs: TimeInput,
}

impl TimerState {
    /// Create a snapshot of an unconfigured timer with empty inputs
    pub fn new() -> Self {
        Self::from(&CountdownState::new())
    }

    /// Check if the countdown is actively ticking
    pub fn is_active(&self) -> bool {
        self.is_running
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CountdownState> for TimerState {
    fn from(state: &CountdownState) -> Self {
        let remaining_seconds = state.remaining_seconds();
        let button = match state.phase {
            Phase::Unconfigured => Some("Start"),
            Phase::Running { .. } => Some("Pause"),
            Phase::Paused { .. } => Some("Resume"),
            Phase::Completed => None,
        };

        Self {
            phase: state.phase.name().to_string(),
            remaining_seconds,
            display: remaining_seconds.map(format_time),
            is_running: state.is_running(),
            is_paused: state.is_paused(),
            button: button.map(str::to_string),
            inputs: state.input.clone(),
        }
    }
}
