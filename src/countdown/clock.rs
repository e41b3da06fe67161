//! Countdown state machine
//!
//! The clock is a pure function from the current state and an event to the
//! next state plus the side effects the caller has to carry out. Scheduling
//! ticks and notifying the user live elsewhere (see `tasks::ticker` and
//! `notify`), which keeps every transition testable without a runtime.

use tracing::{debug, info};

use super::input::{Field, TimeInput};

/// Where the countdown currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// No start action has computed a remaining time yet
    #[default]
    Unconfigured,
    Running { remaining: u64 },
    Paused { remaining: u64 },
    /// Remaining time hit zero; terminal until reset
    Completed,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Unconfigured => "unconfigured",
            Phase::Running { .. } => "running",
            Phase::Paused { .. } => "paused",
            Phase::Completed => "completed",
        }
    }
}

/// Full state of the countdown widget: the raw inputs and the clock phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownState {
    pub input: TimeInput,
    pub phase: Phase,
}

impl CountdownState {
    /// Create an unconfigured state with empty inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unconfigured state with pre-filled inputs
    pub fn with_input(input: TimeInput) -> Self {
        Self {
            input,
            phase: Phase::Unconfigured,
        }
    }

    /// Remaining seconds, or `None` while unconfigured
    pub fn remaining_seconds(&self) -> Option<u64> {
        match self.phase {
            Phase::Unconfigured => None,
            Phase::Running { remaining } | Phase::Paused { remaining } => Some(remaining),
            Phase::Completed => Some(0),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }
}

/// Something that happened to the countdown widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Raw text typed into one of the inputs
    Edit { field: Field, value: String },
    /// Start button, or Resume while paused
    Start,
    Pause,
    /// The combined Pause/Resume button
    Toggle,
    Reset,
    /// One scheduled tick elapsed
    Tick,
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Edit { .. } => "edit",
            TimerEvent::Start => "start",
            TimerEvent::Pause => "pause",
            TimerEvent::Toggle => "toggle",
            TimerEvent::Reset => "reset",
            TimerEvent::Tick => "tick",
        }
    }
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Begin firing `Tick` once per period
    ScheduleTick,
    /// Stop firing ticks; cancelling an idle ticker is harmless
    CancelTick,
    /// Tell the user the countdown finished
    Notify,
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: CountdownState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: CountdownState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: CountdownState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

/// Apply `event` to `state`.
///
/// `Running` and `Paused` are separate variants, so a state that is both
/// cannot be built. Ticks are ignored outside `Running`.
pub fn transition(mut state: CountdownState, event: TimerEvent) -> Transition {
    match event {
        TimerEvent::Edit { field, value } => {
            state.input.set(field, value);
            Transition::unchanged(state)
        }
        TimerEvent::Start => start(state),
        TimerEvent::Pause => pause(state),
        TimerEvent::Toggle => match state.phase {
            Phase::Running { .. } => pause(state),
            Phase::Paused { .. } => start(state),
            _ => Transition::unchanged(state),
        },
        TimerEvent::Reset => {
            info!("Resetting countdown from {}", state.phase.name());
            Transition::with(CountdownState::new(), vec![Effect::CancelTick])
        }
        TimerEvent::Tick => tick(state),
    }
}

fn start(mut state: CountdownState) -> Transition {
    match state.phase {
        Phase::Unconfigured => {
            let remaining = state.input.total_seconds();
            info!("Starting countdown with {} seconds", remaining);
            state.phase = Phase::Running { remaining };
            Transition::with(state, vec![Effect::ScheduleTick])
        }
        Phase::Paused { remaining } => {
            info!("Resuming countdown with {} seconds left", remaining);
            state.phase = Phase::Running { remaining };
            Transition::with(state, vec![Effect::ScheduleTick])
        }
        Phase::Running { .. } | Phase::Completed => {
            debug!("Start ignored while {}", state.phase.name());
            Transition::unchanged(state)
        }
    }
}

fn pause(mut state: CountdownState) -> Transition {
    match state.phase {
        Phase::Running { remaining } => {
            info!("Pausing countdown with {} seconds left", remaining);
            state.phase = Phase::Paused { remaining };
            Transition::with(state, vec![Effect::CancelTick])
        }
        _ => {
            debug!("Pause ignored while {}", state.phase.name());
            Transition::unchanged(state)
        }
    }
}

fn tick(mut state: CountdownState) -> Transition {
    let Phase::Running { remaining } = state.phase else {
        debug!("Tick ignored while {}", state.phase.name());
        return Transition::unchanged(state);
    };

    // A countdown started at zero completes on its first tick.
    let remaining = remaining.saturating_sub(1);
    if remaining == 0 {
        info!("Countdown complete");
        state.phase = Phase::Completed;
        Transition::with(state, vec![Effect::CancelTick, Effect::Notify])
    } else {
        debug!("Tick, {} seconds left", remaining);
        state.phase = Phase::Running { remaining };
        Transition::unchanged(state)
    }
}
