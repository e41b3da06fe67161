//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    countdown::{transition, CountdownState, Effect, TimeInput, TimerEvent, Transition},
    notify::CompletionNotifier,
    tasks::{tick_task, TickHandle},
};
use super::{CounterState, OfferState, TimerState};

/// Countdown widget: its state plus the tick task driving it
#[derive(Debug, Default)]
pub struct Countdown {
    pub state: CountdownState,
    pub ticker: TickHandle,
}

/// Main application state that owns all widgets
pub struct AppState {
    /// Countdown timer widget
    pub countdown: Arc<Mutex<Countdown>>,
    /// Counter widget
    pub counter: Arc<Mutex<CounterState>>,
    /// Offer button and modal widget
    pub offer: Arc<Mutex<OfferState>>,
    /// Told when the countdown completes
    pub notifier: Arc<dyn CompletionNotifier>,
    /// Time between countdown ticks
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for timer updates
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState with the given pre-filled timer inputs
    pub fn new(
        port: u16,
        host: String,
        tick_period: Duration,
        input: TimeInput,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        let countdown = Countdown {
            state: CountdownState::with_input(input),
            ticker: TickHandle::new(),
        };
        let (timer_update_tx, timer_update_rx) =
            watch::channel(TimerState::from(&countdown.state));

        Self {
            countdown: Arc::new(Mutex::new(countdown)),
            counter: Arc::new(Mutex::new(CounterState::new())),
            offer: Arc::new(Mutex::new(OfferState::new())),
            notifier,
            tick_period,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a user event to the countdown widget.
    ///
    /// Must be called from within a tokio runtime, since starting the timer
    /// spawns the tick task.
    pub fn dispatch(self: &Arc<Self>, event: TimerEvent) -> Result<TimerState, String> {
        let action = format!("timer-{}", event.name());
        let (snapshot, notify) = {
            let mut countdown = self.countdown.lock()
                .map_err(|e| format!("Failed to lock countdown: {}", e))?;
            self.apply(&mut countdown, event)
        };

        self.record_action(&action);
        self.publish(snapshot.clone());
        if notify {
            self.notify_completion();
        }

        Ok(snapshot)
    }

    /// Apply a tick from the task of the given generation.
    ///
    /// Returns whether that task should keep ticking. Ticks from a replaced
    /// or cancelled task are dropped without touching the countdown.
    pub fn tick(self: &Arc<Self>, generation: u64) -> Result<bool, String> {
        let (snapshot, notify, keep_ticking) = {
            let mut countdown = self.countdown.lock()
                .map_err(|e| format!("Failed to lock countdown: {}", e))?;

            if !countdown.ticker.is_current(generation) {
                return Ok(false);
            }

            let (snapshot, notify) = self.apply(&mut countdown, TimerEvent::Tick);
            (snapshot, notify, countdown.ticker.is_current(generation))
        };

        self.publish(snapshot);
        if notify {
            self.notify_completion();
        }

        Ok(keep_ticking)
    }

    /// Tell the user the countdown finished.
    ///
    /// Notifiers may block (D-Bus call, terminal alert), so they run on the
    /// blocking pool instead of a runtime worker.
    fn notify_completion(&self) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = tokio::task::spawn_blocking(move || notifier.notify()).await {
                error!("Completion notifier failed: {}", e);
            }
        });
    }

    /// Run the state machine and carry out the tick effects.
    ///
    /// Notification is returned to the caller so it runs after the lock is
    /// released.
    fn apply(
        self: &Arc<Self>,
        countdown: &mut Countdown,
        event: TimerEvent,
    ) -> (TimerState, bool) {
        let current = std::mem::take(&mut countdown.state);
        let Transition { state, effects } = transition(current, event);
        countdown.state = state;

        let mut notify = false;
        for effect in effects {
            match effect {
                Effect::ScheduleTick => {
                    let app = Arc::clone(self);
                    let period = self.tick_period;
                    countdown.ticker.replace(|generation| {
                        tokio::spawn(tick_task(app, generation, period))
                    });
                }
                Effect::CancelTick => countdown.ticker.cancel(),
                Effect::Notify => notify = true,
            }
        }

        (TimerState::from(&countdown.state), notify)
    }

    fn publish(&self, snapshot: TimerState) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// Subscribe to timer snapshots, sent after every transition
    pub fn subscribe_timer(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.countdown.lock()
            .map(|countdown| TimerState::from(&countdown.state))
            .map_err(|e| format!("Failed to lock countdown: {}", e))
    }

    /// Update the counter and record the action
    pub fn update_counter<F>(&self, action: &str, updater: F) -> Result<CounterState, String>
    where
        F: FnOnce(&mut CounterState),
    {
        let mut counter = self.counter.lock()
            .map_err(|e| format!("Failed to lock counter: {}", e))?;

        updater(&mut *counter);
        let new_counter = counter.clone();
        drop(counter); // Release the lock early

        info!("Counter {}: {}", action, new_counter.count);
        self.record_action(action);
        Ok(new_counter)
    }

    /// Get current counter state
    pub fn get_counter(&self) -> Result<CounterState, String> {
        self.counter.lock()
            .map(|counter| counter.clone())
            .map_err(|e| format!("Failed to lock counter: {}", e))
    }

    /// Update the offer widget and record the action
    pub fn update_offer<F>(&self, action: &str, updater: F) -> Result<OfferState, String>
    where
        F: FnOnce(&mut OfferState),
    {
        let mut offer = self.offer.lock()
            .map_err(|e| format!("Failed to lock offer: {}", e))?;

        updater(&mut *offer);
        let new_offer = offer.clone();
        drop(offer);

        info!("Offer {}: modal_open={}, accepted={}", action, new_offer.modal_open, new_offer.accepted);
        self.record_action(action);
        Ok(new_offer)
    }

    /// Get current offer state
    pub fn get_offer(&self) -> Result<OfferState, String> {
        self.offer.lock()
            .map(|offer| offer.clone())
            .map_err(|e| format!("Failed to lock offer: {}", e))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Tear down the countdown, cancelling any scheduled tick
    pub fn shutdown(self: &Arc<Self>) -> Result<(), String> {
        self.dispatch(TimerEvent::Reset)?;
        info!("Countdown torn down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::{sync::Notify, time::sleep};

    use super::*;
    use crate::countdown::{Field, Phase};

    #[derive(Default)]
    struct CountingNotifier {
        calls: AtomicUsize,
        delay: Duration,
        done: Notify,
    }

    impl CountingNotifier {
        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::default()
            }
        }
    }

    impl CompletionNotifier for CountingNotifier {
        fn notify(&self) {
            std::thread::sleep(self.delay);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.done.notify_one();
        }
    }

    fn app(seconds: &str) -> (Arc<AppState>, Arc<CountingNotifier>) {
        let notifier = Arc::new(CountingNotifier::default());
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            Duration::from_secs(1),
            TimeInput::with_values("", "", seconds),
            notifier.clone(),
        ));
        (state, notifier)
    }

    fn phase(state: &AppState) -> Phase {
        state.countdown.lock().unwrap().state.phase
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_once_per_period() {
        let (state, notifier) = app("10");
        state.dispatch(TimerEvent::Start).unwrap();

        sleep(Duration::from_millis(3500)).await;

        assert_eq!(phase(&state), Phase::Running { remaining: 7 });
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_notifies_once_and_stops_ticking() {
        let (state, notifier) = app("3");
        state.dispatch(TimerEvent::Start).unwrap();

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(phase(&state), Phase::Completed);
        notifier.done.notified().await;
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(phase(&state), Phase::Completed);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert!(!state.countdown.lock().unwrap().ticker.is_scheduled());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_and_resume_continues() {
        let (state, _notifier) = app("10");
        state.dispatch(TimerEvent::Start).unwrap();
        sleep(Duration::from_millis(2500)).await;

        state.dispatch(TimerEvent::Pause).unwrap();
        assert_eq!(phase(&state), Phase::Paused { remaining: 8 });

        sleep(Duration::from_secs(5)).await;
        assert_eq!(phase(&state), Phase::Paused { remaining: 8 });

        state.dispatch(TimerEvent::Start).unwrap();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(phase(&state), Phase::Running { remaining: 7 });
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_does_not_double_tick() {
        let (state, _notifier) = app("10");
        state.dispatch(TimerEvent::Start).unwrap();
        state.dispatch(TimerEvent::Start).unwrap();
        state.dispatch(TimerEvent::Toggle).unwrap();
        state.dispatch(TimerEvent::Toggle).unwrap();

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(phase(&state), Phase::Running { remaining: 8 });
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_ticks_are_dropped() {
        let (state, _notifier) = app("10");
        state.dispatch(TimerEvent::Start).unwrap();
        let first = state.countdown.lock().unwrap().ticker.generation();

        state.dispatch(TimerEvent::Pause).unwrap();
        state.dispatch(TimerEvent::Start).unwrap();

        assert_eq!(state.tick(first), Ok(false));
        assert_eq!(phase(&state), Phase::Running { remaining: 10 });

        let current = state.countdown.lock().unwrap().ticker.generation();
        assert_eq!(state.tick(current), Ok(true));
        assert_eq!(phase(&state), Phase::Running { remaining: 9 });
    }

    #[tokio::test(start_paused = true)]
    async fn reset_clears_inputs_and_cancels_ticks() {
        let (state, notifier) = app("2");
        state.dispatch(TimerEvent::Start).unwrap();

        let snapshot = state.dispatch(TimerEvent::Reset).unwrap();
        assert_eq!(snapshot.remaining_seconds, None);
        assert!(snapshot.inputs.is_empty());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(phase(&state), Phase::Unconfigured);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn slow_notifier_does_not_stall_the_runtime() {
        let notifier = Arc::new(CountingNotifier::slow(Duration::from_millis(800)));
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            Duration::from_millis(50),
            TimeInput::with_values("", "", "1"),
            notifier.clone(),
        ));
        state.dispatch(TimerEvent::Start).unwrap();

        // Keep the runtime busy while the notifier is sleeping.
        let started = std::time::Instant::now();
        let mut worst = Duration::ZERO;
        while started.elapsed() < Duration::from_millis(1000) {
            let before = std::time::Instant::now();
            sleep(Duration::from_millis(10)).await;
            worst = worst.max(before.elapsed());
        }

        notifier.done.notified().await;
        assert_eq!(phase(&state), Phase::Completed);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert!(worst < Duration::from_millis(400), "runtime stalled for {:?}", worst);
    }

    #[tokio::test]
    async fn edits_and_snapshots_are_published() {
        let (state, _notifier) = app("");
        let mut rx = state.subscribe_timer();

        state
            .dispatch(TimerEvent::Edit {
                field: Field::Hours,
                value: "1".to_string(),
            })
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().inputs.hours, "1");

        let snapshot = state.dispatch(TimerEvent::Start).unwrap();
        assert_eq!(snapshot.remaining_seconds, Some(3600));
        assert_eq!(rx.borrow_and_update().display.as_deref(), Some("01:00:00"));

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("timer-start"));
        assert!(time.is_some());

        state.shutdown().unwrap();
        assert_eq!(phase(&state), Phase::Unconfigured);
    }

    #[tokio::test]
    async fn counter_and_offer_updates() {
        let (state, _notifier) = app("");

        state.update_counter("counter-increment", CounterState::increment).unwrap();
        let counter = state.update_counter("counter-increment", CounterState::increment).unwrap();
        assert_eq!(counter.count, 2);
        assert_eq!(state.get_counter().unwrap().count, 2);

        state.update_offer("offer-open", OfferState::open).unwrap();
        let offer = state.update_offer("offer-accept", OfferState::accept).unwrap();
        assert!(offer.accepted);
        assert_eq!(state.get_offer().unwrap(), offer);
        assert_eq!(state.get_last_action().0.as_deref(), Some("offer-accept"));
    }
}
