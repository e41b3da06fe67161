//! Countdown tick task and the handle that owns it

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Owns the currently scheduled tick task, if any.
///
/// Every scheduled task gets a fresh generation number. Ticks reporting any
/// other generation come from a task that was already replaced or cancelled
/// and must be dropped.
#[derive(Debug, Default)]
pub struct TickHandle {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running task and start a new one built by `spawn`
    pub fn replace<F>(&mut self, spawn: F)
    where
        F: FnOnce(u64) -> JoinHandle<()>,
    {
        self.cancel();
        self.generation += 1;
        debug!("Scheduling tick task generation {}", self.generation);
        self.task = Some(spawn(self.generation));
    }

    /// Abort the current task; a no-op when nothing is scheduled
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Cancelling tick task generation {}", self.generation);
            task.abort();
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a tick from `generation` belongs to the live task
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && self.generation == generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Fire a countdown tick once per `period` until the countdown stops.
///
/// The first tick lands one full period after scheduling.
pub async fn tick_task(state: Arc<AppState>, generation: u64, period: Duration) {
    info!("Starting tick task generation {}", generation);

    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        match state.tick(generation) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Tick task generation {} finished", generation);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }
}
