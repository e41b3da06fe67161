//! Click counter widget state

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

impl CounterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_down_and_resets() {
        let mut counter = CounterState::new();
        counter.increment();
        counter.increment();
        counter.decrement();
        assert_eq!(counter.count, 1);

        counter.reset();
        assert_eq!(counter.count, 0);

        counter.decrement();
        assert_eq!(counter.count, -1);
    }

    #[test]
    fn saturates_at_bounds() {
        let mut counter = CounterState { count: i64::MAX };
        counter.increment();
        assert_eq!(counter.count, i64::MAX);

        let mut counter = CounterState { count: i64::MIN };
        counter.decrement();
        assert_eq!(counter.count, i64::MIN);
    }
}
