use embassy_time::{Duration, Instant};

use super::DebouncerTrait;
use crate::config::MAX_BUTTONS;

/// Holds only the button that was pressed; all other buttons keep being polled.
pub struct PerChannelDebouncer {
    /// End of the hold of each button, `None` when the button isn't held
    hold_until: [Option<Instant>; MAX_BUTTONS],
    debounce_time: Duration,
}

impl PerChannelDebouncer {
    pub fn new(debounce_time: Duration) -> Self {
        Self {
            hold_until: [None; MAX_BUTTONS],
            debounce_time,
        }
    }
}

impl DebouncerTrait for PerChannelDebouncer {
    fn is_holding(&self, idx: usize, now: Instant) -> bool {
        match self.hold_until.get(idx) {
            Some(Some(until)) => now < *until,
            _ => false,
        }
    }

    fn start_hold(&mut self, idx: usize, now: Instant) {
        if let Some(slot) = self.hold_until.get_mut(idx) {
            *slot = Some(now + self.debounce_time);
        }
    }
}
