use embassy_time::{Duration, Instant};

use super::DebouncerTrait;

/// Holds every button after any press.
///
/// Once a button is pressed, no button is polled until the debounce time elapses. Unlike a blocking
/// delay, the loop itself keeps running.
pub struct GlobalDebouncer {
    hold_until: Option<Instant>,
    debounce_time: Duration,
}

impl GlobalDebouncer {
    pub fn new(debounce_time: Duration) -> Self {
        Self {
            hold_until: None,
            debounce_time,
        }
    }
}

impl DebouncerTrait for GlobalDebouncer {
    fn is_holding(&self, _idx: usize, now: Instant) -> bool {
        self.hold_until.is_some_and(|until| now < until)
    }

    fn start_hold(&mut self, _idx: usize, now: Instant) {
        self.hold_until = Some(now + self.debounce_time);
    }
}
