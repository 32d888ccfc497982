use embassy_time::Instant;

use crate::config::{BehaviorConfig, DebounceMode};

pub mod global;
pub mod per_channel;

pub use global::GlobalDebouncer;
pub use per_channel::PerChannelDebouncer;

/// A debouncer decides, at each poll, whether a button may be read.
///
/// A hold is started after a press edge. Release edges don't start a hold.
pub trait DebouncerTrait {
    /// Whether the `idx`-th button is still held off at `now`
    fn is_holding(&self, idx: usize, now: Instant) -> bool;

    /// Start the debounce hold after a press of the `idx`-th button
    fn start_hold(&mut self, idx: usize, now: Instant);
}

/// The debouncer selected by [`DebounceMode`]
pub enum Debouncer {
    PerChannel(PerChannelDebouncer),
    Global(GlobalDebouncer),
}

impl Debouncer {
    pub fn new(behavior: &BehaviorConfig) -> Self {
        match behavior.debounce_mode {
            DebounceMode::PerChannel => Debouncer::PerChannel(PerChannelDebouncer::new(behavior.debounce_time)),
            DebounceMode::Global => Debouncer::Global(GlobalDebouncer::new(behavior.debounce_time)),
        }
    }
}

impl DebouncerTrait for Debouncer {
    fn is_holding(&self, idx: usize, now: Instant) -> bool {
        match self {
            Debouncer::PerChannel(d) => d.is_holding(idx, now),
            Debouncer::Global(d) => d.is_holding(idx, now),
        }
    }

    fn start_hold(&mut self, idx: usize, now: Instant) {
        match self {
            Debouncer::PerChannel(d) => d.start_hold(idx, now),
            Debouncer::Global(d) => d.start_hold(idx, now),
        }
    }
}
