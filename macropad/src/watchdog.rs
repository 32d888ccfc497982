//! Reload watchdog.
//!
//! Any data arriving on the control channel after startup requests a restart of the firmware.
use core::sync::atomic::{AtomicUsize, Ordering};

/// A channel whose amount of received data can be sampled
pub trait ControlChannel {
    /// Number of bytes received so far
    fn bytes_available(&mut self) -> usize;
}

/// Returned by the macropad loop when the firmware should be restarted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RestartRequest;

pub struct ReloadWatchdog<C: ControlChannel> {
    channel: C,
    /// Byte count sampled at startup
    baseline: usize,
}

impl<C: ControlChannel> ReloadWatchdog<C> {
    pub fn new(mut channel: C) -> Self {
        let baseline = channel.bytes_available();
        Self { channel, baseline }
    }

    /// Request a restart as soon as the byte count exceeds the baseline
    pub fn check(&mut self) -> Option<RestartRequest> {
        let available = self.channel.bytes_available();
        if available > self.baseline {
            info!("{} bytes received on control channel, restarting", available - self.baseline);
            Some(RestartRequest)
        } else {
            None
        }
    }
}

static SERIAL_BYTES_RECEIVED: AtomicUsize = AtomicUsize::new(0);

/// Control channel backed by the number of bytes received by the USB serial port.
///
/// The count is fed by [`crate::usb::run_control_listener`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialByteCounter;

impl SerialByteCounter {
    /// Add `n` received bytes.
    pub fn record(n: usize) {
        // Single writer. No atomic read-modify-write on thumbv6m
        let current = SERIAL_BYTES_RECEIVED.load(Ordering::Acquire);
        SERIAL_BYTES_RECEIVED.store(current.saturating_add(n), Ordering::Release);
    }
}

impl ControlChannel for SerialByteCounter {
    fn bytes_available(&mut self) -> usize {
        SERIAL_BYTES_RECEIVED.load(Ordering::Acquire)
    }
}
