use embassy_time::Instant;
use embedded_hal::digital::InputPin;

use crate::config::PinName;
use crate::debounce::DebouncerTrait;

/// A detected transition of a button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// One button wired to an input pin with pull-up: the pin reads low while the button is pressed.
pub struct Button<In: InputPin> {
    pin: In,
    name: PinName,
    /// Last detected state, buttons start released
    released: bool,
}

impl<In: InputPin> Button<In> {
    pub fn new(name: PinName, pin: In) -> Self {
        Self {
            pin,
            name,
            released: true,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_pressed(&self) -> bool {
        !self.released
    }

    /// Poll the button once.
    ///
    /// The pin isn't read while the debouncer holds it. A press edge starts the debounce hold.
    /// A pin that fails to read is considered released.
    pub fn detect<D: DebouncerTrait>(&mut self, idx: usize, debouncer: &mut D, now: Instant) -> Option<Edge> {
        if debouncer.is_holding(idx, now) {
            return None;
        }

        let active = self.pin.is_low().ok().unwrap_or_default();
        match (active, self.released) {
            (true, true) => {
                self.released = false;
                debouncer.start_hold(idx, now);
                debug!("Button {} pressed", self.name.as_str());
                Some(Edge::Pressed)
            }
            (false, false) => {
                self.released = true;
                debug!("Button {} released", self.name.as_str());
                Some(Edge::Released)
            }
            _ => None,
        }
    }
}
