use core::fmt;

use crate::config::PinName;
use crate::hid::HidError;
use macropad_types::config::KeyName;

/// Errors that stop the macropad from starting or running
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacropadError {
    /// A key name of a button's key list isn't a known key
    UnknownKeyCode(KeyName),
    /// The button holds more keys than a single action can carry
    TooManyKeys(PinName),
    /// More buttons are configured than supported
    TooManyButtons,
    /// A configured button name doesn't match any input pin
    UnknownPin(PinName),
    /// Sending a report to the host failed
    Hid(HidError),
    /// Setting the duty cycle of a LED output failed
    Pwm,
}

impl fmt::Display for MacropadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacropadError::UnknownKeyCode(name) => write!(f, "unknown key name: {}", name),
            MacropadError::TooManyKeys(pin) => write!(f, "too many keys for button {}", pin),
            MacropadError::TooManyButtons => write!(f, "too many buttons"),
            MacropadError::UnknownPin(pin) => write!(f, "unknown pin: {}", pin),
            MacropadError::Hid(e) => write!(f, "hid error: {:?}", e),
            MacropadError::Pwm => write!(f, "failed to set LED duty cycle"),
        }
    }
}

impl From<HidError> for MacropadError {
    fn from(e: HidError) -> Self {
        MacropadError::Hid(e)
    }
}
