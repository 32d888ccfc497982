//! Configuration data model.
//!
//! The configuration is produced on the host (see `macropad-config`), encoded with postcard and
//! decoded once by the firmware before the core starts.
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum number of configured buttons
pub const MAX_BUTTONS: usize = 16;
/// Maximum number of LED outputs
pub const MAX_LEDS: usize = 16;
/// Maximum number of key names in a single key-sequence action
pub const MAX_KEYS_PER_ACTION: usize = 8;
/// Maximum length of a text action, in bytes
pub const TEXT_CAPACITY: usize = 128;
/// Maximum length of a pin name
pub const PIN_NAME_CAPACITY: usize = 8;
/// Maximum length of a key name
pub const KEY_NAME_CAPACITY: usize = 24;
/// Number of LED outputs of the reference board
pub const DEFAULT_LED_COUNT: usize = 4;
/// Intensity applied when nothing else is configured
pub const DEFAULT_INTENSITY: u8 = 100;

pub type PinName = String<PIN_NAME_CAPACITY>;
pub type KeyName = String<KEY_NAME_CAPACITY>;

/// Hard-coded button table used when no configuration is available
const DEFAULT_BUTTONS: [(&str, &str); 4] = [("GP1", "E"), ("GP2", "R"), ("GP14", "O"), ("GP15", "R")];

/// Raw action of a button, before key names are resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawAction {
    /// Type the string verbatim
    Text(String<TEXT_CAPACITY>),
    /// Hold all the named keys down
    Keys(Vec<KeyName, MAX_KEYS_PER_ACTION>),
}

/// One configured button: the input pin it is wired to and what it does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    pub pin: PinName,
    pub action: RawAction,
}

/// The whole macropad configuration.
///
/// `button_pins` keeps the order of the configuration file, which is also the polling order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacropadConfig {
    pub led_intensities: Vec<u8, MAX_LEDS>,
    pub button_pins: Vec<ButtonConfig, MAX_BUTTONS>,
}

/// Error returned when a configuration blob cannot be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigDecodeError;

impl core::fmt::Display for ConfigDecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "malformed macropad configuration")
    }
}

impl From<postcard::Error> for ConfigDecodeError {
    fn from(_: postcard::Error) -> Self {
        ConfigDecodeError
    }
}

impl Default for MacropadConfig {
    fn default() -> Self {
        Self {
            led_intensities: Self::default_intensities(DEFAULT_LED_COUNT),
            button_pins: Self::default_buttons(),
        }
    }
}

impl MacropadConfig {
    /// `count` LEDs at full brightness, capped at [`MAX_LEDS`]
    pub fn default_intensities(count: usize) -> Vec<u8, MAX_LEDS> {
        let mut intensities = Vec::new();
        for _ in 0..count.min(MAX_LEDS) {
            // Capacity is checked above
            let _ = intensities.push(DEFAULT_INTENSITY);
        }
        intensities
    }

    /// The hard-coded button table: GP1, GP2, GP14 and GP15 type `E`, `R`, `O` and `R`
    pub fn default_buttons() -> Vec<ButtonConfig, MAX_BUTTONS> {
        let mut buttons = Vec::new();
        for (pin, key) in DEFAULT_BUTTONS {
            let mut keys = Vec::new();
            let _ = keys.push(String::try_from(key).unwrap_or_default());
            let _ = buttons.push(ButtonConfig {
                pin: String::try_from(pin).unwrap_or_default(),
                action: RawAction::Keys(keys),
            });
        }
        buttons
    }

    /// Decode a postcard-encoded configuration
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigDecodeError> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Decode the configuration, or fall back to [`MacropadConfig::default`] when it's absent or malformed
    pub fn load_or_default(bytes: Option<&[u8]>) -> Self {
        match bytes {
            Some(bytes) => match Self::from_bytes(bytes) {
                Ok(config) => config,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Failed to decode macropad config, using defaults");
                    #[cfg(feature = "log")]
                    log::warn!("Failed to decode macropad config, using defaults");
                    Self::default()
                }
            },
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("No macropad config found, using defaults");
                #[cfg(feature = "log")]
                log::warn!("No macropad config found, using defaults");
                Self::default()
            }
        }
    }

    /// Encode the configuration into a postcard blob
    #[cfg(feature = "std")]
    pub fn to_bytes(&self) -> Result<std::vec::Vec<u8>, postcard::Error> {
        postcard::to_stdvec(self)
    }
}
