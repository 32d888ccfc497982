use embassy_time::Duration;

pub use macropad_types::config::*;

/// Highest accepted LED intensity, in percent
pub const MAX_DUTY_PERCENT: u8 = 100;

/// PWM frequency of the LED outputs, in Hz
pub const LED_FREQUENCY_HZ: u32 = 1000;

/// How the debounce hold after a press is scoped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceMode {
    /// Only the button that was pressed is ignored during the hold
    #[default]
    PerChannel,
    /// No button is polled until the hold elapses
    Global,
}

/// What a button release lets go of
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReleaseMode {
    /// Release every held key, whichever button pressed it
    #[default]
    All,
    /// Release only the keys of the released button
    PerButton,
}

/// Config for the polling loop behavior
#[derive(Clone, Copy, Debug)]
pub struct BehaviorConfig {
    /// Hold applied after a press edge
    pub debounce_time: Duration,
    pub debounce_mode: DebounceMode,
    pub release_mode: ReleaseMode,
    /// Pause between two polling passes
    pub scan_interval: Duration,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            debounce_time: Duration::from_millis(50),
            debounce_mode: DebounceMode::PerChannel,
            release_mode: ReleaseMode::All,
            scan_interval: Duration::from_millis(1),
        }
    }
}

/// USB device identification
pub struct KeyboardUsbConfig<'a> {
    /// Vender id
    pub vid: u16,
    /// Product id
    pub pid: u16,
    /// Manufacturer
    pub manufacturer: &'a str,
    /// Product name
    pub product_name: &'a str,
    /// Serial number
    pub serial_number: &'a str,
}

impl Default for KeyboardUsbConfig<'_> {
    fn default() -> Self {
        Self {
            vid: 0x1209,
            pid: 0x0001,
            manufacturer: "Macropad",
            product_name: "Macropad",
            serial_number: "000001",
        }
    }
}
