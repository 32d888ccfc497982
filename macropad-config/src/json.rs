//! `keyboard_config.json` parsing.
//!
//! ```json
//! {
//!     "led_intensities": [100, 50, 0, 100],
//!     "button_pins": {
//!         "GP1": ["LEFT_CONTROL", "C"],
//!         "GP2": { "string": "hello" }
//!     }
//! }
//! ```
use heapless::{String as HString, Vec as HVec};
use macropad_types::config::{
    ButtonConfig, DEFAULT_LED_COUNT, KeyName, MAX_BUTTONS, MAX_KEYS_PER_ACTION, MAX_LEDS, MacropadConfig, RawAction,
};
use serde_json::{Map, Value};

use crate::error::{ConfigError, ConfigResult};

/// Parse the JSON configuration.
///
/// A missing `led_intensities` lights every LED at full brightness, a missing `button_pins` uses the
/// default button table.
pub fn parse_json_config(json: &str) -> ConfigResult<MacropadConfig> {
    let value: Value = serde_json::from_str(json).map_err(|e| ConfigError::JsonParse {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })?;
    let root = match value {
        Value::Object(root) => root,
        other => return Err(invalid("<root>", &other, "an object")),
    };

    let led_intensities = match root.get("led_intensities") {
        Some(value) => parse_intensities(value)?,
        None => MacropadConfig::default_intensities(DEFAULT_LED_COUNT),
    };
    let button_pins = match root.get("button_pins") {
        Some(Value::Object(buttons)) => parse_buttons(buttons)?,
        Some(other) => return Err(invalid("button_pins", other, "an object of pin names")),
        None => MacropadConfig::default_buttons(),
    };

    Ok(MacropadConfig {
        led_intensities,
        button_pins,
    })
}

fn parse_intensities(value: &Value) -> ConfigResult<HVec<u8, MAX_LEDS>> {
    let Value::Array(values) = value else {
        return Err(invalid("led_intensities", value, "an array of percentages"));
    };
    let mut intensities = HVec::new();
    for (idx, v) in values.iter().enumerate() {
        let field = format!("led_intensities[{}]", idx);
        let intensity = v
            .as_u64()
            .and_then(|i| u8::try_from(i).ok())
            .ok_or_else(|| invalid(&field, v, "an integer between 0 and 100"))?;
        if intensity > 100 {
            eprintln!("{} is {}, it will be clamped to 100", field, intensity);
        }
        intensities.push(intensity).map_err(|_| ConfigError::Validation {
            field: "led_intensities".to_string(),
            message: format!("at most {} LEDs are supported", MAX_LEDS),
        })?;
    }
    Ok(intensities)
}

fn parse_buttons(buttons: &Map<String, Value>) -> ConfigResult<HVec<ButtonConfig, MAX_BUTTONS>> {
    let mut button_pins = HVec::new();
    for (pin, entry) in buttons {
        let field = format!("button_pins.{}", pin);
        let button = ButtonConfig {
            pin: to_heapless(pin, &field, "pin name")?,
            action: parse_action(entry, &field)?,
        };
        button_pins.push(button).map_err(|_| ConfigError::Validation {
            field: "button_pins".to_string(),
            message: format!("at most {} buttons are supported", MAX_BUTTONS),
        })?;
    }
    Ok(button_pins)
}

/// `{"string": ...}` is a text action whatever other fields it has, a list of names is a key sequence
fn parse_action(entry: &Value, field: &str) -> ConfigResult<RawAction> {
    match entry {
        Value::Object(fields) if fields.contains_key("string") => match &fields["string"] {
            Value::String(text) => Ok(RawAction::Text(to_heapless(text, field, "text")?)),
            other => Err(invalid(&format!("{}.string", field), other, "a string")),
        },
        Value::Array(names) => {
            let mut keys = HVec::new();
            for (idx, name) in names.iter().enumerate() {
                let key_field = format!("{}[{}]", field, idx);
                let Value::String(name) = name else {
                    return Err(invalid(&key_field, name, "a key name"));
                };
                let key: KeyName = to_heapless(name, &key_field, "key name")?;
                keys.push(key).map_err(|_| ConfigError::Validation {
                    field: field.to_string(),
                    message: format!("at most {} keys per button are supported", MAX_KEYS_PER_ACTION),
                })?;
            }
            Ok(RawAction::Keys(keys))
        }
        other => Err(invalid(field, other, "a list of key names or {\"string\": <text>}")),
    }
}

fn to_heapless<const N: usize>(s: &str, field: &str, what: &str) -> ConfigResult<HString<N>> {
    HString::try_from(s).map_err(|_| ConfigError::Validation {
        field: field.to_string(),
        message: format!("{} '{}' is longer than {} bytes", what, s, N),
    })
}

fn invalid(field: &str, value: &Value, expected: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
