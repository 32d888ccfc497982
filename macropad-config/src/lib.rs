//! Host side loader of the macropad configuration.
//!
//! Used by the firmware's build script: the JSON file is parsed, validated against the key names the
//! firmware knows, then encoded into the postcard blob embedded in the firmware.
use std::collections::HashSet;
use std::path::Path;

use macropad_types::config::{MacropadConfig, RawAction};
use macropad_types::keycode::HidKeyCode;

pub mod error;
pub mod json;

pub use error::{ConfigError, ConfigResult};
pub use json::parse_json_config;
pub use macropad_types::config;

/// Read and parse the configuration file
pub fn load_config_file(path: &Path) -> ConfigResult<MacropadConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_json_config(&content).map_err(|e| match e {
        ConfigError::JsonParse { message, .. } => ConfigError::JsonParse {
            path: path.display().to_string(),
            message,
        },
        e => e,
    })
}

/// Load and validate the configuration file.
///
/// A missing, unreadable or syntactically broken file falls back to [`MacropadConfig::default`].
/// A file that parses but holds invalid values is an error.
pub fn load_config_or_default(path: &Path) -> ConfigResult<MacropadConfig> {
    let config = match load_config_file(path) {
        Ok(config) => config,
        Err(e @ (ConfigError::FileRead { .. } | ConfigError::JsonParse { .. })) => {
            eprintln!("{}, using the default config", e);
            MacropadConfig::default()
        }
        Err(e) => return Err(e),
    };
    validate_config(&config)?;
    Ok(config)
}

/// Check every key name against the firmware's key name table, and that no pin is used twice
pub fn validate_config(config: &MacropadConfig) -> ConfigResult<()> {
    let mut pins = HashSet::new();
    for button in &config.button_pins {
        let field = format!("button_pins.{}", button.pin);
        if !pins.insert(button.pin.as_str()) {
            return Err(ConfigError::Validation {
                field,
                message: "pin is configured more than once".to_string(),
            });
        }
        if let RawAction::Keys(keys) = &button.action {
            if let Some(unknown) = keys.iter().find(|k| HidKeyCode::from_name(k.as_str()).is_none()) {
                return Err(ConfigError::Validation {
                    field,
                    message: format!("unknown key name '{}'", unknown),
                });
            }
        }
    }
    Ok(())
}

/// Encode the configuration into the postcard blob read by the firmware
pub fn encode_config(config: &MacropadConfig) -> ConfigResult<Vec<u8>> {
    config.to_bytes().map_err(|e| ConfigError::Encode { message: e.to_string() })
}
