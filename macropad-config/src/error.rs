//! Unified error types for macropad-config

use std::fmt;

/// Unified error type for macropad-config
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// File I/O error
    FileRead { path: String, message: String },
    /// JSON parsing error
    JsonParse { path: String, message: String },
    /// Invalid value
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
    /// Validation error with context
    Validation { field: String, message: String },
    /// Postcard encoding error
    Encode { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::JsonParse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::InvalidValue {
                field,
                value,
                expected,
            } => {
                write!(f, "Invalid value '{}' for '{}', expected: {}", value, field, expected)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Validation error in '{}': {}", field, message)
            }
            ConfigError::Encode { message } => {
                write!(f, "Failed to encode config: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
