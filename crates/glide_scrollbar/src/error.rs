//! Scrollbar error types

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML could not be parsed into a config
    #[error("Failed to parse scrollbar config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range
    #[error("Invalid scrollbar config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for scrollbar configuration
pub type Result<T> = std::result::Result<T, ConfigError>;
