//! Layout error types

use thiserror::Error;

/// Errors raised while building or loading a layout configuration.
///
/// Layout passes themselves never fail; bad frames degrade to no-ops.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A configuration value is out of range
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    /// Configuration text could not be parsed
    #[error("failed to parse layout config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("failed to serialize layout config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for layout configuration
pub type Result<T> = std::result::Result<T, LayoutError>;
