//! Configuration errors
//!
//! Everything here is raised while loading level descriptors or tuning
//! overrides, before the first tick. The tick itself never fails.

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON was malformed, missing a required field, or used an unknown tag.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A campaign must contain at least one level.
    #[error("campaign contains no levels")]
    EmptyCampaign,

    /// A level descriptor parsed but holds out-of-range values.
    #[error("invalid level '{level}': {reason}")]
    InvalidLevel {
        /// Name of the offending level.
        level: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A tuning override holds out-of-range values.
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
