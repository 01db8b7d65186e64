//! Configuration error types

use thiserror::Error;

/// Reasons a configuration is rejected by [`ShimmerConfiguration::validate`]
///
/// [`ShimmerConfiguration::validate`]: crate::ShimmerConfiguration::validate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sweep speed is zero, negative or not finite
    #[error("speed must be a positive number of points per second (got {0})")]
    InvalidSpeed(f32),

    /// A fraction field lies outside [0, 1]
    #[error("{field} must be within [0, 1] (got {value})")]
    FractionOutOfRange { field: &'static str, value: f32 },

    /// A duration field is negative or not finite
    #[error("{field} must be a non-negative number of seconds (got {value})")]
    InvalidDuration { field: &'static str, value: f64 },
}

/// Result type for shimmer configuration checks
pub type Result<T> = std::result::Result<T, ConfigError>;
