//! Error types for configuration resolution.

use thiserror::Error;

/// Primary error type for configuration resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The required target path was not supplied.
    #[error("missing required FILE argument")]
    MissingPath,
    /// The check interval could not be parsed.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration {
        /// Offending input as supplied by the caller.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offending_values() {
        let err = ConfigError::InvalidDuration {
            value: "5x".to_string(),
            reason: "unknown unit",
        };
        assert_eq!(err.to_string(), "invalid duration '5x': unknown unit");
        assert_eq!(
            ConfigError::MissingPath.to_string(),
            "missing required FILE argument"
        );
    }
}
