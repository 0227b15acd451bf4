//! CLI error type and exit-code mapping.

use std::fmt::{self, Display, Formatter};

use rotee_config::ConfigError;
use rotee_copier::CopyError;

/// Exit code for usage and configuration problems.
pub(crate) const EXIT_USAGE: i32 = 2;
/// Exit code for failures while copying.
pub(crate) const EXIT_FAILURE: i32 = 1;

/// CLI-level error type to distinguish usage problems from runtime failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => EXIT_USAGE,
            Self::Failure(_) => EXIT_FAILURE,
        }
    }

    pub(crate) const fn is_usage(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<CopyError> for CliError {
    fn from(err: CopyError) -> Self {
        Self::failure(err)
    }
}
