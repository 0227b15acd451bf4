//! Typed configuration record for a single copy run.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;
use crate::error::ConfigResult;
use crate::validate::validate_target_path;

/// How the target file is opened, initially and on every reopen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenMode {
    /// Create if absent and discard any existing content.
    #[default]
    Truncate,
    /// Create if absent and position writes at end-of-file.
    Append,
}

impl OpenMode {
    /// Map the `-a` flag onto a mode.
    #[must_use]
    pub const fn from_append_flag(append: bool) -> Self {
        if append { Self::Append } else { Self::Truncate }
    }

    /// Stable label used in structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Append => "append",
        }
    }
}

impl Display for OpenMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// What the copier does when the periodic identity probe itself fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbePolicy {
    /// Treat the failure as "no confirmed match" and retry at the next check.
    #[default]
    SkipAndRetry,
    /// Treat the failure as a mismatch and reopen immediately.
    Reopen,
}

impl ProbePolicy {
    /// Map the `--reopen-on-missing` flag onto a policy.
    #[must_use]
    pub const fn from_reopen_flag(reopen: bool) -> Self {
        if reopen {
            Self::Reopen
        } else {
            Self::SkipAndRetry
        }
    }
}

/// Resolved configuration for one run of the copier.
///
/// Built once from command-line input and never mutated afterwards; the
/// `with_*` methods consume and return the record so construction reads as a
/// chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeeConfig {
    path: PathBuf,
    mode: OpenMode,
    check_interval: Duration,
    probe_policy: ProbePolicy,
}

impl TeeConfig {
    /// Create a configuration targeting `path` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MissingPath`] when `path` is empty.
    pub fn new(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        validate_target_path(&path)?;
        Ok(Self {
            path,
            mode: OpenMode::default(),
            check_interval: defaults::CHECK_INTERVAL,
            probe_policy: ProbePolicy::default(),
        })
    }

    /// Set the open mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the identity check interval. Zero checks on every chunk.
    #[must_use]
    pub const fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    /// Set the probe-failure policy.
    #[must_use]
    pub const fn with_probe_policy(mut self, policy: ProbePolicy) -> Self {
        self.probe_policy = policy;
        self
    }

    /// Path of the monitored target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open mode applied on every open.
    #[must_use]
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Interval between identity checks.
    #[must_use]
    pub const fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// Probe-failure policy.
    #[must_use]
    pub const fn probe_policy(&self) -> ProbePolicy {
        self.probe_policy
    }
}
