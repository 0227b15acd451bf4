//! # Design
//!
//! - One variant per failure site of the copy loop so callers can tell open,
//!   read, and write failures apart.
//! - Carry the target path wherever one is involved; the CLI prints the chain.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for copier operations.
pub type CopyResult<T> = Result<T, CopyError>;

/// Errors produced by the copy loop.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Opening (or re-opening) the target file failed.
    #[error("failed to open '{}'", .path.display())]
    Open {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Reading the input stream failed for a reason other than end-of-input.
    #[error("failed to read input")]
    Read {
        /// Underlying IO error.
        source: io::Error,
    },
    /// Writing a chunk to the target file failed.
    #[error("failed to write to '{}'", .path.display())]
    WriteTarget {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Writing a chunk to the secondary output failed.
    #[error("failed to write to secondary output")]
    WriteSecondary {
        /// Underlying IO error.
        source: io::Error,
    },
    /// Flushing the target file before closing it failed.
    #[error("failed to close '{}'", .path.display())]
    Close {
        /// Target path.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl CopyError {
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_target(path: &Path, source: io::Error) -> Self {
        Self::WriteTarget {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn close(path: &Path, source: io::Error) -> Self {
        Self::Close {
            path: path.to_path_buf(),
            source,
        }
    }
}
