//! Test fixtures and filesystem helpers.

use std::io;

use tempfile::TempDir;

/// Create a scratch directory that is removed when the guard drops.
///
/// # Errors
///
/// Returns an error if the temporary directory cannot be created.
pub fn scratch_dir() -> io::Result<TempDir> {
    tempfile::Builder::new().prefix("rotee-").tempdir()
}
