//! On-disk identity tokens.
//!
//! A [`FileIdentity`] names the file object, not the path: on Unix it is the
//! `(device, inode)` pair, so renames, delete-and-recreate, and swapped-in
//! replacements compare unequal while writes and growth on the same file do
//! not change it.

use std::fs::Metadata;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Comparable token identifying an on-disk file object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    device: u64,
    inode: u64,
}

impl FileIdentity {
    /// Build the token from already-fetched metadata.
    #[cfg(unix)]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        }
    }

    /// Build the token from already-fetched metadata.
    ///
    /// Without inode numbers the creation timestamp stands in for the inode,
    /// which still distinguishes a recreated file from the original.
    #[cfg(not(unix))]
    #[must_use]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let inode = metadata
            .created()
            .ok()
            .and_then(|created| created.duration_since(std::time::UNIX_EPOCH).ok())
            .map_or(0, |since| {
                u64::try_from(since.as_nanos()).unwrap_or(u64::MAX)
            });
        Self { device: 0, inode }
    }

    /// Stat `path` (following symlinks) and return the identity of whatever
    /// it currently names.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the path cannot be stat'ed, e.g.
    /// because it was removed and not yet recreated.
    pub async fn probe(path: &Path) -> io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Self::from_metadata(&metadata))
    }

    /// Whether both tokens name the same file object.
    #[must_use]
    pub const fn matches(self, other: Self) -> bool {
        self.device == other.device && self.inode == other.inode
    }
}
