//! The live target descriptor: open handle, path, and the identity captured
//! when the handle was opened.

use std::path::{Path, PathBuf};

use rotee_config::OpenMode;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{CopyError, CopyResult};
use crate::identity::FileIdentity;

/// Currently-open target file.
///
/// Exactly one exists per run. Replacing it goes through [`LiveTarget::reopen`],
/// which closes this handle before the path is opened again.
#[derive(Debug)]
pub struct LiveTarget {
    file: File,
    path: PathBuf,
    mode: OpenMode,
    identity: FileIdentity,
}

impl LiveTarget {
    /// Open `path` for writing, creating it if absent. `Truncate` discards
    /// existing content; `Append` positions every write at end-of-file.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::Open`] when the path cannot be opened for writing
    /// (missing parent directory, a directory, insufficient permissions) or
    /// the opened handle cannot be stat'ed.
    pub async fn open(path: &Path, mode: OpenMode) -> CopyResult<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        match mode {
            OpenMode::Truncate => options.truncate(true),
            OpenMode::Append => options.append(true),
        };

        let file = options
            .open(path)
            .await
            .map_err(|source| CopyError::open(path, source))?;
        let metadata = file
            .metadata()
            .await
            .map_err(|source| CopyError::open(path, source))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            mode,
            identity: FileIdentity::from_metadata(&metadata),
        })
    }

    /// Path this target was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode used for this open and any reopen.
    #[must_use]
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Identity captured when the handle was opened.
    #[must_use]
    pub const fn identity(&self) -> FileIdentity {
        self.identity
    }

    /// Write a whole chunk and wait for it to reach the file.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::WriteTarget`] when the write or flush fails.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> CopyResult<()> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|source| CopyError::write_target(&self.path, source))?;
        self.file
            .flush()
            .await
            .map_err(|source| CopyError::write_target(&self.path, source))
    }

    /// Close this handle and open the same path again with the same mode.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::Close`] if pending writes cannot be flushed, or
    /// [`CopyError::Open`] if the path cannot be opened again. Either way the
    /// old handle is gone.
    pub async fn reopen(self) -> CopyResult<Self> {
        let path = self.path.clone();
        let mode = self.mode;
        self.close().await?;
        Self::open(&path, mode).await
    }

    /// Flush pending writes and release the handle.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError::Close`] when the final flush fails; the handle is
    /// released regardless.
    pub async fn close(mut self) -> CopyResult<()> {
        let flushed = self.file.flush().await;
        drop(self.file);
        flushed.map_err(|source| CopyError::close(&self.path, source))
    }
}
