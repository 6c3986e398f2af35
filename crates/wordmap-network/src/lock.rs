//! Advisory lock file marking a word-map export as in flight.
//!
//! The lock is a plain empty file at `<base>.lock`. Nothing here prevents a
//! second writer; cooperating processes check [`RunLock::is_held`] before
//! starting or serving the export. A process that dies mid-run leaves the
//! file behind.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::NetworkError;
use crate::export::with_suffix;

#[derive(Debug)]
#[must_use = "dropping a RunLock leaves the lock file in place; call release()"]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Path of the lock file guarding exports to `base`.
    #[must_use]
    pub fn path_for(base: &Path) -> PathBuf {
        with_suffix(base, ".lock")
    }

    #[must_use]
    pub fn is_held(base: &Path) -> bool {
        Self::path_for(base).exists()
    }

    /// Create the lock file, or refresh its mtime if it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Io`] if the file cannot be created or touched.
    pub fn acquire(base: &Path) -> Result<Self, NetworkError> {
        let path = Self::path_for(base);
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| NetworkError::io(&path, e))?;
        file.set_modified(SystemTime::now())
            .map_err(|e| NetworkError::io(&path, e))?;
        tracing::debug!(path = %path.display(), "acquired run lock");
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the lock file. A file already removed by someone else is fine.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Io`] if the file exists but cannot be removed.
    pub fn release(self) -> Result<(), NetworkError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "released run lock");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "run lock was already removed");
                Ok(())
            }
            Err(e) => Err(NetworkError::io(&self.path, e)),
        }
    }
}
