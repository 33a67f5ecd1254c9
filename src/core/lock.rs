//! core::lock
//!
//! Advisory inter-process lock around store mutations.
//!
//! # Architecture
//!
//! A store write is a read-whole-file / mutate / write-whole-file sequence.
//! Without coordination two processes running `set` at the same time lose
//! one of the updates. The store lock serializes those sequences: every
//! writer holds an exclusive OS-level lock on a sibling file for the whole
//! sequence.
//!
//! # Storage
//!
//! - `<store file>.lock` - Lock file next to the backing document
//!
//! The lock lives in a separate file because the document itself is
//! replaced by rename on every write.
//!
//! # Invariants
//!
//! - Lock is held for the entire load-modify-dump of one `set`
//! - Lock is automatically released on drop (RAII pattern)
//! - Readers never take the lock; they always see a complete document
//!
//! # Example
//!
//! ```no_run
//! use nexus::core::lock::StoreLock;
//! use std::path::Path;
//!
//! let lock = StoreLock::acquire(Path::new("/home/me/.nexus/config/variables.toml"))?;
//! // ... read, modify, write ...
//! drop(lock);
//! # Ok::<(), nexus::core::lock::LockError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),
}

/// An exclusive lock guarding one store file.
///
/// Released when dropped.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    /// Path of the lock file guarding `store_path`.
    pub fn lock_path_for(store_path: &Path) -> PathBuf {
        let mut name = store_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        store_path.with_file_name(name)
    }

    /// Acquire the lock for `store_path`, waiting until it is free.
    ///
    /// # Errors
    ///
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(store_path: &Path) -> Result<Self, LockError> {
        let file = Self::open(store_path)?;
        file.lock_exclusive()
            .map_err(|e| LockError::AcquireFailed(e.to_string()))?;
        Ok(Self { file })
    }

    fn open(store_path: &Path) -> Result<File, LockError> {
        if let Some(parent) = store_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LockError::CreateFailed(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let path = Self::lock_path_for(store_path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;
        Ok(file)
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
