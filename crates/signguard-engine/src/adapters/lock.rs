//! # History Directory Lock
//!
//! Process-level exclusivity for a file-backed history directory, via
//! `fs2` advisory locking (flock on Unix, LockFile on Windows).
//!
//! Two signer processes sharing one history file would each approve
//! requests the other has no record of, which defeats slashing protection
//! entirely. The lock is acquired when the store opens and released on
//! drop (RAII).

use crate::domain::errors::StoreError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exclusive lock on a history directory.
pub struct HistoryLock {
    /// Kept open to maintain the lock.
    file: File,
    path: PathBuf,
}

impl HistoryLock {
    /// Lock file name inside the history directory.
    const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock, recording this process's PID in the lock file.
    ///
    /// ## Errors
    ///
    /// `StoreError::Locked` if another process holds the lock; the PID of
    /// the holder is reported when readable.
    pub fn acquire(data_dir: &Path) -> Result<Self, StoreError> {
        let lock_path = data_dir.join(Self::LOCK_FILE);

        // No truncate before the lock is ours: clobbering the holder's
        // PID record would break the error message below.
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StoreError::Io {
                reason: format!("create lock file: {}", e),
            })?;

        if file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked {
                pid: Self::read_holder_pid(&lock_path),
            });
        }

        file.set_len(0).map_err(|e| StoreError::Io {
            reason: format!("truncate lock file: {}", e),
        })?;
        writeln!(file, "{}", std::process::id()).map_err(|e| StoreError::Io {
            reason: format!("write pid to lock file: {}", e),
        })?;

        Ok(Self {
            file,
            path: lock_path,
        })
    }

    /// PID recorded by the current holder, for error messages.
    fn read_holder_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for HistoryLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
