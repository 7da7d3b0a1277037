// src/pipeline/lock.rs

//! Run lock serializing invocations over one project root.
//!
//! A periodic scheduler can fire a new invocation while the previous one is
//! still pushing; without a lock both would race on the same log file and
//! commit history. The lock is a file created with `create_new`, so exactly
//! one invocation can hold it; it is removed when the guard drops.
//!
//! A crashed run leaves the file behind, and later runs fail with
//! `LockHeld` until it is removed manually. There is no staleness
//! detection.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::errors::{CronpushError, Result};

/// RAII guard for the run lock file.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Acquire the lock by creating `path`.
    ///
    /// The file holds the PID of the owning process for diagnostics.
    /// Fails with [`CronpushError::LockHeld`] if the file already exists.
    pub fn acquire(path: PathBuf) -> Result<Self> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(CronpushError::LockHeld(path));
            }
            Err(e) => return Err(CronpushError::IoError(e)),
        };

        writeln!(file, "{}", std::process::id())?;
        debug!(path = %path.display(), "run lock acquired");

        Ok(Self { path })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove run lock file"
            );
        } else {
            debug!(path = %self.path.display(), "run lock released");
        }
    }
}
