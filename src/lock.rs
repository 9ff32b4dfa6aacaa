//! Advisory locking on the backing file (fs2).
//!
//! While an index is published the store holds a shared lock on the source file.
//! Cooperating writers that take an exclusive lock before rewriting the file will
//! see it is being served. The lock is always acquired with a non-blocking try so
//! loading never waits on another process.
//!
//! Lock is released on Drop.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

#[derive(Debug)]
pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Try to lock `path` in the requested mode. Fails immediately if a conflicting lock is held.
pub fn try_lock_file(path: &Path, mode: LockMode) -> io::Result<LockGuard> {
    let file = match mode {
        LockMode::Shared => OpenOptions::new().read(true).open(path)?,
        LockMode::Exclusive => OpenOptions::new().read(true).write(true).open(path)?,
    };
    match mode {
        LockMode::Shared => file.try_lock_shared()?,
        LockMode::Exclusive => file.try_lock_exclusive()?,
    }
    Ok(LockGuard {
        file,
        path: path.to_path_buf(),
    })
}

pub fn try_shared_lock(path: &Path) -> io::Result<LockGuard> {
    try_lock_file(path, LockMode::Shared)
}

/// For writers (and tests) that want to keep the store from indexing a file mid-rewrite.
pub fn try_exclusive_lock(path: &Path) -> io::Result<LockGuard> {
    try_lock_file(path, LockMode::Exclusive)
}
