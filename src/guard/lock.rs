//! Per-identifier operation locks.
//!
//! `OperationLocks` is the only mutable state shared between operations.
//! The check-and-mark in `acquire` happens inside one critical section
//! with no `.await`, so two tasks can never both win the same key.
//! Tree keys and document keys live in separate namespaces: locking a
//! folder does not lock the files inside it, each file operation still
//! takes its own document lock.

use std::collections::HashSet;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{FolderGuardError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LockKey {
    Document(PathBuf),
    Tree(PathBuf),
}

impl LockKey {
    pub fn document(path: &Path) -> Self {
        Self::Document(path.to_path_buf())
    }

    pub fn tree(path: &Path) -> Self {
        Self::Tree(path.to_path_buf())
    }
}

impl std::fmt::Display for LockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document(p) => write!(f, "document {}", p.display()),
            Self::Tree(p) => write!(f, "folder {}", p.display()),
        }
    }
}

/// Table of in-flight operation keys. Starts empty and must be empty
/// again once every operation has finished.
#[derive(Debug, Default)]
pub struct OperationLocks {
    held: Mutex<HashSet<LockKey>>,
}

impl OperationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as held. Returns `false` if it already was.
    pub fn acquire(&self, key: &LockKey) -> bool {
        self.table().insert(key.clone())
    }

    /// Clear `key`. Releasing a key that is not held is a no-op.
    pub fn release(&self, key: &LockKey) {
        self.table().remove(key);
    }

    /// Acquire `key` and return a guard that releases it on drop.
    pub fn try_guard(&self, key: LockKey) -> Option<LockGuard<'_>> {
        if self.acquire(&key) {
            Some(LockGuard { locks: self, key })
        } else {
            None
        }
    }

    /// Run `operation` while holding `key`.
    ///
    /// If `key` is already held the future is dropped unpolled and
    /// `Busy` is returned. Otherwise the key is released however the
    /// future finishes, including by panic or cancellation.
    pub async fn with_lock<F, T>(&self, key: LockKey, operation: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        let Some(_guard) = self.try_guard(key.clone()) else {
            return Err(FolderGuardError::Busy(key.to_string()));
        };
        Ok(operation.await)
    }

    pub fn is_held(&self, key: &LockKey) -> bool {
        self.table().contains(key)
    }

    /// `true` when no key is held. A non-idle table after all work is
    /// done means a leaked lock.
    pub fn is_idle(&self) -> bool {
        self.table().is_empty()
    }

    pub fn held(&self) -> Vec<LockKey> {
        self.table().iter().cloned().collect()
    }

    fn table(&self) -> MutexGuard<'_, HashSet<LockKey>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases its key when dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LockGuard<'a> {
    locks: &'a OperationLocks,
    key: LockKey,
}

impl LockGuard<'_> {
    pub fn key(&self) -> &LockKey {
        &self.key
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.locks.release(&self.key);
    }
}
