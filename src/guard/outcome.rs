//! Results reported by the orchestrator.
//!
//! Public orchestrator calls never return `Err`: every failure is
//! classified and folded into one of these values.

use std::path::{Path, PathBuf};

use crate::errors::{ErrorCategory, FolderGuardError};

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    /// Past-tense verb used in notices ("Locked 3 files").
    pub fn verb(self) -> &'static str {
        match self {
            Self::Encrypt => "Locked",
            Self::Decrypt => "Unlocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The document does not carry the suffix this mode acts on.
    WrongSuffix,
    /// The document no longer exists in the store.
    Missing,
}

/// A classified failure on one document (or tree root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub category: ErrorCategory,
    /// Short user-facing message; full details go to the log.
    pub message: String,
}

impl Failure {
    pub fn new(path: &Path, err: &FolderGuardError) -> Self {
        let category = err.category();
        Self {
            path: path.to_path_buf(),
            category,
            message: category.user_message().to_string(),
        }
    }
}

/// Result of a single-document operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Converted; `path` is the document's new location.
    Succeeded { path: PathBuf },
    Skipped(SkipReason),
    /// Another operation holds this document.
    Busy,
    Failed(Failure),
}

impl DocumentOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Aggregate of a tree run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    pub mode: Mode,
    pub root: PathBuf,
    pub succeeded: usize,
    /// Matching documents that vanished before they were processed.
    pub skipped: usize,
    pub failed: Vec<Failure>,
}

impl TreeReport {
    pub fn new(mode: Mode, root: &Path) -> Self {
        Self {
            mode,
            root: root.to_path_buf(),
            succeeded: 0,
            skipped: 0,
            failed: Vec::new(),
        }
    }

    pub fn failed_paths(&self) -> Vec<&Path> {
        self.failed.iter().map(|f| f.path.as_path()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of a tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeOutcome {
    /// Another operation holds this tree.
    Busy,
    /// The store could not list the tree; nothing was touched.
    ListingFailed(Failure),
    Completed(TreeReport),
}

impl TreeOutcome {
    pub fn report(&self) -> Option<&TreeReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}
