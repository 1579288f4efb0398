use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in Folder Guard.
#[derive(Debug, Error)]
pub enum FolderGuardError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Container errors ---
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    // --- Store errors ---
    #[error("Document not found: {0}")]
    DocumentNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Storage full while writing {0}")]
    StorageFull(PathBuf),

    #[error("A document already exists at {0}")]
    TargetExists(PathBuf),

    // --- Locking ---
    #[error("Operation already in progress for {0}")]
    Busy(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Runtime errors ---
    #[error("Background task failed: {0}")]
    TaskFailed(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Coarse classification used to report failures to users.
///
/// Every error collapses into exactly one category; the category carries
/// the short message shown to the user while the full error is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or incomplete container (corruption or tampering).
    Format,
    /// AEAD tag mismatch, in practice almost always a wrong password.
    Authentication,
    /// The document vanished between listing and access.
    NotFound,
    Permission,
    StorageFull,
    /// The document or tree is already being processed.
    LockBusy,
    /// The renamed document would replace an existing one.
    Conflict,
    Unknown,
}

impl ErrorCategory {
    /// Short, user-facing description. Never contains secret material.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Format => "file is corrupted or not a valid encrypted container",
            Self::Authentication => "wrong password, or the file was tampered with",
            Self::NotFound => "file no longer exists",
            Self::Permission => "permission denied",
            Self::StorageFull => "not enough storage space",
            Self::LockBusy => "another operation on this item is already in progress",
            Self::Conflict => "a file with the target name already exists",
            Self::Unknown => "unexpected error",
        }
    }
}

impl FolderGuardError {
    /// Classify this error into the reporting taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidContainer(_) => ErrorCategory::Format,
            Self::AuthenticationFailed => ErrorCategory::Authentication,
            Self::DocumentNotFound(_) => ErrorCategory::NotFound,
            Self::PermissionDenied(_) => ErrorCategory::Permission,
            Self::StorageFull(_) => ErrorCategory::StorageFull,
            Self::TargetExists(_) => ErrorCategory::Conflict,
            Self::Busy(_) => ErrorCategory::LockBusy,
            Self::Io(e) => classify_io(e.kind()),
            Self::EncryptionFailed(_)
            | Self::KeyDerivationFailed(_)
            | Self::ConfigError(_)
            | Self::TaskFailed(_)
            | Self::CommandFailed(_)
            | Self::UserCancelled => ErrorCategory::Unknown,
        }
    }

    /// Convert an I/O error on `path` into the most specific variant.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::DocumentNotFound(path.into()),
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                Self::PermissionDenied(path.into())
            }
            ErrorKind::StorageFull => Self::StorageFull(path.into()),
            ErrorKind::AlreadyExists => Self::TargetExists(path.into()),
            _ => Self::Io(err),
        }
    }
}

fn classify_io(kind: ErrorKind) -> ErrorCategory {
    match kind {
        ErrorKind::NotFound => ErrorCategory::NotFound,
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => ErrorCategory::Permission,
        ErrorKind::StorageFull => ErrorCategory::StorageFull,
        ErrorKind::AlreadyExists => ErrorCategory::Conflict,
        _ => ErrorCategory::Unknown,
    }
}

/// Convenience type alias for Folder Guard results.
pub type Result<T> = std::result::Result<T, FolderGuardError>;
