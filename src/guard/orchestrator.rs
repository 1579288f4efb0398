//! Encrypt/decrypt state machines over a `DocumentStore`.
//!
//! Single-document encrypt:
//!   suffix check -> lock -> exists -> read -> salt -> derive -> encrypt
//!   -> serialize -> write container -> rename `.md` -> `.encrypted`
//!
//! Single-document decrypt:
//!   suffix check -> lock -> exists -> read -> parse -> derive -> decrypt
//!   -> rename `.encrypted` -> `.md` -> re-resolve -> write plaintext
//!
//! Everything up to and including `decrypt` is read-only, so a corrupt
//! container or a wrong password can never alter the stored document.
//! Tree operations run the same machines one document at a time in the
//! store's depth-first order.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use super::lock::{LockKey, OperationLocks};
use super::outcome::{DocumentOutcome, Failure, Mode, SkipReason, TreeOutcome, TreeReport};
use crate::container;
use crate::crypto::{decrypt, derive_key, encrypt, generate_salt, DerivedKey};
use crate::errors::{ErrorCategory, FolderGuardError, Result};
use crate::store::{DocumentKind, DocumentStore, Suffixes};

pub struct EncryptionOrchestrator<S> {
    store: S,
    locks: OperationLocks,
    suffixes: Suffixes,
}

impl<S: DocumentStore> EncryptionOrchestrator<S> {
    pub fn new(store: S) -> Self {
        Self::with_suffixes(store, Suffixes::default())
    }

    pub fn with_suffixes(store: S, suffixes: Suffixes) -> Self {
        Self {
            store,
            locks: OperationLocks::new(),
            suffixes,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn locks(&self) -> &OperationLocks {
        &self.locks
    }

    pub fn suffixes(&self) -> &Suffixes {
        &self.suffixes
    }

    /// Encrypt one plaintext document in place and give it the encrypted suffix.
    pub async fn encrypt_document(&self, path: &Path, password: &str) -> DocumentOutcome {
        self.run_document(Mode::Encrypt, path, password).await
    }

    /// Decrypt one encrypted document in place and give it the plaintext suffix.
    pub async fn decrypt_document(&self, path: &Path, password: &str) -> DocumentOutcome {
        self.run_document(Mode::Decrypt, path, password).await
    }

    /// Encrypt every plaintext document below `root`.
    pub async fn encrypt_tree(&self, root: &Path, password: &str) -> TreeOutcome {
        self.run_tree(Mode::Encrypt, root, password).await
    }

    /// Decrypt every encrypted document below `root`.
    pub async fn decrypt_tree(&self, root: &Path, password: &str) -> TreeOutcome {
        self.run_tree(Mode::Decrypt, root, password).await
    }

    async fn run_document(&self, mode: Mode, path: &Path, password: &str) -> DocumentOutcome {
        if self.suffixes.kind_of(path) != Some(source_kind(mode)) {
            debug!(path = %path.display(), ?mode, "skipping document with non-matching suffix");
            return DocumentOutcome::Skipped(SkipReason::WrongSuffix);
        }

        let Some(_guard) = self.locks.try_guard(LockKey::document(path)) else {
            warn!(path = %path.display(), ?mode, "document is busy");
            return DocumentOutcome::Busy;
        };

        if !self.store.exists(path).await {
            info!(path = %path.display(), ?mode, "document vanished before processing, skipping");
            return DocumentOutcome::Skipped(SkipReason::Missing);
        }

        let result = match mode {
            Mode::Encrypt => self.encrypt_steps(path, password).await,
            Mode::Decrypt => self.decrypt_steps(path, password).await,
        };

        match result {
            Ok(new_path) => {
                info!(path = %path.display(), to = %new_path.display(), ?mode, "document converted");
                DocumentOutcome::Succeeded { path: new_path }
            }
            Err(err) => {
                let failure = Failure::new(path, &err);
                match failure.category {
                    ErrorCategory::Authentication | ErrorCategory::Format => {
                        warn!(path = %path.display(), ?mode, error = %err, "document left unchanged")
                    }
                    _ => error!(path = %path.display(), ?mode, error = %err, "document operation failed"),
                }
                DocumentOutcome::Failed(failure)
            }
        }
    }

    async fn encrypt_steps(&self, path: &Path, password: &str) -> Result<PathBuf> {
        let target = self.suffixes.swap_to(path, DocumentKind::Encrypted);
        if self.store.exists(&target).await {
            return Err(FolderGuardError::TargetExists(target));
        }

        let plaintext = Zeroizing::new(self.store.read_document(path).await?);

        let salt = generate_salt();
        let key = derive_key_off_thread(password, &salt).await?;
        let (iv, ciphertext) = encrypt(plaintext.as_bytes(), &key)?;
        drop(key);
        debug!(path = %path.display(), "plaintext encrypted");

        let text = container::serialize(&salt, &iv, &ciphertext)?;
        self.store.write_document(path, &text).await?;

        if let Err(err) = self.store.rename(path, &target).await {
            error!(
                path = %path.display(),
                target = %target.display(),
                error = %err,
                "container written but rename failed; document keeps its plaintext name"
            );
            return Err(err);
        }
        Ok(target)
    }

    async fn decrypt_steps(&self, path: &Path, password: &str) -> Result<PathBuf> {
        let target = self.suffixes.swap_to(path, DocumentKind::Plaintext);
        if self.store.exists(&target).await {
            return Err(FolderGuardError::TargetExists(target));
        }

        let text = self.store.read_document(path).await?;
        let parsed = container::parse(&text)?;

        let key = derive_key_off_thread(password, &parsed.salt).await?;
        let plaintext = decrypt(&parsed.ciphertext, &parsed.iv, &key)?;
        drop(key);
        let plaintext = std::str::from_utf8(&plaintext).map_err(|_| {
            FolderGuardError::InvalidContainer("decrypted content is not UTF-8".into())
        })?;
        debug!(path = %path.display(), "container authenticated");

        // First mutation. Nothing above this line touches the store.
        self.store.rename(path, &target).await?;

        if let Err(err) = self.write_renamed(&target, plaintext).await {
            error!(
                path = %target.display(),
                error = %err,
                "renamed but could not write plaintext; reverting rename"
            );
            self.revert_rename(&target, path).await;
            return Err(err);
        }
        Ok(target)
    }

    /// Fill a freshly renamed document with its plaintext.
    async fn write_renamed(&self, target: &Path, plaintext: &str) -> Result<()> {
        // A handle from before the rename may be stale; look the document up again.
        if !self.store.exists(target).await {
            return Err(FolderGuardError::DocumentNotFound(target.to_path_buf()));
        }
        self.store.write_document(target, plaintext).await
    }

    async fn revert_rename(&self, renamed: &Path, original: &Path) {
        match self.store.rename(renamed, original).await {
            Ok(()) => warn!(path = %original.display(), "rename reverted, container kept"),
            Err(err) => error!(
                path = %renamed.display(),
                error = %err,
                "could not revert rename; document holds ciphertext under the plaintext name"
            ),
        }
    }

    async fn run_tree(&self, mode: Mode, root: &Path, password: &str) -> TreeOutcome {
        let Some(_guard) = self.locks.try_guard(LockKey::tree(root)) else {
            warn!(root = %root.display(), ?mode, "folder is busy");
            return TreeOutcome::Busy;
        };

        let listing = match self.store.list_tree_depth_first(root).await {
            Ok(listing) => listing,
            Err(err) => {
                error!(root = %root.display(), error = %err, "could not list folder");
                return TreeOutcome::ListingFailed(Failure::new(root, &err));
            }
        };

        let wanted = source_kind(mode);
        let mut report = TreeReport::new(mode, root);

        for path in listing
            .iter()
            .filter(|p| self.suffixes.kind_of(p) == Some(wanted))
        {
            match self.run_document(mode, path, password).await {
                DocumentOutcome::Succeeded { .. } => report.succeeded += 1,
                DocumentOutcome::Skipped(_) => report.skipped += 1,
                DocumentOutcome::Busy => {
                    let busy = FolderGuardError::Busy(LockKey::document(path).to_string());
                    report.failed.push(Failure::new(path, &busy));
                }
                DocumentOutcome::Failed(failure) => report.failed.push(failure),
            }
        }

        info!(
            root = %root.display(),
            ?mode,
            succeeded = report.succeeded,
            skipped = report.skipped,
            failed = report.failed.len(),
            "folder processed"
        );
        TreeOutcome::Completed(report)
    }
}

fn source_kind(mode: Mode) -> DocumentKind {
    match mode {
        Mode::Encrypt => DocumentKind::Plaintext,
        Mode::Decrypt => DocumentKind::Encrypted,
    }
}

/// PBKDF2 is deliberately slow; run it on the blocking pool so the
/// scheduler can make progress elsewhere meanwhile.
async fn derive_key_off_thread(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    let password = Zeroizing::new(password.as_bytes().to_vec());
    let salt = salt.to_vec();
    tokio::task::spawn_blocking(move || derive_key(&password, &salt))
        .await
        .map_err(|e| FolderGuardError::TaskFailed(format!("key derivation: {e}")))?
}
