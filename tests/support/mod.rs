//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use folderguard::store::MemoryDocumentStore;
use folderguard::{DocumentStore, FolderGuardError, Result};

/// Passes every call through to a memory store, except the ones switched
/// off with the failure flags.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryDocumentStore,
    fail_writes: AtomicBool,
    fail_listing: AtomicBool,
    hide_plaintext: AtomicBool,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new(inner: MemoryDocumentStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    pub fn fail_listing(&self, on: bool) {
        self.fail_listing.store(on, Ordering::SeqCst);
    }

    /// Make `exists` report every `.md` document as missing.
    pub fn hide_plaintext(&self, on: bool) {
        self.hide_plaintext.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn read_document(&self, path: &Path) -> Result<String> {
        self.inner.read_document(path).await
    }

    async fn write_document(&self, path: &Path, text: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FolderGuardError::StorageFull(path.to_path_buf()));
        }
        self.inner.write_document(path, text).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        self.inner.rename(from, to).await
    }

    async fn exists(&self, path: &Path) -> bool {
        if self.hide_plaintext.load(Ordering::SeqCst)
            && path.extension().is_some_and(|ext| ext == "md")
        {
            return false;
        }
        self.inner.exists(path).await
    }

    async fn list_tree_depth_first(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(FolderGuardError::PermissionDenied(root.to_path_buf()));
        }
        self.inner.list_tree_depth_first(root).await
    }
}
