//! In-memory document store.
//!
//! Keys are kept in a `BTreeMap<PathBuf, _>`. `Path` ordering compares
//! component by component, so iterating the map yields exactly a
//! depth-first, name-sorted walk of the implied directory tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::DocumentStore;
use crate::errors::{FolderGuardError, Result};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(path, text)` pairs.
    pub fn with_documents<P, T>(docs: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<PathBuf>,
        T: Into<String>,
    {
        let documents = docs
            .into_iter()
            .map(|(p, t)| (p.into(), t.into()))
            .collect();
        Self {
            documents: Mutex::new(documents),
        }
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.docs().insert(path.into(), text.into());
    }

    pub fn remove(&self, path: &Path) -> Option<String> {
        self.docs().remove(path)
    }

    /// Synchronous peek, for assertions.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.docs().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.docs().keys().cloned().collect()
    }

    fn docs(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read_document(&self, path: &Path) -> Result<String> {
        self.docs()
            .get(path)
            .cloned()
            .ok_or_else(|| FolderGuardError::DocumentNotFound(path.to_path_buf()))
    }

    async fn write_document(&self, path: &Path, text: &str) -> Result<()> {
        match self.docs().get_mut(path) {
            Some(slot) => {
                *slot = text.to_string();
                Ok(())
            }
            None => Err(FolderGuardError::DocumentNotFound(path.to_path_buf())),
        }
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let mut docs = self.docs();
        if docs.contains_key(to) {
            return Err(FolderGuardError::TargetExists(to.to_path_buf()));
        }
        let text = docs
            .remove(from)
            .ok_or_else(|| FolderGuardError::DocumentNotFound(from.to_path_buf()))?;
        docs.insert(to.to_path_buf(), text);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.docs().contains_key(path)
    }

    async fn list_tree_depth_first(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .docs()
            .keys()
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .cloned()
            .collect())
    }
}
