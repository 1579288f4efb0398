//! Document store abstraction.
//!
//! The orchestrator never touches the file system directly; it talks to a
//! `DocumentStore`. Hosts plug in their own adapter, and two ship here:
//! - `FsDocumentStore` for real directories (`fs`)
//! - `MemoryDocumentStore` for embedding and tests (`memory`)
//!
//! Documents are identified by path. Their kind (plaintext or encrypted)
//! comes from the file extension as configured in `Suffixes`.

pub mod fs;
pub mod memory;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::Result;

pub use fs::FsDocumentStore;
pub use memory::MemoryDocumentStore;

/// Storage operations consumed by the orchestrator.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the full text of a document.
    async fn read_document(&self, path: &Path) -> Result<String>;

    /// Replace the full text of an existing document.
    async fn write_document(&self, path: &Path, text: &str) -> Result<()>;

    /// Move a document. Must fail with `TargetExists` rather than replace
    /// a document already stored at `to`.
    async fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    async fn exists(&self, path: &Path) -> bool;

    /// Every document below `root`, depth-first, in a stable order.
    async fn list_tree_depth_first(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    async fn read_document(&self, path: &Path) -> Result<String> {
        (**self).read_document(path).await
    }

    async fn write_document(&self, path: &Path, text: &str) -> Result<()> {
        (**self).write_document(path, text).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).rename(from, to).await
    }

    async fn exists(&self, path: &Path) -> bool {
        (**self).exists(path).await
    }

    async fn list_tree_depth_first(&self, root: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_tree_depth_first(root).await
    }
}

/// Which side of the conversion a document is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Plaintext,
    Encrypted,
}

/// File extensions (without the dot) that mark each document kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suffixes {
    pub plaintext: String,
    pub encrypted: String,
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            plaintext: "md".to_string(),
            encrypted: "encrypted".to_string(),
        }
    }
}

impl Suffixes {
    pub fn for_kind(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Plaintext => &self.plaintext,
            DocumentKind::Encrypted => &self.encrypted,
        }
    }

    /// Infer the kind of `path` from its extension, if it has a known one.
    pub fn kind_of(&self, path: &Path) -> Option<DocumentKind> {
        let ext = path.extension()?.to_str()?;
        if ext == self.plaintext {
            Some(DocumentKind::Plaintext)
        } else if ext == self.encrypted {
            Some(DocumentKind::Encrypted)
        } else {
            None
        }
    }

    /// `notes/a.md` -> `notes/a.encrypted` (or back), keyed by the target kind.
    pub fn swap_to(&self, path: &Path, target: DocumentKind) -> PathBuf {
        path.with_extension(self.for_kind(target))
    }
}
