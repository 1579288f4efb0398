//! File-system document store backed by `tokio::fs`.
//!
//! Writes go through a temp file in the same directory followed by a
//! rename, so a reader never sees a half-written document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::DocumentStore;
use crate::errors::{FolderGuardError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn read_document(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| FolderGuardError::from_io(e, path))
    }

    async fn write_document(&self, path: &Path, text: &str) -> Result<()> {
        if !self.exists(path).await {
            return Err(FolderGuardError::DocumentNotFound(path.to_path_buf()));
        }

        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        if let Err(e) = fs::write(&tmp_path, text).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(FolderGuardError::from_io(e, path));
        }
        commit_temp(&tmp_path, path).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        // `fs::rename` silently replaces the target on Unix.
        if fs::try_exists(to).await.unwrap_or(true) {
            return Err(FolderGuardError::TargetExists(to.to_path_buf()));
        }
        fs::rename(from, to)
            .await
            .map_err(|e| FolderGuardError::from_io(e, from))
    }

    async fn exists(&self, path: &Path) -> bool {
        matches!(fs::metadata(path).await, Ok(meta) if meta.is_file())
    }

    async fn list_tree_depth_first(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        // Stack of directory iterators: pre-order walk without recursion.
        let mut stack = vec![sorted_entries(root).await?.into_iter()];

        while let Some(entries) = stack.last_mut() {
            let Some((path, is_dir)) = entries.next() else {
                stack.pop();
                continue;
            };
            if is_dir {
                stack.push(sorted_entries(&path).await?.into_iter());
            } else {
                files.push(path);
            }
        }

        Ok(files)
    }
}

/// Move a fully written temp file over `path`. The temp file never
/// outlives a failed move.
async fn commit_temp(tmp_path: &Path, path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(tmp_path, path).await {
        let _ = fs::remove_file(tmp_path).await;
        return Err(FolderGuardError::from_io(e, path));
    }
    Ok(())
}

/// Non-hidden entries of `dir`, sorted by file name, tagged with `is_dir`.
async fn sorted_entries(dir: &Path) -> Result<Vec<(PathBuf, bool)>> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|e| FolderGuardError::from_io(e, dir))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| FolderGuardError::from_io(e, dir))?
    {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| FolderGuardError::from_io(e, entry.path()))?;
        if file_type.is_symlink() {
            continue;
        }
        entries.push((entry.path(), file_type.is_dir()));
    }

    entries.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    Ok(entries)
}
