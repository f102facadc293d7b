//! Document storage used at explicit open/save points.
//!
//! Documents are opaque strings addressed by key. The session decides the
//! keys; implementations only store and return them.

use crate::errors::{EditorError, EditorResult};
use sitebuilder_common::{FileSystem, RealFileSystem};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait Persistence {
    /// Stored document for `key`, `None` if nothing was ever saved
    fn load_document(&self, key: &str) -> EditorResult<Option<String>>;

    fn save_document(&mut self, key: &str, document: &str) -> EditorResult<()>;
}

/// HashMap-backed store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    documents: HashMap<String, String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, key: impl Into<String>, document: impl Into<String>) -> Self {
        self.documents.insert(key.into(), document.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.documents.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Persistence for MemoryPersistence {
    fn load_document(&self, key: &str) -> EditorResult<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    fn save_document(&mut self, key: &str, document: &str) -> EditorResult<()> {
        self.documents.insert(key.to_string(), document.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per document under a root directory
pub struct FilePersistence<F: FileSystem = RealFileSystem> {
    root: PathBuf,
    fs: F,
}

impl FilePersistence<RealFileSystem> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, RealFileSystem)
    }
}

impl<F: FileSystem> FilePersistence<F> {
    pub fn with_fs(root: impl Into<PathBuf>, fs: F) -> Self {
        Self { root: root.into(), fs }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> EditorResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(EditorError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl<F: FileSystem> Persistence for FilePersistence<F> {
    fn load_document(&self, key: &str) -> EditorResult<Option<String>> {
        let path = self.path_for(key)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        debug!(path = %path.display(), "reading document");
        Ok(Some(self.fs.read_to_string(&path)?))
    }

    fn save_document(&mut self, key: &str, document: &str) -> EditorResult<()> {
        let path = self.path_for(key)?;
        self.fs.create_dir_all(&self.root)?;
        debug!(path = %path.display(), bytes = document.len(), "writing document");
        self.fs.write(&path, document)?;
        Ok(())
    }
}
