use crate::error::CommonError;
use crate::result::CommonResult;
use sitebuilder_model::{deserialize_tree, Element};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Read and validate a saved page tree
pub fn read_tree<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> CommonResult<Vec<Element>> {
    let source = fs.read_to_string(path).map_err(|source| CommonError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(deserialize_tree(&source)?)
}

/// File system abstraction for document storage and testing
pub trait FileSystem: Send + Sync {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a whole file, replacing any previous content
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Create a directory and its parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        // Write to a sibling temp file first so a failed save never truncates the old document
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory file system for testing
///
/// Clones share the same backing map.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: PathBuf, contents: impl Into<String>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path, contents.into());
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self
            .files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "mock file system poisoned"))?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.add_file(path.to_path_buf(), contents);
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}
