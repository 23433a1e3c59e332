//! Filesystem storage implementation.
//!
//! Provides [`FsStore`] for writing the generated content tree below a
//! project directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::store::{ContentStore, StorageError, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "fs";

/// Filesystem store rooted at a project directory.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use pagesmith_storage::{ContentStore, FsStore};
///
/// let store = FsStore::new(PathBuf::from("."));
/// store.ensure_dir(Path::new("content/en"))?;
/// ```
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory all paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for FsStore {
    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        validate_path(BACKEND, path)?;
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        fs::write(&full_path, content).map_err(|source| io_error(&full_path, source))?;
        debug!("Wrote {}", full_path.display());
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), StorageError> {
        validate_path(BACKEND, path)?;
        let full_path = self.root.join(path);
        fs::create_dir_all(&full_path).map_err(|source| io_error(&full_path, source))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        backend: BACKEND,
        path: path.to_path_buf(),
        source,
    }
}
