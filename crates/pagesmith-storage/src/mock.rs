//! Mock storage implementation for testing.
//!
//! Provides [`MockStore`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::store::{ContentStore, StorageError, validate_path};

/// Mock store for testing.
///
/// Keeps written files and created directories in memory, in path order.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pagesmith_storage::{ContentStore, MockStore};
///
/// let store = MockStore::new();
/// store.write(Path::new("content/en/1.about.md"), "hello")?;
/// assert_eq!(store.read("content/en/1.about.md").as_deref(), Some("hello"));
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    files: RwLock<BTreeMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written to `path`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// All written paths in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().unwrap().keys().cloned().collect()
    }

    /// Whether `ensure_dir` was called for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.read().unwrap().contains(path.as_ref())
    }
}

impl ContentStore for MockStore {
    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        validate_path("mock", path)?;
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), StorageError> {
        validate_path("mock", path)?;
        self.dirs.write().unwrap().insert(path.to_path_buf());
        Ok(())
    }
}
