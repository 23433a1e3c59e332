//! Storage trait and error types.
//!
//! [`ContentStore`] persists generated files; [`StorageError`] reports what
//! a backend could not write.
//!
//! # Path Convention
//!
//! All path parameters are **relative to the store root**:
//! - `"content/en/1.about.md"` - a generated document
//! - `"data/en/navigation.json"` - a JSON sidecar
//!
//! Paths containing `..` or absolute components are rejected with
//! [`StorageError::InvalidPath`].

use std::path::{Component, Path, PathBuf};

/// Failure to persist part of the content tree.
///
/// Each variant names the backend that raised it (`fs`, `mock`).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Path is empty or leaves the store root.
    #[error("{backend} store: refusing path outside the store root: {}", .path.display())]
    InvalidPath {
        /// Backend name.
        backend: &'static str,
        /// Rejected path, as given.
        path: PathBuf,
    },

    /// The backend failed to create or write `path`.
    #[error("{backend} store: cannot write {}: {source}", .path.display())]
    Io {
        /// Backend name.
        backend: &'static str,
        /// Resolved path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Path the error relates to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::InvalidPath { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Reject paths that would escape the store root.
///
/// # Errors
///
/// Returns [`StorageError::InvalidPath`] for empty paths and paths with
/// `..`, root or prefix components.
pub(crate) fn validate_path(backend: &'static str, path: &Path) -> Result<(), StorageError> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.as_os_str().is_empty() {
        return Err(StorageError::InvalidPath {
            backend,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Byte persistence for the generated content tree.
///
/// Writers are single-threaded: the generator issues writes strictly in
/// navigation order, so implementations only need to be atomic enough for a
/// single writer.
pub trait ContentStore {
    /// Write `content` to `path`, creating parent directories as needed and
    /// replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the path is invalid or the write fails.
    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError>;

    /// Ensure the directory at `path` exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the path is invalid or cannot be created.
    fn ensure_dir(&self, path: &Path) -> Result<(), StorageError>;
}
