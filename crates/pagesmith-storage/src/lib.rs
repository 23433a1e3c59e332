//! Output storage abstraction for pagesmith.
//!
//! This crate provides a [`ContentStore`] trait for abstracting byte
//! persistence of the generated content tree. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between path/content computation and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentStore`] trait with `write()` and `ensure_dir()` methods
//! - [`FsStore`] implementation rooted at a project directory
//! - [`MockStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use pagesmith_storage::{ContentStore, FsStore};
//!
//! let store = FsStore::new(PathBuf::from("site"));
//! store.write(Path::new("content/en/1.about.md"), "# About\n")?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{ContentStore, StorageError};
