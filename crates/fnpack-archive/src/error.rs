//! Errors raised while extracting an archive.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors returned by [`extract_archive`](crate::extract_archive) and
/// [`plan_entry`](crate::plan_entry).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The archive file could not be opened.
    #[error("failed to open archive {}: {source}", .path.display())]
    Open {
        /// Archive path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The archive or one of its entries could not be read.
    #[error("failed to read archive {}: {source}", .path.display())]
    Read {
        /// Archive path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<zip::result::ZipError>,
    },

    /// An entry resolves outside the target directory.
    #[error("Bad zip entry: {name}")]
    BadEntry {
        /// Entry name as stored in the archive.
        name: String,
    },

    /// A directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDirectory {
        /// Directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// An entry could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl ArchiveError {
    /// Creates a [`ArchiveError::BadEntry`] for `name`.
    #[must_use]
    pub fn bad_entry(name: impl Into<String>) -> Self {
        Self::BadEntry { name: name.into() }
    }

    /// Returns `true` when the error is a rejected traversal entry.
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        matches!(self, Self::BadEntry { .. })
    }
}
