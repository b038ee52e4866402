//! Lexical resolution of archive entry names against a target directory.

use std::path::{Component, Path, PathBuf};

use crate::ArchiveError;

/// Where a single archive entry will be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntryPlan {
    source_entry_name: String,
    resolved_target_path: PathBuf,
    is_directory: bool,
}

impl ZipEntryPlan {
    /// Entry name as stored in the archive.
    #[must_use]
    pub fn source_entry_name(&self) -> &str {
        &self.source_entry_name
    }

    /// Normalized destination path, always inside the target directory.
    #[must_use]
    pub fn resolved_target_path(&self) -> &Path {
        &self.resolved_target_path
    }

    /// Whether the entry denotes a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }
}

/// Resolves `name` against `target` and checks that it stays inside.
///
/// Backslashes are read as separators so archives produced on Windows are
/// confined the same way on every host. Containment is checked per path
/// component, so `out2/x` is never considered inside `out`.
///
/// # Errors
///
/// Returns [`ArchiveError::BadEntry`] when the normalized path escapes the
/// target, or when a file entry resolves to the target directory itself.
pub fn plan_entry(name: &str, target: &Path) -> Result<ZipEntryPlan, ArchiveError> {
    let is_directory = name.ends_with('/') || name.ends_with('\\');
    let portable = name.replace('\\', "/");
    let root = normalize(target);
    let resolved = normalize(&target.join(portable));

    if !is_contained(&resolved, &root) || (!is_directory && resolved == root) {
        return Err(ArchiveError::bad_entry(name));
    }

    Ok(ZipEntryPlan {
        source_entry_name: name.to_owned(),
        resolved_target_path: resolved,
        is_directory,
    })
}

/// Both paths must be normalized. A relative root such as `.` normalizes to
/// an empty path, which every path starts with, so the leading `..` run must
/// also match.
fn is_contained(resolved: &Path, root: &Path) -> bool {
    resolved.starts_with(root) && parent_depth(resolved) == parent_depth(root)
}

/// Counts the leading `..` components left over by [`normalize`].
fn parent_depth(path: &Path) -> usize {
    path.components()
        .take_while(|component| matches!(component, Component::ParentDir))
        .count()
}

/// Removes `.` and folds `..` into its parent without touching the disk.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
