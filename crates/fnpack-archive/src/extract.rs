//! Sequential extraction of a zip archive into a directory.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::{ArchiveError, ZipEntryPlan, plan_entry};

/// Counts of what an extraction wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    directories: usize,
    files: usize,
    bytes: u64,
}

impl ExtractionSummary {
    /// Number of directory entries created.
    #[must_use]
    pub const fn directories(&self) -> usize {
        self.directories
    }

    /// Number of file entries written.
    #[must_use]
    pub const fn files(&self) -> usize {
        self.files
    }

    /// Total uncompressed bytes written.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Extracts every entry of `archive` beneath `target`, in archive order.
///
/// Existing files are overwritten. Parent directories are created as
/// needed, so archives without explicit directory entries still extract.
///
/// # Errors
///
/// Fails on the first entry that cannot be planned or written. Entries
/// already extracted at that point are left in place.
pub fn extract_archive(archive: &Path, target: &Path) -> Result<ExtractionSummary, ArchiveError> {
    let file = File::open(archive).map_err(|source| ArchiveError::Open {
        path: archive.to_path_buf(),
        source: Arc::new(source),
    })?;
    let read_error = |source| ArchiveError::Read {
        path: archive.to_path_buf(),
        source: Arc::new(source),
    };
    let mut zip = ZipArchive::new(file).map_err(read_error)?;

    let mut summary = ExtractionSummary::default();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(read_error)?;
        let plan = plan_entry(entry.name(), target).inspect_err(|_| {
            warn!(entry = entry.name(), "rejected archive entry outside target");
        })?;
        debug!(
            entry = plan.source_entry_name(),
            path = %plan.resolved_target_path().display(),
            directory = plan.is_directory(),
            "extracting entry"
        );

        if plan.is_directory() {
            create_dir(plan.resolved_target_path())?;
            summary.directories += 1;
        } else {
            summary.bytes += write_file(&plan, &mut entry)?;
            summary.files += 1;
        }
    }

    info!(
        archive = %archive.display(),
        target = %target.display(),
        directories = summary.directories,
        files = summary.files,
        "archive extracted"
    );
    Ok(summary)
}

fn create_dir(path: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(path).map_err(|source| ArchiveError::CreateDirectory {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })
}

fn write_file(plan: &ZipEntryPlan, contents: &mut impl io::Read) -> Result<u64, ArchiveError> {
    let path = plan.resolved_target_path();
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    let write_error = |source| ArchiveError::Write {
        path: PathBuf::from(path),
        source: Arc::new(source),
    };
    let mut output = File::create(path).map_err(write_error)?;
    io::copy(contents, &mut output).map_err(write_error)
}
