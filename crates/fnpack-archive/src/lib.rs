//! Path-confined extraction of zip archives.
//!
//! Packaged runtime templates are unpacked before the final function app
//! archive is assembled. Every entry name is normalized against the target
//! directory before anything is written, and an entry that would land
//! outside the target ("zip slip") aborts the extraction.
//!
//! Extraction is not transactional: entries written before a rejected entry
//! stay on disk.

mod error;
mod extract;
mod plan;

pub use error::ArchiveError;
pub use extract::{ExtractionSummary, extract_archive};
pub use plan::{ZipEntryPlan, plan_entry};

#[cfg(test)]
mod tests;
