//! Builds small zip archives on disk for tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// One archive entry: a name and, for files, its contents.
pub(super) enum Entry<'a> {
    Dir(&'a str),
    File(&'a str, &'a str),
}

/// Writes `entries` in order to `dir/name` and returns the archive path.
pub(super) fn write_archive(dir: &Path, name: &str, entries: &[Entry<'_>]) -> PathBuf {
    let archive = dir.join(name);
    let file = File::create(&archive).expect("create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for entry in entries {
        match entry {
            Entry::Dir(entry_name) => writer
                .add_directory(*entry_name, options)
                .expect("add directory"),
            Entry::File(entry_name, contents) => {
                writer.start_file(*entry_name, options).expect("start file");
                writer
                    .write_all(contents.as_bytes())
                    .expect("write contents");
            }
        }
    }
    writer.finish().expect("finish archive");
    archive
}
