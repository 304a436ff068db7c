// Scanner module for listing the working directory

use crate::error::RenameError;
use crate::types::DirectoryEntry;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// List the direct children of `dir` in filesystem order.
///
/// Names that are not valid UTF-8 are left out, they cannot be parsed anyway.
pub fn scan_directory(dir: &Path) -> Result<Vec<DirectoryEntry>, RenameError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| RenameError::UnreadableDirectory {
            path: dir.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk failed")),
        })?;

        let name = match entry.file_name().to_str() {
            Some(n) => n.to_string(),
            None => continue,
        };

        if entry.file_type().is_dir() {
            entries.push(DirectoryEntry::directory(name));
        } else {
            entries.push(DirectoryEntry::file(name));
        }
    }

    Ok(entries)
}
