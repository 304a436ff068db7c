use std::io;
use std::path::PathBuf;

/// Errors that stop a run before or after the rename pass
#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("directory not found: {}", .0.display())]
    InvalidDirectory(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read directory {}", path.display())]
    UnreadableDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid numbering format {0:?}, expected 2 or 3")]
    InvalidDigits(String),
    #[error("no files eligible for renaming found")]
    NothingToRename,
    #[error("two files would get the same name: {first} and {second}")]
    Collision { first: String, second: String },
    #[error("{file} would overwrite existing file {target}")]
    TargetExists { file: String, target: String },
    #[error("{failed} rename(s) failed, {renamed} succeeded")]
    RenameFailed { failed: usize, renamed: usize },
    #[error("failed to read answer: {0}")]
    Prompt(#[from] io::Error),
}

/// A single rename that did not go through
#[derive(Debug)]
pub struct ExecutionError {
    pub source_name: String,
    pub destination_name: String,
    pub cause: io::Error,
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to rename {} → {}: {}",
            self.source_name, self.destination_name, self.cause
        )
    }
}
