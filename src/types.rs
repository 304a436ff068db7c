use std::fmt;
use std::path::PathBuf;

/// Zero-padding width for the sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// Two digits (01, 02, ... 99)
    Two,
    /// Three digits (001, 002, ... 999)
    Three,
}

impl Padding {
    /// Build a padding from a digit count, only 2 and 3 are accepted
    pub fn from_digits(digits: u8) -> Option<Padding> {
        match digits {
            2 => Some(Padding::Two),
            3 => Some(Padding::Three),
            _ => None,
        }
    }

    /// Parse user input such as "2" or " 3\n"
    pub fn parse(input: &str) -> Option<Padding> {
        input.trim().parse::<u8>().ok().and_then(Padding::from_digits)
    }

    pub fn width(&self) -> usize {
        match self {
            Padding::Two => 2,
            Padding::Three => 3,
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.width())
    }
}

/// A single entry from the directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File name only (no directory)
    pub name: String,
    pub is_directory: bool,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }

    /// Hidden entries start with a dot
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Pieces extracted from a raw filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Text before the sequence number, separators not yet normalized
    pub title: String,
    /// Sequence number with leading zeros dropped
    pub number: u64,
    /// Extension including the leading dot, or empty
    pub extension: String,
}

/// A proposed rename of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    source_path: PathBuf,
    destination_path: PathBuf,
}

impl RenamePlan {
    /// Returns `None` for identity renames, which are never planned
    pub fn new(source_path: PathBuf, destination_path: PathBuf) -> Option<RenamePlan> {
        if source_path == destination_path {
            return None;
        }
        Some(RenamePlan {
            source_path,
            destination_path,
        })
    }

    pub fn source_path(&self) -> &PathBuf {
        &self.source_path
    }

    pub fn destination_path(&self) -> &PathBuf {
        &self.destination_path
    }

    pub fn source_name(&self) -> String {
        file_name_lossy(&self.source_path)
    }

    pub fn destination_name(&self) -> String {
        file_name_lossy(&self.destination_path)
    }

    /// True when old and new names differ only in letter case
    pub fn is_case_only(&self) -> bool {
        let old = self.source_name();
        let new = self.destination_name();
        old != new && old.to_lowercase() == new.to_lowercase()
    }
}

impl fmt::Display for RenamePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source_name(), self.destination_name())
    }
}

pub fn file_name_lossy(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
