use clap::Parser;
use std::path::PathBuf;

/// Normalize numbered filenames to `title-NN.ext`
#[derive(Parser, Debug)]
#[command(name = "pink-renamer", version, about)]
pub struct Cli {
    /// Directory with the files to rename (default: current directory)
    #[arg()]
    pub directory: Option<PathBuf>,

    /// Zero-padding width of the number, 2 or 3 (asked when omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(2..=3))]
    pub digits: Option<u8>,

    /// Rename without asking for confirmation
    #[arg(short, long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Only show what would be renamed
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Number of parallel rename workers (default: number of CPUs)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Suppress progress output, only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show skipped files and other details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.directory {
            if !dir.exists() {
                return Err(format!("directory not found: {}", dir.display()));
            }
            if !dir.is_dir() {
                return Err(format!("not a directory: {}", dir.display()));
            }
        }
        Ok(())
    }
}
