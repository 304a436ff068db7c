// Run configuration, resolved once before any planning happens

use crate::cli::Cli;
use crate::error::RenameError;
use crate::output::Output;
use crate::types::Padding;
use std::io::BufRead;
use std::path::{Path, PathBuf};

pub const DIGITS_QUESTION: &str = "Numbering format (2 or 3 digits):";

#[derive(Debug, Clone)]
pub struct Config {
    pub working_directory: PathBuf,
    pub padding: Padding,
    pub jobs: usize,
    pub assume_yes: bool,
    pub dry_run: bool,
}

impl Config {
    /// Complete the configuration from the command line, asking for the
    /// padding on `input` when it was not given as a flag.
    pub fn load<R: BufRead>(cli: &Cli, output: &Output, input: &mut R) -> Result<Config, RenameError> {
        let working_directory = resolve_directory(cli.directory.as_deref())?;

        let padding = match cli.digits {
            Some(d) => Padding::from_digits(d).ok_or_else(|| RenameError::InvalidDigits(d.to_string()))?,
            None => {
                let answer = output.prompt(DIGITS_QUESTION, input)?.unwrap_or_default();
                Padding::parse(&answer).ok_or(RenameError::InvalidDigits(answer))?
            }
        };

        let jobs = cli.jobs.map(usize::from).unwrap_or_else(num_cpus::get);

        Ok(Config {
            working_directory,
            padding,
            jobs,
            assume_yes: cli.yes,
            dry_run: cli.dry_run,
        })
    }
}

/// Absolute path of the directory to work in, current directory by default
pub fn resolve_directory(directory: Option<&Path>) -> Result<PathBuf, RenameError> {
    let dir = match directory {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().map_err(|e| RenameError::UnreadableDirectory {
            path: PathBuf::from("."),
            source: e,
        })?,
    };

    let abs = dir
        .canonicalize()
        .map_err(|_| RenameError::InvalidDirectory(dir.clone()))?;

    if !abs.is_dir() {
        return Err(RenameError::NotADirectory(abs));
    }
    Ok(abs)
}
