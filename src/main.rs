mod cli;
mod config;
mod error;
mod executor;
mod normalize;
mod output;
mod parser;
mod plan;
mod scanner;
mod types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use error::RenameError;
use executor::execute;
use output::Output;
use plan::{build_plan, validate, validate_targets, SkipReason};
use scanner::scan_directory;
use std::io::{self, BufRead};

const CONFIRM_QUESTION: &str = "Continue? [y/N]:";

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let output = Output::new(cli.quiet, cli.verbose);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if let Err(e) = run(&cli, &output, &mut input) {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run<R: BufRead>(cli: &Cli, output: &Output, input: &mut R) -> Result<()> {
    let config = Config::load(cli, output, input)?;
    let dir = &config.working_directory;

    output.info(&format!("Working directory: {}", dir.display()));
    output.verbose(&format!("Padding to {} digits, {} workers", config.padding, config.jobs));

    let entries = scan_directory(dir)?;

    let outcome = build_plan(dir, &entries, config.padding);
    for (entry, reason) in &outcome.skipped {
        let msg = match reason {
            SkipReason::Directory => format!("Skipping directory {}", entry.name),
            SkipReason::Hidden => format!("Skipping hidden file {}", entry.name),
            SkipReason::NoNumber => format!("No number found, skipping {}", entry.name),
            SkipReason::AlreadyCanonical => format!("Already named correctly: {}", entry.name),
        };
        output.verbose(&msg);
    }
    let plans = outcome.plans;

    if plans.is_empty() {
        return Err(RenameError::NothingToRename.into());
    }

    validate(&plans)?;
    validate_targets(&plans, &entries)?;

    output.info(&format!("Preview of {} file(s) to rename:", plans.len()));
    output.preview(&plans);

    if config.dry_run {
        output.info("Dry run, nothing renamed");
        return Ok(());
    }

    if !config.assume_yes && !confirm(output, input)? {
        output.info("Cancelled, nothing renamed");
        return Ok(());
    }

    let pb = output.progress_bar(plans.len() as u64);
    let report = execute(&plans, config.jobs, |plan, result| {
        pb.inc(1);
        if result.is_ok() {
            pb.suspend(|| output.info(&format!("  {}", plan)));
        }
    })?;
    pb.finish_and_clear();

    if !report.is_success() {
        for e in &report.errors {
            output.warning(&e.to_string());
        }
        return Err(RenameError::RenameFailed {
            failed: report.errors.len(),
            renamed: report.renamed,
        }
        .into());
    }

    output.success(&format!("Done: Renamed {} files", report.renamed));
    Ok(())
}

/// Only an explicit yes counts, end of input is a no
fn confirm<R: BufRead>(output: &Output, input: &mut R) -> Result<bool, RenameError> {
    let answer = output.prompt(CONFIRM_QUESTION, input)?.unwrap_or_default();
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}
