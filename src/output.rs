// src/output.rs
use crate::types::RenamePlan;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::BufRead;

pub struct Output {
    quiet: bool,
    verbose: bool,
    term: Term,
}

impl Output {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            term: Term::stderr(),
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            let _ = self.term.write_line(msg);
        }
    }

    pub fn verbose(&self, msg: &str) {
        if self.verbose && !self.quiet {
            let _ = self.term.write_line(&format!("  {}", style(msg).dim()));
        }
    }

    pub fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&format!("{}: {}", style("Warning").yellow(), msg));
    }

    pub fn error(&self, msg: &str) {
        let _ = self.term.write_line(&format!("{}: {}", style("Error").red(), msg));
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            let _ = self.term.write_line(&format!("{}", style(msg).green()));
        }
    }

    /// Preview goes to stdout so it can be piped or captured
    pub fn preview(&self, plans: &[RenamePlan]) {
        for plan in plans {
            println!(
                "  {} {} {}",
                plan.source_name(),
                style("→").cyan(),
                style(plan.destination_name()).bold()
            );
        }
    }

    /// Ask a question on the terminal and read one line of answer.
    /// Returns `None` at end of input.
    pub fn prompt<R: BufRead>(&self, question: &str, input: &mut R) -> std::io::Result<Option<String>> {
        let _ = self.term.write_str(&format!("{} ", style(question).bold()));
        let _ = self.term.flush();

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            let _ = self.term.write_line("");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:40.cyan/blue}] {pos}/{len} files")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    }
}
