// Rename planning and collision checks

use crate::error::RenameError;
use crate::normalize::canonical_name;
use crate::parser::parse;
use crate::types::{file_name_lossy, DirectoryEntry, Padding, RenamePlan};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Why an entry did not end up in the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    Hidden,
    NoNumber,
    AlreadyCanonical,
}

/// Decide what to do with one entry: either a rename plan or a skip reason
pub fn plan_entry(
    directory: &Path,
    entry: &DirectoryEntry,
    padding: Padding,
) -> Result<RenamePlan, SkipReason> {
    if entry.is_directory {
        return Err(SkipReason::Directory);
    }
    if entry.is_hidden() {
        return Err(SkipReason::Hidden);
    }

    let parsed = parse(&entry.name).ok_or(SkipReason::NoNumber)?;
    let new_name = canonical_name(&parsed, padding);

    if new_name == entry.name {
        return Err(SkipReason::AlreadyCanonical);
    }

    RenamePlan::new(directory.join(&entry.name), directory.join(new_name))
        .ok_or(SkipReason::AlreadyCanonical)
}

/// Renames to perform plus the entries that were left alone
#[derive(Debug, Default)]
pub struct PlanOutcome<'a> {
    /// Rename plans in listing order
    pub plans: Vec<RenamePlan>,
    pub skipped: Vec<(&'a DirectoryEntry, SkipReason)>,
}

/// Build rename plans for every eligible entry, keeping listing order
pub fn build_plan<'a>(
    directory: &Path,
    entries: &'a [DirectoryEntry],
    padding: Padding,
) -> PlanOutcome<'a> {
    let mut outcome = PlanOutcome::default();

    for entry in entries {
        match plan_entry(directory, entry, padding) {
            Ok(plan) => outcome.plans.push(plan),
            Err(reason) => outcome.skipped.push((entry, reason)),
        }
    }

    outcome
}

/// Fail if two distinct sources would end up with the same destination
pub fn validate(plans: &[RenamePlan]) -> Result<(), RenameError> {
    let mut seen: HashMap<&PathBuf, &PathBuf> = HashMap::new();

    for plan in plans {
        match seen.get(plan.destination_path()) {
            Some(&previous) if previous != plan.source_path() => {
                return Err(RenameError::Collision {
                    first: file_name_lossy(previous),
                    second: plan.source_name(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(plan.destination_path(), plan.source_path());
            }
        }
    }

    Ok(())
}

/// Fail if a destination name is already taken by an entry in the listing.
///
/// This also rejects chains where one plan renames into another plan's
/// source, which could race once renames run in parallel.
pub fn validate_targets(plans: &[RenamePlan], entries: &[DirectoryEntry]) -> Result<(), RenameError> {
    let existing: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();

    for plan in plans {
        let target = plan.destination_name();
        if existing.contains(target.as_str()) {
            return Err(RenameError::TargetExists {
                file: plan.source_name(),
                target,
            });
        }
    }

    Ok(())
}
