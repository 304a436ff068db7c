// Executor module for applying rename plans on a worker pool

use crate::error::ExecutionError;
use crate::types::RenamePlan;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Outcome of a rename pass
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub renamed: usize,
    /// Failed renames, in plan order
    pub errors: Vec<ExecutionError>,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Rename every plan using `jobs` worker threads.
///
/// A failed rename is recorded and the remaining work keeps going.
/// `on_result` is called from the worker threads once per plan. It must not
/// panic: a panic there is propagated out of the pool and aborts the pass.
pub fn execute<F>(plans: &[RenamePlan], jobs: usize, on_result: F) -> Result<ExecutionReport>
where
    F: Fn(&RenamePlan, &Result<(), ExecutionError>) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .thread_name(|i| format!("rename-worker-{}", i))
        .build()
        .context("Failed to create rename worker pool")?;

    let renamed = AtomicUsize::new(0);
    let errors: Mutex<Vec<(usize, ExecutionError)>> = Mutex::new(Vec::new());

    pool.install(|| {
        plans.par_iter().enumerate().for_each(|(index, plan)| {
            let result = rename_file(plan);
            on_result(plan, &result);

            match result {
                Ok(()) => {
                    renamed.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    let mut errors = errors.lock().unwrap_or_else(|p| p.into_inner());
                    errors.push((index, e));
                }
            }
        });
    });

    let mut errors = errors.into_inner().unwrap_or_else(|p| p.into_inner());
    errors.sort_by_key(|(index, _)| *index);

    Ok(ExecutionReport {
        renamed: renamed.into_inner(),
        errors: errors.into_iter().map(|(_, e)| e).collect(),
    })
}

/// Rename a single file without ever replacing an existing one
pub fn rename_file(plan: &RenamePlan) -> Result<(), ExecutionError> {
    let source = plan.source_path();
    let destination = plan.destination_path();

    let result = if plan.is_case_only() {
        rename_case_only(source, destination)
    } else if fs::symlink_metadata(destination).is_ok() {
        Err(destination_exists())
    } else {
        fs::rename(source, destination)
    };

    result.map_err(|cause| ExecutionError {
        source_name: plan.source_name(),
        destination_name: plan.destination_name(),
        cause,
    })
}

fn destination_exists() -> io::Error {
    io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists")
}

/// Case-only renames go through a temporary name so they also work on
/// case-insensitive filesystems. On those the destination resolves to the
/// source itself; any other file at the destination is left alone.
fn rename_case_only(source: &Path, destination: &Path) -> io::Result<()> {
    if let Ok(dest_meta) = fs::symlink_metadata(destination) {
        let source_meta = fs::symlink_metadata(source)?;
        if !same_file(&source_meta, &dest_meta) {
            return Err(destination_exists());
        }
    }

    let temp = free_temp_path(destination)?;
    fs::rename(source, &temp)?;

    if let Err(e) = fs::rename(&temp, destination) {
        // Put the file back under its old name
        let _ = fs::rename(&temp, source);
        return Err(e);
    }
    Ok(())
}

#[cfg(unix)]
fn same_file(a: &fs::Metadata, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

// Without inode numbers, a hit on the destination during a case-only rename
// is taken to be the source seen through a case-insensitive lookup.
#[cfg(not(unix))]
fn same_file(_a: &fs::Metadata, _b: &fs::Metadata) -> bool {
    true
}

/// First `<destination>.<pid>.<n>.tmp` name that does not exist yet
fn free_temp_path(destination: &Path) -> io::Result<PathBuf> {
    const MAX_ATTEMPTS: u32 = 1000;

    for attempt in 0..MAX_ATTEMPTS {
        let mut temp = destination.as_os_str().to_owned();
        temp.push(format!(".{}.{}.tmp", std::process::id(), attempt));
        let temp = PathBuf::from(temp);
        if fs::symlink_metadata(&temp).is_err() {
            return Ok(temp);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        "no free temporary name for case-only rename",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn make_plans(dir: &Path, count: usize) -> Vec<RenamePlan> {
        (1..=count)
            .map(|i| {
                let old = dir.join(format!("Comic {}.cbz", i));
                File::create(&old).unwrap();
                RenamePlan::new(old, dir.join(format!("comic-{:03}.cbz", i))).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_execute_renames_all() {
        let dir = TempDir::new().unwrap();
        let plans = make_plans(dir.path(), 25);

        let report = execute(&plans, 4, |_, _| {}).unwrap();
        assert_eq!(report.renamed, 25);
        assert!(report.is_success());

        for plan in &plans {
            assert!(!plan.source_path().exists());
            assert!(plan.destination_path().exists());
        }
    }

    #[test]
    fn test_execute_count_independent_of_jobs() {
        for jobs in [1, 2, 8] {
            let dir = TempDir::new().unwrap();
            let plans = make_plans(dir.path(), 10);
            let report = execute(&plans, jobs, |_, _| {}).unwrap();
            assert_eq!(report.renamed, 10, "jobs = {}", jobs);
        }
    }

    #[test]
    fn test_execute_zero_jobs_uses_one_worker() {
        let dir = TempDir::new().unwrap();
        let plans = make_plans(dir.path(), 3);
        let report = execute(&plans, 0, |_, _| {}).unwrap();
        assert_eq!(report.renamed, 3);
    }

    #[test]
    fn test_execute_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let mut plans = make_plans(dir.path(), 4);

        // Source that does not exist
        plans.insert(
            1,
            RenamePlan::new(dir.path().join("Ghost 9.cbz"), dir.path().join("ghost-009.cbz"))
                .unwrap(),
        );

        let report = execute(&plans, 2, |_, _| {}).unwrap();
        assert_eq!(report.renamed, 4);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].source_name, "Ghost 9.cbz");
        assert!(!report.is_success());
    }

    #[test]
    fn test_execute_errors_in_plan_order() {
        let dir = TempDir::new().unwrap();
        let plans: Vec<_> = (1..=6)
            .map(|i| {
                RenamePlan::new(
                    dir.path().join(format!("Missing {}.cbz", i)),
                    dir.path().join(format!("missing-0{}.cbz", i)),
                )
                .unwrap()
            })
            .collect();

        let report = execute(&plans, 3, |_, _| {}).unwrap();
        let names: Vec<_> = report.errors.iter().map(|e| e.source_name.clone()).collect();
        let expected: Vec<_> = (1..=6).map(|i| format!("Missing {}.cbz", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_execute_reports_every_result() {
        let dir = TempDir::new().unwrap();
        let plans = make_plans(dir.path(), 7);
        let seen = AtomicUsize::new(0);

        execute(&plans, 3, |_, result| {
            assert!(result.is_ok());
            seen.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(seen.into_inner(), 7);
    }

    #[test]
    fn test_rename_file_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("Comic 01.cbz");
        let new = dir.path().join("comic-01.cbz");
        fs::write(&old, b"old").unwrap();
        fs::write(&new, b"keep me").unwrap();

        let plan = RenamePlan::new(old.clone(), new.clone()).unwrap();
        let err = rename_file(&plan).unwrap_err();
        assert_eq!(err.cause.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&new).unwrap(), b"keep me");
        assert!(old.exists());
    }

    #[test]
    fn test_rename_file_case_only() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("Comic-01.cbz");
        let new = dir.path().join("comic-01.cbz");
        fs::write(&old, b"data").unwrap();

        let plan = RenamePlan::new(old, new.clone()).unwrap();
        rename_file(&plan).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["comic-01.cbz"]);
        assert_eq!(fs::read(&new).unwrap(), b"data");
    }

    #[test]
    fn test_rename_file_case_only_keeps_tmp_lookalike() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("Comic-01.cbz");
        let new = dir.path().join("comic-01.cbz");
        let lookalike = dir.path().join("comic-01.cbz.tmp");
        fs::write(&old, b"data").unwrap();
        fs::write(&lookalike, b"precious").unwrap();

        let plan = RenamePlan::new(old, new.clone()).unwrap();
        rename_file(&plan).unwrap();

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["comic-01.cbz", "comic-01.cbz.tmp"]);
        assert_eq!(fs::read(&lookalike).unwrap(), b"precious");
        assert_eq!(fs::read(&new).unwrap(), b"data");
    }

    // Needs a case-sensitive filesystem to hold both names at once
    #[cfg(target_os = "linux")]
    #[test]
    fn test_rename_file_case_only_refuses_other_file() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("Comic-01.cbz");
        let new = dir.path().join("comic-01.cbz");
        fs::write(&old, b"new").unwrap();
        fs::write(&new, b"keep me").unwrap();

        let plan = RenamePlan::new(old.clone(), new.clone()).unwrap();
        let err = rename_file(&plan).unwrap_err();
        assert_eq!(err.cause.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&new).unwrap(), b"keep me");
        assert_eq!(fs::read(&old).unwrap(), b"new");
    }

    #[test]
    fn test_free_temp_path_skips_taken_names() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("comic-01.cbz");
        let first = free_temp_path(&dest).unwrap();
        File::create(&first).unwrap();

        let second = free_temp_path(&dest).unwrap();
        assert_ne!(first, second);
        assert!(!second.exists());
    }
}
