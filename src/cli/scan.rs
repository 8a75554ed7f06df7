use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::{
    collection::{
        count_folders,
        scanner::{scan_for_marker_folders, MARKER_FILE},
        ScanResults,
    },
    error::StatsError,
    storage::{
        entities::Scope,
        migration::{migrate_global, migrate_series},
        stats_storage::{write_all_series, StatsStorage, StatsStorageImpl, WriteOutcome},
    },
    utils::{clock::Clock, dir::home_dir},
};

/// Turns the directory argument into an absolute path. Supports ".", "..", "~/" and paths
/// relative to the current directory. Without an argument ~/Documents is scanned.
pub fn resolve_scan_path(argument: Option<&str>) -> Result<PathBuf> {
    let path = match argument {
        None => home_dir()?.join("Documents"),
        Some(".") => env::current_dir()?,
        Some("..") => {
            let current = env::current_dir()?;
            current.parent().map(Path::to_path_buf).unwrap_or(current)
        }
        Some(v) if v.starts_with("~/") => home_dir()?.join(&v[2..]),
        Some(v) if Path::new(v).is_absolute() => PathBuf::from(v),
        Some(v) => env::current_dir()?.join(v),
    };

    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }
    Ok(path)
}

/// Command to process a scan. Counts words of every project below `scan_path` and records them
/// for today. Old statistics found in `legacy_dir` are moved into the storage first.
pub async fn process_scan_command(
    storage: &StatsStorageImpl,
    scan_path: &Path,
    legacy_dir: Option<&Path>,
    clock: &dyn Clock,
) -> Result<()> {
    println!("Scanning {} for {MARKER_FILE} folders...", scan_path.display());
    let root = scan_path.to_path_buf();
    let folders = tokio::task::spawn_blocking(move || scan_for_marker_folders(&root)).await?;

    if folders.is_empty() {
        println!("No folders with {MARKER_FILE} files found.");
        return Ok(());
    }
    println!("Found {} folders to process", folders.len());

    let results = ScanResults::aggregate(count_folders(folders).await);
    for (name, count) in &results.projects {
        println!("  {name}: {count} words");
    }
    for (folder, e) in &results.failures {
        println!("Error processing {}: {e}", folder.name);
    }

    if results.projects.is_empty() {
        println!("No results to save.");
        return Ok(());
    }

    let outcomes = save_results(storage, scan_path, legacy_dir, &results, clock.today());
    let failed_scopes = report_outcomes(&outcomes);

    if global_written(&outcomes) {
        println!(
            "\nStats saved to {}",
            storage.document_path(&Scope::Global).display()
        );
    }
    println!("Total words: {}", results.total());
    if !results.failures.is_empty() {
        println!("Errors encountered: {}", results.failures.len());
    }

    if failed_scopes > 0 {
        bail!("Failed to save statistics for {failed_scopes} scope(s)");
    }
    Ok(())
}

type ScopeOutcome = (Scope, Result<WriteOutcome, StatsError>);

/// Writes the global document and every series document. Every scope is attempted, the global
/// document comes first.
fn save_results(
    storage: &StatsStorageImpl,
    scan_path: &Path,
    legacy_dir: Option<&Path>,
    results: &ScanResults,
    today: NaiveDate,
) -> Vec<ScopeOutcome> {
    if let Some(legacy_dir) = legacy_dir {
        if let Err(e) = migrate_global(storage, legacy_dir) {
            warn!("Could not migrate old stats: {e}");
        }
        // Series used to be stored inside the scanned folders, which only ever were ~/Documents.
        if legacy_dir == scan_path {
            for series in results.series.keys() {
                if let Err(e) = migrate_series(storage, legacy_dir, series) {
                    warn!("Could not migrate series stats for {series}: {e}");
                }
            }
        }
    }

    let mut outcomes = vec![(
        Scope::Global,
        storage.write(&Scope::Global, &results.projects, today),
    )];
    outcomes.extend(write_all_series(storage, &results.series, today));
    outcomes
}

/// Prints the outcome of every scope, returns the number of scopes that failed.
fn report_outcomes(outcomes: &[ScopeOutcome]) -> usize {
    let mut failed = 0;
    for (scope, outcome) in outcomes {
        match outcome {
            Ok(WriteOutcome::Written { total, delta, .. }) => {
                info!("Wrote {scope} stats");
                println!("Saved {scope} stats: {total} words ({delta:+} since last entry)");
            }
            Ok(WriteOutcome::Unchanged { latest }) => {
                println!("No changes in word counts for {scope} since {latest} - skipping update");
            }
            Err(e) => {
                error!("Failed to write {scope} stats: {e:?}");
                println!("Error writing {scope} stats: {e}");
                failed += 1;
            }
        }
    }
    failed
}

fn global_written(outcomes: &[ScopeOutcome]) -> bool {
    outcomes.iter().any(|(scope, outcome)| {
        *scope == Scope::Global && matches!(outcome, Ok(WriteOutcome::Written { .. }))
    })
}
