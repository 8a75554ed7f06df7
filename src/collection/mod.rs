//! Produces word counts for the statistics storage. Marker folders are found by [scanner], their
//! markdown is read and counted by [counter] on a small pool of blocking workers.

pub mod counter;
pub mod scanner;

use std::collections::BTreeMap;

use anyhow::Result;
use futures::{stream, StreamExt};
use scanner::MarkerFolder;
use tracing::{debug, error};

use crate::{storage::entities::ProjectCounts, utils::name::sanitize_name};

/// Amount of folders processed at the same time.
pub const WORKER_COUNT: usize = 4;

#[derive(Debug)]
pub struct WorkResult {
    pub folder: MarkerFolder,
    pub word_count: Result<u64>,
}

/// Counts words of every folder. Returns only after every folder was processed, in no particular
/// order.
pub async fn count_folders(folders: Vec<MarkerFolder>) -> Vec<WorkResult> {
    stream::iter(folders)
        .map(|folder| async move {
            let path = folder.path.clone();
            let word_count = tokio::task::spawn_blocking(move || {
                counter::read_markdown_content(&path).map(|v| counter::count_words(&v))
            })
            .await
            .map_err(anyhow::Error::from)
            .and_then(|v| v);
            debug!("Counted {:?}: {:?}", folder.path, word_count);
            WorkResult { folder, word_count }
        })
        .buffer_unordered(WORKER_COUNT)
        .collect()
        .await
}

/// Word counts grouped the way they're stored.
#[derive(Debug, Default)]
pub struct ScanResults {
    /// Every project, keyed by its sanitized name.
    pub projects: ProjectCounts,
    /// Projects of each series, keyed by series and then by folder name.
    pub series: BTreeMap<String, ProjectCounts>,
    pub failures: Vec<(MarkerFolder, anyhow::Error)>,
}

impl ScanResults {
    pub fn aggregate(results: impl IntoIterator<Item = WorkResult>) -> Self {
        let mut aggregated = Self::default();
        for WorkResult { folder, word_count } in results {
            let count = match word_count {
                Ok(v) => v,
                Err(e) => {
                    error!("Error processing {:?}: {e:?}", folder.path);
                    aggregated.failures.push((folder, e));
                    continue;
                }
            };

            aggregated.projects.insert(sanitize_name(&folder.name), count);
            if !folder.series.is_empty() {
                aggregated
                    .series
                    .entry(folder.series)
                    .or_default()
                    .insert(folder.name, count);
            }
        }
        aggregated
    }

    pub fn total(&self) -> u64 {
        self.projects.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::{anyhow, Result};
    use tempfile::tempdir;

    use super::{
        count_folders,
        scanner::{scan_for_marker_folders, MarkerFolder, MARKER_FILE},
        ScanResults, WorkResult,
    };

    #[tokio::test]
    async fn test_count_folders_processes_everything() -> Result<()> {
        let dir = tempdir()?;
        for index in 0..9 {
            let project = dir.path().join("Saga").join(format!("Book {index}"));
            fs::create_dir_all(&project)?;
            fs::write(project.join(MARKER_FILE), "")?;
            fs::write(project.join("text.md"), "x".repeat(60))?;
        }

        let results = count_folders(scan_for_marker_folders(dir.path())).await;

        assert_eq!(results.len(), 9);
        let aggregated = ScanResults::aggregate(results);
        assert!(aggregated.failures.is_empty());
        assert_eq!(aggregated.total(), 90);
        assert_eq!(aggregated.series["Saga"].len(), 9);
        assert_eq!(aggregated.projects.get("Book-3"), Some(&10));
        Ok(())
    }

    #[test]
    fn test_aggregate_keeps_failures_apart() {
        let folder = |name: &str, series: &str| MarkerFolder {
            path: name.into(),
            name: name.to_string(),
            series: series.to_string(),
        };

        let aggregated = ScanResults::aggregate([
            WorkResult {
                folder: folder("Loose Notes", ""),
                word_count: Ok(5),
            },
            WorkResult {
                folder: folder("Book One", "Saga"),
                word_count: Ok(100),
            },
            WorkResult {
                folder: folder("Broken", "Saga"),
                word_count: Err(anyhow!("permission denied")),
            },
        ]);

        assert_eq!(aggregated.projects.len(), 2);
        assert_eq!(aggregated.projects.get("Loose-Notes"), Some(&5));
        assert_eq!(aggregated.series.len(), 1);
        assert_eq!(aggregated.series["Saga"].get("Book One"), Some(&100));
        assert_eq!(aggregated.failures.len(), 1);
    }
}
