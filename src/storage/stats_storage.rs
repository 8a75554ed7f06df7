use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{error::StatsError, utils::name::sanitize_name};

use super::entities::{sum_counts, DayEntry, ProjectCounts, Scope, TimeSeriesDocument};

pub const GLOBAL_STATS_FILE: &str = "verkount_stats.yaml";
pub const SERIES_DIR: &str = "series";
const SERIES_FILE_SUFFIX: &str = "_stats.yaml";

/// Result of a single [StatsStorage::write].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written {
        date: NaiveDate,
        total: u64,
        delta: i64,
    },
    /// Counts are identical to the latest entry, nothing was touched on disk.
    Unchanged { latest: NaiveDate },
}

/// Interface for abstracting storage of statistics documents.
pub trait StatsStorage {
    /// Reads the document of a scope. A missing global document is reported as
    /// [StatsError::NotFound], a missing series document is simply empty.
    fn load(&self, scope: &Scope) -> Result<TimeSeriesDocument, StatsError>;

    /// Records `results` as the state of `scope` on `as_of`.
    fn write(
        &self,
        scope: &Scope,
        results: &ProjectCounts,
        as_of: NaiveDate,
    ) -> Result<WriteOutcome, StatsError>;
}

impl<T: Deref> StatsStorage for T
where
    T::Target: StatsStorage,
{
    fn load(&self, scope: &Scope) -> Result<TimeSeriesDocument, StatsError> {
        self.deref().load(scope)
    }

    fn write(
        &self,
        scope: &Scope,
        results: &ProjectCounts,
        as_of: NaiveDate,
    ) -> Result<WriteOutcome, StatsError> {
        self.deref().write(scope, results, as_of)
    }
}

/// Writes every series document. Projects outside of a series (empty series name) are only part
/// of the global document and are ignored here. Series whose names sanitize to the same key share
/// one document and are written once. A failure of one series doesn't stop the others.
pub fn write_all_series<'a>(
    storage: &impl StatsStorage,
    series_results: impl IntoIterator<Item = (&'a String, &'a ProjectCounts)>,
    as_of: NaiveDate,
) -> Vec<(Scope, Result<WriteOutcome, StatsError>)> {
    let mut merged = BTreeMap::<String, ProjectCounts>::new();
    for (series, projects) in series_results {
        let series = sanitize_name(series);
        if series.is_empty() {
            debug!("Ignoring {} projects outside of a series", projects.len());
            continue;
        }
        merged
            .entry(series)
            .or_default()
            .extend(projects.iter().map(|(name, count)| (sanitize_name(name), *count)));
    }

    merged
        .into_iter()
        .map(|(series, projects)| {
            let scope = Scope::Series(series);
            let outcome = storage.write(&scope, &projects, as_of);
            (scope, outcome)
        })
        .collect()
}

/// The main realization of [StatsStorage]. Each scope lives in its own YAML file that is
/// rewritten as a whole on every change.
pub struct StatsStorageImpl {
    data_dir: PathBuf,
}

impl StatsStorageImpl {
    pub fn new(data_dir: PathBuf) -> Result<Self, StatsError> {
        fs::create_dir_all(&data_dir).map_err(|e| StatsError::io(&data_dir, e))?;

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn document_path(&self, scope: &Scope) -> PathBuf {
        match scope {
            Scope::Global => self.data_dir.join(GLOBAL_STATS_FILE),
            Scope::Series(name) => self
                .data_dir
                .join(SERIES_DIR)
                .join(format!("{}{SERIES_FILE_SUFFIX}", sanitize_name(name))),
        }
    }

    /// Loads a document that is about to be overwritten. Anything but an IO failure results in an
    /// empty document.
    fn load_for_write(&self, scope: &Scope) -> Result<TimeSeriesDocument, StatsError> {
        match read_document(&self.document_path(scope)) {
            Ok(v) => Ok(v),
            Err(StatsError::NotFound { .. }) => Ok(TimeSeriesDocument::new()),
            Err(e @ StatsError::Parse { .. }) => {
                warn!("Could not parse existing stats for {scope}, starting fresh: {e}");
                Ok(TimeSeriesDocument::new())
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self, path: &Path, document: &TimeSeriesDocument) -> Result<(), StatsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StatsError::io(parent, e))?;
        }
        let text = serde_yaml::to_string(document)?;
        fs::write(path, text).map_err(|e| StatsError::io(path, e))
    }
}

impl StatsStorage for StatsStorageImpl {
    fn load(&self, scope: &Scope) -> Result<TimeSeriesDocument, StatsError> {
        match read_document(&self.document_path(scope)) {
            Err(StatsError::NotFound { .. }) if matches!(scope, Scope::Series(_)) => {
                Ok(TimeSeriesDocument::new())
            }
            result => result,
        }
    }

    fn write(
        &self,
        scope: &Scope,
        results: &ProjectCounts,
        as_of: NaiveDate,
    ) -> Result<WriteOutcome, StatsError> {
        let path = self.document_path(scope);
        let mut document = self.load_for_write(scope)?;
        let total = sum_counts(results);

        if let Some((latest, recent)) = document.most_recent() {
            if recent.same_counts(results, total) {
                info!("No changes in word counts for {scope}, skipping update");
                return Ok(WriteOutcome::Unchanged { latest });
            }
        }

        // Rewriting today's entry compares against the day before, not against itself.
        let delta = document
            .latest_before(as_of)
            .map(|(_, previous)| total as i64 - previous.total as i64)
            .unwrap_or(0);

        document.upsert(as_of, DayEntry::new(results.clone(), delta));
        self.persist(&path, &document)?;
        info!("Saved {scope} stats for {as_of} to {path:?}: total {total}, delta {delta}");

        Ok(WriteOutcome::Written {
            date: as_of,
            total,
            delta,
        })
    }
}

fn read_document(path: &Path) -> Result<TimeSeriesDocument, StatsError> {
    debug!("Reading {path:?}");
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(StatsError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(StatsError::io(path, e)),
    };

    if text.trim().is_empty() {
        return Ok(TimeSeriesDocument::new());
    }

    serde_yaml::from_str(&text).map_err(|source| StatsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
