//! Older versions kept their statistics next to the scanned documents. These helpers move such
//! files into the data directory the first time a scan runs.

use std::{fs, path::Path};

use tracing::{info, warn};

use crate::error::StatsError;

use super::{
    entities::Scope,
    stats_storage::{StatsStorageImpl, GLOBAL_STATS_FILE},
};

const LEGACY_SERIES_FILE: &str = "verkount_series_stats.yaml";

/// Moves `<documents>/verkount_stats.yaml` into the data directory, unless the data directory
/// already has a global document. Returns whether anything was moved.
pub fn migrate_global(
    storage: &StatsStorageImpl,
    documents_dir: &Path,
) -> Result<bool, StatsError> {
    let old_path = documents_dir.join(GLOBAL_STATS_FILE);
    let new_path = storage.document_path(&Scope::Global);
    if !old_path.is_file() || new_path.exists() {
        return Ok(false);
    }

    println!("Migrating stats from {old_path:?} to {new_path:?}");
    if let Err(e) = fs::rename(&old_path, &new_path) {
        // Renaming fails across devices.
        info!("Rename failed ({e}), copying {old_path:?} instead");
        fs::copy(&old_path, &new_path).map_err(|e| StatsError::io(&new_path, e))?;
        if let Err(e) = fs::remove_file(&old_path) {
            warn!("Could not remove old stats file {old_path:?}: {e}");
        }
    }
    Ok(true)
}

/// Moves `<documents>/<series>/verkount_series_stats.yaml` into the series directory, unless the
/// series already has a document there. Returns whether anything was moved.
pub fn migrate_series(
    storage: &StatsStorageImpl,
    documents_dir: &Path,
    series: &str,
) -> Result<bool, StatsError> {
    let old_path = documents_dir.join(series).join(LEGACY_SERIES_FILE);
    let new_path = storage.document_path(&Scope::Series(series.to_string()));
    if !old_path.is_file() || new_path.exists() {
        return Ok(false);
    }

    println!("Migrating series stats from {old_path:?} to {new_path:?}");
    if let Some(parent) = new_path.parent() {
        fs::create_dir_all(parent).map_err(|e| StatsError::io(parent, e))?;
    }
    fs::copy(&old_path, &new_path).map_err(|e| StatsError::io(&new_path, e))?;
    if let Err(e) = fs::remove_file(&old_path) {
        warn!("Could not remove old series stats file {old_path:?}: {e}");
    }
    Ok(true)
}
