use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

/// File marking a folder as a tracked project.
pub const MARKER_FILE: &str = ".verkount";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFolder {
    pub path: PathBuf,
    pub name: String,
    /// Name of the folder directly below the scan root that contains this project. Empty if the
    /// scan root itself is the project.
    pub series: String,
}

/// Finds every folder below `root` (including `root`) containing a [MARKER_FILE]. Entries that
/// can't be read are skipped.
pub fn scan_for_marker_folders(root: &Path) -> Vec<MarkerFolder> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| {
            entry
                .inspect_err(|e| debug!("Skipping unreadable entry: {e}"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_dir() && entry.path().join(MARKER_FILE).exists())
        .map(|entry| {
            trace!("Found marker in {:?}", entry.path());
            MarkerFolder {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().into_owned(),
                series: series_name(entry.path(), root),
            }
        })
        .collect()
}

fn series_name(folder: &Path, root: &Path) -> String {
    folder
        .strip_prefix(root)
        .ok()
        .and_then(|relative| relative.components().next())
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{scan_for_marker_folders, MARKER_FILE};

    #[test]
    fn test_scan_detects_series() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        for project in ["Saga/Book One", "Saga/drafts/Book Two", "Standalone", "Unmarked"] {
            fs::create_dir_all(root.join(project))?;
        }
        for project in ["Saga/Book One", "Saga/drafts/Book Two", "Standalone"] {
            fs::write(root.join(project).join(MARKER_FILE), "")?;
        }

        let mut folders = scan_for_marker_folders(root)
            .into_iter()
            .map(|v| (v.name, v.series))
            .collect::<Vec<_>>();
        folders.sort();

        assert_eq!(
            folders,
            vec![
                ("Book One".to_string(), "Saga".to_string()),
                ("Book Two".to_string(), "Saga".to_string()),
                ("Standalone".to_string(), "Standalone".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_scan_root_marker_has_no_series() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(MARKER_FILE), "")?;

        let folders = scan_for_marker_folders(dir.path());

        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].series, "");
        Ok(())
    }
}
