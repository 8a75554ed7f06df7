use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading or writing statistics documents.
#[derive(Error, Debug)]
pub enum StatsError {
    /// No document has been persisted for the scope yet.
    #[error("no statistics found at {path:?}, run a scan first")]
    NotFound { path: PathBuf },

    /// The persisted document exists but can't be parsed.
    #[error("could not parse statistics file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not serialize statistics: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl StatsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }
}
