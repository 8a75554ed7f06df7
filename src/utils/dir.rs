use std::{env, io, path::PathBuf};

use anyhow::{anyhow, Result};

const APPLICATION_DIR: &str = "verkounter";

/// Home directory of the current user.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    let home = env::var("USERPROFILE");
    #[cfg(not(windows))]
    let home = env::var("HOME");

    home.map(PathBuf::from)
        .map_err(|_| anyhow!("Couldn't determine the home directory"))
}

/// Returns the directory statistics are stored in. An explicitly provided directory wins,
/// otherwise $XDG_DATA_HOME/verkounter or $HOME/.local/share/verkounter is used (%APPDATA% on
/// Windows). The directory is created if it doesn't exist yet.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => default_data_dir()?,
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

fn default_data_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let mut path = env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| anyhow!("APPDATA should be present on Windows"))?;
        path.push(APPLICATION_DIR);
        Ok(path)
    }
    #[cfg(not(windows))]
    {
        let mut path = match env::var("XDG_DATA_HOME") {
            Ok(v) if !v.is_empty() => PathBuf::from(v),
            _ => home_dir()?.join(".local/share"),
        };
        path.push(APPLICATION_DIR);
        Ok(path)
    }
}
