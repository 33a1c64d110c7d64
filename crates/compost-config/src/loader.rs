//! Candidate-path configuration loading.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

/// File name searched for in each candidate directory.
pub const CONFIG_FILE_NAME: &str = "compost.toml";

/// Default candidate paths, in priority order.
///
/// The user's config directory comes first, then the working directory.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    candidates.push(PathBuf::from(CONFIG_FILE_NAME));
    candidates
}

/// Load and decode a single configuration file.
///
/// A missing file is reported as [`ConfigError::Read`] with
/// [`io::ErrorKind::NotFound`].
pub fn load_path(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    Config::from_toml(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

/// Try each candidate in order and return the first valid configuration
/// together with the path it came from.
///
/// Per-candidate failures are logged and skipped. The call fails only once
/// every candidate has been exhausted.
pub fn load_first<I, P>(candidates: I) -> Result<(Config, PathBuf), ConfigError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut tried = Vec::new();

    for path in candidates.into_iter().map(Into::into) {
        tracing::debug!(component = "config", path = %path.display(), "trying config path");

        match load_path(&path) {
            Ok(config) => {
                tracing::info!(
                    component = "config",
                    path = %path.display(),
                    servers = config.servers.len(),
                    "loaded config file"
                );
                return Ok((config, path));
            },
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(component = "config", path = %path.display(), "config file not found");
            },
            Err(err) => {
                tracing::warn!(component = "config", error = %err, "failed to load config file");
            },
        }

        tried.push(path);
    }

    Err(ConfigError::NotFound { tried })
}
