//! Configuration and selection errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while locating or decoding a configuration file.
///
/// `Read` and `Parse` are per-candidate failures; the loader logs them and
/// moves on. Only `NotFound` is fatal to the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Candidate path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a valid configuration.
    #[error("invalid config at {path}: {source}")]
    Parse {
        /// Candidate path.
        path: PathBuf,
        /// TOML decode error.
        #[source]
        source: toml::de::Error,
    },

    /// Every candidate path was missing or invalid.
    #[error("unable to find a valid configuration file (tried {})", display_paths(.tried))]
    NotFound {
        /// Paths attempted, in order.
        tried: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Errors raised while resolving the operator's server choice.
///
/// All variants are fatal: no connection is attempted.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The selection could not be read from the operator.
    #[error("failed to read server selection: {0}")]
    Read(#[from] io::Error),

    /// The input is not an integer.
    #[error("Invalid server index {0}")]
    NotANumber(String),

    /// The index does not name a configured server.
    #[error("Invalid server index {index}")]
    OutOfRange {
        /// Index as entered.
        index: i64,
        /// Number of configured servers.
        count: usize,
    },
}
