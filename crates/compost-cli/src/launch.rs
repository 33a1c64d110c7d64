//! Startup: configuration, server selection and connection.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use compost_config::{ConfigError, SelectionError, default_candidates, load_first};
use compost_net::{ConnectParams, Connector, NetError};
use thiserror::Error;

use crate::Session;

/// Fatal startup errors. No connection is attempted after any of these
/// except [`LaunchError::Connect`] itself.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No candidate path held a valid configuration.
    #[error("Unable to find a valid configuration file.")]
    Config(#[source] ConfigError),

    /// The operator's server choice was invalid.
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The connection could not be established.
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        /// Server host.
        host: String,
        /// Server port.
        port: u16,
        /// Underlying error.
        #[source]
        source: NetError,
    },

    /// Writing the server listing failed.
    #[error("console write failed: {0}")]
    Output(#[from] io::Error),
}

impl LaunchError {
    /// The error and every underlying cause, joined with `": "`.
    ///
    /// For [`LaunchError::Config`] this includes each configuration path that
    /// was tried.
    pub fn chain(&self) -> String {
        let mut chain = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        chain
    }
}

/// Startup inputs that do not come from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Configuration paths, tried in order.
    pub candidates: Vec<PathBuf>,
    /// Server index given up front. When absent it is read from stdin.
    pub server_index: Option<String>,
}

impl LaunchOptions {
    /// Options from command-line flags. An explicit config path is tried
    /// before the default locations.
    pub fn from_flags(config: Option<PathBuf>, server_index: Option<String>) -> Self {
        let candidates = config.into_iter().chain(default_candidates()).collect();
        Self { candidates, server_index }
    }
}

/// Load the configuration, print the server list, resolve the operator's
/// choice and connect to it.
///
/// `input` is only read when no server index was given up front; exactly one
/// line is consumed.
pub async fn launch<C, R, W>(
    options: &LaunchOptions,
    input: R,
    out: &mut W,
    connector: &C,
) -> Result<Session, LaunchError>
where
    C: Connector,
    R: BufRead,
    W: Write,
{
    let (config, path) = load_first(options.candidates.iter().cloned()).map_err(LaunchError::Config)?;
    tracing::debug!(path = %path.display(), "using config");

    for line in config.listing() {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    let server = match &options.server_index {
        Some(index) => config.select(index)?,
        None => config.read_selection(input)?,
    }
    .clone();

    writeln!(out, "Starting compost...")?;
    out.flush()?;

    let params = ConnectParams {
        host: server.host.clone(),
        port: server.port,
        use_tls: server.use_tls,
        nick: config.nick.clone(),
        username: config.username.clone(),
        realname: config.realname.clone(),
    };

    tracing::info!(host = %params.host, port = params.port, "connecting to server");
    let connection = connector.connect(&params).await.map_err(|source| LaunchError::Connect {
        host: params.host.clone(),
        port: params.port,
        source,
    })?;

    Ok(Session::new(server, connection))
}
