//! Connection handles and the [`Connector`] seam.

use std::future::Future;

use thiserror::Error;
use tokio::{sync::mpsc, task::AbortHandle};

use crate::{CommandSender, InboundEvent};

/// Network errors.
#[derive(Debug, Error)]
pub enum NetError {
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The other end of a channel is gone.
    #[error("connection closed")]
    Closed,
}

/// Everything needed to open a connection to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Hostname or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Whether TLS was requested.
    pub use_tls: bool,
    /// Nickname.
    pub nick: String,
    /// Username (ident).
    pub username: String,
    /// Display name.
    pub realname: String,
}

/// Stops a running connection task.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    abort_handle: AbortHandle,
}

impl ConnectionHandle {
    /// Wrap the abort handle of a spawned connection task.
    pub fn new(abort_handle: AbortHandle) -> Self {
        Self { abort_handle }
    }

    /// Close the connection.
    pub fn close(&self) {
        self.abort_handle.abort();
    }

    /// Whether the connection task has stopped, closed or not.
    pub fn is_closed(&self) -> bool {
        self.abort_handle.is_finished()
    }
}

/// An established connection.
///
/// `events` is the subscription the dispatch loop drains; `commands` and
/// `handle` are cloneable so other tasks can issue intents or close it.
#[derive(Debug)]
pub struct Connection {
    /// Inbound events, in the order the server produced them.
    pub events: mpsc::Receiver<InboundEvent>,
    /// Outbound intents.
    pub commands: CommandSender,
    /// Close handle.
    pub handle: ConnectionHandle,
}

/// Opens connections to a server.
///
/// Implementations own the wire protocol. The connection task must emit an
/// [`crate::EventKind::Connected`] event once registration completes.
pub trait Connector: Send + Sync {
    /// Establish a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    fn connect(
        &self,
        params: &ConnectParams,
    ) -> impl Future<Output = Result<Connection, NetError>> + Send;
}
