//! Composition root for a connected session.
//!
//! Owns the single [`CoordinationLock`] and hands clones to the input pump,
//! the dispatch loop and the shutdown task.

use std::{future::Future, time::Duration};

use compost_app::{Console, CoordinationLock, DispatchError, EventDispatchLoop, InputPump};
use compost_config::Server;
use compost_net::Connection;
use thiserror::Error;
use tokio::{io::AsyncBufRead, sync::mpsc};

const LINE_CHANNEL_CAPACITY: usize = 32;

/// How long shutdown waits for the quit request to be accepted.
const QUIT_GRACE: Duration = Duration::from_secs(1);

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The dispatch loop stopped on an error.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// A live connection to the selected server.
#[derive(Debug)]
pub struct Session {
    server: Server,
    connection: Connection,
}

impl Session {
    /// Wrap an established connection.
    pub fn new(server: Server, connection: Connection) -> Self {
        Self { server, connection }
    }

    /// The selected server.
    pub fn server(&self) -> &Server {
        &self.server
    }

    /// Pump `input`, dispatch events and lines to `console`, and return once
    /// `shutdown` resolves (or both sources have closed).
    ///
    /// On shutdown the connection is asked to quit and then closed.
    pub async fn run<R, F>(self, input: R, console: Console, shutdown: F) -> Result<(), SessionError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        F: Future<Output = ()> + Send + 'static,
    {
        let Self { server, connection } = self;
        let Connection { events, commands, handle } = connection;

        let lock = CoordinationLock::new(console);
        let (line_tx, line_rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
        let pump = InputPump::new(input, line_tx, lock.clone()).spawn();

        let shutdown_lock = lock.clone();
        let shutdown_commands = commands.clone();
        let shutdown_handle = handle.clone();
        let shutdown_task = tokio::spawn(async move {
            shutdown.await;
            tracing::info!("shutdown requested");

            if let Err(e) =
                shutdown_lock.acquire("shutdown").await.print_line("Received interrupt, shutting down...")
            {
                tracing::warn!(error = %e, "failed to print shutdown notice");
            }

            match tokio::time::timeout(QUIT_GRACE, shutdown_commands.quit()).await {
                Ok(Ok(())) => {},
                Ok(Err(e)) => tracing::debug!(error = %e, "connection already closed"),
                Err(_) => tracing::warn!("quit not accepted in time"),
            }
            shutdown_handle.close();
        });

        let dispatch =
            EventDispatchLoop::new(events, line_rx, lock, commands).with_autojoin(server.autojoin);

        let result = tokio::select! {
            result = dispatch.run() => result.map_err(SessionError::from),
            joined = shutdown_task => {
                if let Err(e) = joined {
                    tracing::error!(error = %e, "shutdown task failed");
                }
                Ok(())
            },
        };

        pump.abort();
        handle.close();
        result
    }
}
