//! In-process simulated server.
//!
//! Runs a tiny server loop in a tokio task and exchanges events and commands
//! over mpsc channels. No network and no wire protocol.

use tokio::sync::mpsc;

use crate::{
    Command, CommandSender, ConnectParams, Connection, ConnectionHandle, Connector, InboundEvent,
    NetError,
};

const CHANNEL_CAPACITY: usize = 32;

/// [`Connector`] backed by an in-process simulated server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimConnector;

impl SimConnector {
    /// Create a connector.
    pub fn new() -> Self {
        Self
    }
}

impl Connector for SimConnector {
    async fn connect(&self, params: &ConnectParams) -> Result<Connection, NetError> {
        let (commands, command_rx) = CommandSender::channel(CHANNEL_CAPACITY);
        let (event_tx, events) = mpsc::channel(CHANNEL_CAPACITY);

        if params.use_tls {
            tracing::warn!(
                component = "sim_server",
                host = %params.host,
                "TLS requested but the simulated server is plaintext"
            );
        }

        let params = params.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = run_server(&params, command_rx, event_tx).await {
                tracing::warn!(component = "sim_server", error = %e, "simulated server stopped");
            }
        });

        Ok(Connection { events, commands, handle: ConnectionHandle::new(handle.abort_handle()) })
    }
}

/// Serve one client until it quits or stops listening.
async fn run_server(
    params: &ConnectParams,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<InboundEvent>,
) -> Result<(), NetError> {
    let server = params.host.as_str();
    let nick = params.nick.as_str();

    tracing::info!(component = "sim_server", host = server, port = params.port, nick, "client registered");
    emit(&events, InboundEvent::connected(server)).await?;

    while let Some(command) = commands.recv().await {
        tracing::trace!(component = "sim_server", ?command, "command received");

        match command {
            Command::Join(channels) => {
                for channel in channels {
                    emit(&events, InboundEvent::join(nick, channel.as_str())).await?;
                    emit(
                        &events,
                        InboundEvent::notice(server, channel.as_str(), format!("Now talking on {channel}")),
                    )
                    .await?;
                }
            },
            Command::Privmsg { target, text } => {
                emit(&events, InboundEvent::message(nick, target, text)).await?;
            },
            Command::Quit => {
                tracing::info!(component = "sim_server", nick, "client quit");
                break;
            },
        }
    }

    Ok(())
}

async fn emit(events: &mpsc::Sender<InboundEvent>, event: InboundEvent) -> Result<(), NetError> {
    events.send(event).await.map_err(|_| NetError::Closed)
}
