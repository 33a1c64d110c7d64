//! Network collaborator seam for compost.
//!
//! The client core never speaks a wire protocol. It consumes a stream of
//! [`InboundEvent`] values and issues [`Command`] intents through a
//! [`CommandSender`]. A [`Connector`] produces both ends for a chosen server.
//!
//! [`SimConnector`] is an in-process simulated server: frames flow through
//! tokio channels instead of a socket, which keeps the client runnable and
//! deterministic to test.

#![forbid(unsafe_code)]

mod command;
mod connection;
mod event;
mod sim;

pub use command::{Command, CommandSender};
pub use connection::{ConnectParams, Connection, ConnectionHandle, Connector, NetError};
pub use event::{EventKind, InboundEvent};
pub use sim::SimConnector;
