//! The foreground event dispatch loop.
//!
//! Waits on two sources at once (inbound network events and completed input
//! lines) and performs the side effect for whichever is ready. The loop never
//! busy-polls: each iteration suspends in a single `tokio::select!` until one
//! source has data.
//!
//! Fairness is strict rather than probabilistic. The source polled first
//! alternates every iteration, so while both are ready their items are
//! dispatched alternately and neither can starve the other.

use std::io;

use compost_net::{CommandSender, EventKind, InboundEvent};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{CoordinationLock, Line};

/// Errors that stop the dispatch loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Writing to the console failed.
    #[error("console write failed: {0}")]
    Output(#[from] io::Error),
}

/// One unit of work selected by the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// An inbound network event.
    Event(InboundEvent),
    /// A completed input line.
    Line(Line),
    /// The network collaborator dropped its sender.
    EventsClosed,
    /// The input pump dropped its sender.
    LinesClosed,
}

/// Foreground control loop multiplexing network events and input lines.
#[derive(Debug)]
pub struct EventDispatchLoop {
    events: Option<mpsc::Receiver<InboundEvent>>,
    lines: Option<mpsc::Receiver<Line>>,
    lock: CoordinationLock,
    commands: CommandSender,
    autojoin: Vec<String>,
    lines_first: bool,
}

impl EventDispatchLoop {
    /// Create a loop draining `events` and `lines`, printing under `lock`.
    ///
    /// `commands` is used to join channels once the connection reports
    /// [`EventKind::Connected`].
    pub fn new(
        events: mpsc::Receiver<InboundEvent>,
        lines: mpsc::Receiver<Line>,
        lock: CoordinationLock,
        commands: CommandSender,
    ) -> Self {
        Self {
            events: Some(events),
            lines: Some(lines),
            lock,
            commands,
            autojoin: Vec::new(),
            lines_first: false,
        }
    }

    /// Channels to join on [`EventKind::Connected`].
    #[must_use]
    pub fn with_autojoin(mut self, channels: Vec<String>) -> Self {
        self.autojoin = channels;
        self
    }

    /// Run until both sources are closed.
    ///
    /// In normal operation neither source closes and the loop only ends with
    /// the process. A closed source is logged and no longer polled.
    pub async fn run(mut self) -> Result<(), DispatchError> {
        while let Some(incoming) = self.next_incoming().await {
            self.dispatch(incoming).await?;
        }

        tracing::warn!(component = "dispatch", "all sources closed, dispatch loop exiting");
        Ok(())
    }

    /// Wait for the next unit of work, or `None` once both sources are gone.
    pub async fn next_incoming(&mut self) -> Option<Incoming> {
        if self.events.is_none() && self.lines.is_none() {
            return None;
        }

        let lines_first = self.lines_first;
        self.lines_first = !lines_first;

        let events = self.events.as_mut();
        let lines = self.lines.as_mut();

        let incoming = if lines_first {
            tokio::select! {
                biased;
                line = recv(lines) => line.map_or(Incoming::LinesClosed, Incoming::Line),
                event = recv(events) => event.map_or(Incoming::EventsClosed, Incoming::Event),
            }
        } else {
            tokio::select! {
                biased;
                event = recv(events) => event.map_or(Incoming::EventsClosed, Incoming::Event),
                line = recv(lines) => line.map_or(Incoming::LinesClosed, Incoming::Line),
            }
        };

        Some(incoming)
    }

    /// Perform the side effect for one unit of work.
    pub async fn dispatch(&mut self, incoming: Incoming) -> Result<(), DispatchError> {
        match incoming {
            Incoming::Event(event) => self.handle_event(event).await,
            Incoming::Line(line) => self.submit_line(&line).await,
            Incoming::EventsClosed => {
                tracing::warn!(component = "dispatch", "connection closed, no further events");
                self.events = None;
                Ok(())
            },
            Incoming::LinesClosed => {
                tracing::error!(component = "dispatch", "terminal input stopped, no further lines");
                self.lines = None;
                Ok(())
            },
        }
    }

    async fn handle_event(&self, event: InboundEvent) -> Result<(), DispatchError> {
        match event.kind {
            EventKind::Connected => {
                self.print(&format!("JOINing: [{}]", self.autojoin.join(" "))).await?;
                if let Err(e) = self.commands.join(&self.autojoin).await {
                    tracing::warn!(component = "dispatch", error = %e, "failed to request autojoin");
                }
            },
            EventKind::Notice | EventKind::PrivateMessage => match event.text() {
                Some(text) => self.print(&format!("<{}> {}", event.source, text)).await?,
                None => {
                    tracing::warn!(component = "dispatch", source = %event.source, "message without text");
                },
            },
            EventKind::Join | EventKind::Other(_) => {
                tracing::debug!(component = "dispatch", ?event, "unhandled event");
            },
        }
        Ok(())
    }

    /// Local echo of operator input.
    ///
    /// Sending the line to the network is deliberately not wired: the target
    /// (joined channel or last speaker) is undecided.
    async fn submit_line(&self, line: &Line) -> Result<(), DispatchError> {
        self.print(&format!("INPUT={line}")).await
    }

    async fn print(&self, text: &str) -> Result<(), DispatchError> {
        let mut console = self.lock.acquire("dispatch").await;
        console.print_line(text)?;
        Ok(())
    }
}

async fn recv<T>(rx: Option<&mut mpsc::Receiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
