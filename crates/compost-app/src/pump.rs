//! Background task that forwards scanned lines to the dispatch loop.

use thiserror::Error;
use tokio::{io::AsyncBufRead, sync::mpsc, task::JoinHandle};

use crate::{Backoff, CoordinationLock, Line, LineScanner, Scan, ScanError};

/// Reasons the input pump stops.
#[derive(Debug, Error)]
pub enum PumpError {
    /// The input stream failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The dispatch loop dropped its receiver.
    #[error("line channel closed")]
    ChannelClosed,
}

/// Drives a [`LineScanner`] and hands each line to the dispatch loop.
///
/// Every line is sent while holding the [`CoordinationLock`]. Channel
/// capacity is reserved before the lock is taken, so the lock is never held
/// across a wait on the dispatch loop.
#[derive(Debug)]
pub struct InputPump<R> {
    scanner: LineScanner<R>,
    lines: mpsc::Sender<Line>,
    lock: CoordinationLock,
    backoff: Backoff,
}

impl<R> InputPump<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Create a pump reading from `reader` and sending on `lines`.
    pub fn new(reader: R, lines: mpsc::Sender<Line>, lock: CoordinationLock) -> Self {
        Self { scanner: LineScanner::new(reader), lines, lock, backoff: Backoff::default() }
    }

    /// Replace the backoff used while no input is available.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Pump until the stream fails or the dispatch loop goes away.
    ///
    /// Lines are sent in scan order, exactly one send per line.
    pub async fn run(mut self) -> Result<(), PumpError> {
        loop {
            match self.scanner.next().await? {
                Scan::Line(line) => {
                    self.backoff.reset();
                    self.hand_off(line).await?;
                },
                Scan::Pending => self.backoff.wait().await,
            }
        }
    }

    /// Run on a tokio task. The terminal error is logged before it is
    /// returned through the handle.
    pub fn spawn(self) -> JoinHandle<Result<(), PumpError>>
    where
        R: Send + 'static,
    {
        tokio::spawn(async move {
            let result = self.run().await;
            if let Err(e) = &result {
                tracing::error!(component = "input_pump", error = %e, "input pump stopped");
            }
            result
        })
    }

    async fn hand_off(&mut self, line: Line) -> Result<(), PumpError> {
        let permit = self.lines.reserve().await.map_err(|_| PumpError::ChannelClosed)?;

        let _guard = self.lock.acquire("input_pump").await;
        tracing::debug!(component = "input_pump", len = line.as_str().len(), "scanned line");
        permit.send(line);

        Ok(())
    }
}
