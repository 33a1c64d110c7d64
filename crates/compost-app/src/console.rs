//! Shared terminal output and the lock that serializes it.

use std::{
    fmt,
    io::{self, Write},
    ops::{Deref, DerefMut},
    sync::Arc,
};

use tokio::sync::{Mutex as AsyncMutex, MutexGuard};

/// The terminal output surface.
pub struct Console {
    out: Box<dyn Write + Send>,
}

impl Console {
    /// Console writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Console writing to `out`.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Write one line and flush.
    pub fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// The single mutual-exclusion primitive shared by the input pump and the
/// dispatch loop.
///
/// Guards the [`Console`] so that a held guard is the only way to write to
/// the terminal. Release happens when the [`ConsoleGuard`] drops, so every
/// acquire is matched by exactly one release on every exit path.
#[derive(Debug, Clone)]
pub struct CoordinationLock {
    console: Arc<AsyncMutex<Console>>,
}

impl CoordinationLock {
    /// Take ownership of `console`.
    pub fn new(console: Console) -> Self {
        Self { console: Arc::new(AsyncMutex::new(console)) }
    }

    /// Wait for the lock. `holder` names the task in logs.
    pub async fn acquire(&self, holder: &'static str) -> ConsoleGuard<'_> {
        let guard = self.console.lock().await;
        tracing::debug!(component = holder, "took coordination lock");
        ConsoleGuard { guard, holder }
    }

    /// Take the lock only if it is free right now.
    #[cfg(test)]
    pub(crate) fn try_acquire(&self, holder: &'static str) -> Option<ConsoleGuard<'_>> {
        let guard = self.console.try_lock().ok()?;
        tracing::debug!(component = holder, "took coordination lock");
        Some(ConsoleGuard { guard, holder })
    }
}

/// Exclusive access to the [`Console`]. Releases the lock on drop.
pub struct ConsoleGuard<'a> {
    guard: MutexGuard<'a, Console>,
    holder: &'static str,
}

impl Deref for ConsoleGuard<'_> {
    type Target = Console;

    fn deref(&self) -> &Console {
        &self.guard
    }
}

impl DerefMut for ConsoleGuard<'_> {
    fn deref_mut(&mut self) -> &mut Console {
        &mut self.guard
    }
}

impl Drop for ConsoleGuard<'_> {
    fn drop(&mut self) {
        tracing::debug!(component = self.holder, "released coordination lock");
    }
}

/// In-memory, cloneable output surface.
///
/// Every clone appends to the same buffer, so a [`Console`] built on one
/// clone can be inspected through another.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer {
    bytes: Arc<std::sync::Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl SharedBuffer {
    /// Create an empty buffer.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub(crate) fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Written lines, without terminators.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap_or_else(std::sync::PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
