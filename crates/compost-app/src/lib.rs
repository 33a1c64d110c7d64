//! Input pumping and event dispatch for compost.
//!
//! Two concurrent tasks share one terminal:
//!
//! - [`InputPump`] drives a [`LineScanner`] over raw terminal bytes and hands
//!   each completed [`Line`] to the dispatch loop.
//! - [`EventDispatchLoop`] waits fairly on inbound network events and
//!   completed lines, and prints each under the [`CoordinationLock`].
//!
//! The lock is created once by the composition root and cloned into both
//! tasks; it also owns the [`Console`] so every terminal write is serialized.

#![forbid(unsafe_code)]

mod backoff;
mod console;
mod dispatch;
mod pump;
mod scanner;

pub use backoff::Backoff;
pub use console::{Console, ConsoleGuard, CoordinationLock};
#[cfg(test)]
pub(crate) use console::SharedBuffer;
pub use dispatch::{DispatchError, EventDispatchLoop, Incoming};
pub use pump::{InputPump, PumpError};
pub use scanner::{Line, LineScanner, Scan, ScanError};
