//! Compost chat client
//!
//! A thin shell over [`compost_app`] that wires the terminal, the chosen
//! server connection and the shutdown signal together. All input scanning
//! and dispatch logic lives in the library crates.
//!
//! Startup runs in two phases:
//! - [`launch`]: load config, list servers, read the selection, connect
//! - [`Session::run`]: spawn the input pump and drive the dispatch loop until
//!   shutdown

#![forbid(unsafe_code)]

mod launch;
mod session;
pub mod shutdown;

pub use launch::{LaunchError, LaunchOptions, launch};
pub use session::{Session, SessionError};
