//! Configuration for the compost chat client.
//!
//! A [`Config`] carries the operator identity (nick, username, realname) and an
//! ordered list of [`Server`] descriptors. It is loaded once at startup from
//! the first readable candidate path and is immutable afterwards.
//!
//! # Components
//!
//! - [`Config`] / [`Server`]: the data model, decoded from TOML
//! - [`load_first`]: tries each candidate path in order
//! - [`Config::select`]: resolves an operator-supplied index to a server

#![forbid(unsafe_code)]

mod error;
mod loader;
mod model;
mod selection;

pub use error::{ConfigError, SelectionError};
pub use loader::{CONFIG_FILE_NAME, default_candidates, load_first, load_path};
pub use model::{Config, Server};
