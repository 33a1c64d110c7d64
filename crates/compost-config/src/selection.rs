//! Operator server selection.

use std::io::BufRead;

use crate::{Config, SelectionError, Server};

impl Config {
    /// Resolve an operator-entered index to a server.
    ///
    /// Surrounding whitespace is ignored. Anything that is not an integer in
    /// `0..servers.len()` is rejected.
    pub fn select(&self, input: &str) -> Result<&Server, SelectionError> {
        let trimmed = input.trim();
        let index: i64 =
            trimmed.parse().map_err(|_| SelectionError::NotANumber(trimmed.to_string()))?;

        usize::try_from(index)
            .ok()
            .and_then(|i| self.servers.get(i))
            .ok_or(SelectionError::OutOfRange { index, count: self.servers.len() })
    }

    /// Read a single line from `reader` and resolve it with [`Config::select`].
    ///
    /// Only one line is consumed so the rest of the stream stays available to
    /// the input pump.
    pub fn read_selection<R: BufRead>(&self, mut reader: R) -> Result<&Server, SelectionError> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        self.select(&line)
    }
}
