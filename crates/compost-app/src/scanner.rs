//! Incremental line scanning over a byte stream.
//!
//! [`LineScanner`] turns an unbounded byte stream into discrete lines. Bare
//! terminator bytes (`\r`, `\n`) are absorbed one at a time, so `\r\n`, `\n`
//! and stray runs left behind by line editing never surface as empty lines.

use std::{fmt, io};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A completed unit of operator input, terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(String);

impl Line {
    /// Wrap already terminator-free text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Line contents.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the contents.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one [`LineScanner::next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A line was completed.
    Line(Line),
    /// No bytes are available right now. Try again later.
    ///
    /// Any partial line read so far is kept and continued on the next call.
    Pending,
}

/// Hard failure reading the underlying stream.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The stream returned an I/O error.
    #[error("input stream unreadable: {0}")]
    Read(#[from] io::Error),
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Scans lines out of a buffered async reader.
///
/// Owns its cursor state (the reader's buffer plus the bytes of an
/// unfinished line) and is never shared between tasks.
#[derive(Debug)]
pub struct LineScanner<R> {
    reader: R,
    partial: Vec<u8>,
}

impl<R> LineScanner<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Create a scanner over `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader, partial: Vec::new() }
    }

    /// Bytes of an unfinished line carried over from earlier calls.
    pub fn pending_len(&self) -> usize {
        self.partial.len()
    }

    /// Scan the next line.
    ///
    /// Suspends on the reader while it has nothing buffered. Returns
    /// [`Scan::Pending`] when the reader reports end of stream, which the
    /// caller treats as "try again later".
    ///
    /// # Errors
    ///
    /// [`ScanError::Read`] if the stream is unreadable. This is fatal to the
    /// owning task.
    pub async fn next(&mut self) -> Result<Scan, ScanError> {
        loop {
            let buf = self.reader.fill_buf().await?;
            let Some(&first) = buf.first() else {
                return Ok(Scan::Pending);
            };

            // Single-byte lookahead: stray terminators are dropped one at a time.
            if self.partial.is_empty() && is_terminator(first) {
                tracing::trace!(component = "input_pump", byte = first, "skipping terminator");
                self.reader.consume(1);
                continue;
            }

            match buf.iter().position(|&b| is_terminator(b)) {
                Some(end) => {
                    self.partial.extend_from_slice(&buf[..end]);
                    self.reader.consume(end + 1);
                    return Ok(Scan::Line(self.take_line()));
                },
                None => {
                    let len = buf.len();
                    self.partial.extend_from_slice(buf);
                    self.reader.consume(len);
                },
            }
        }
    }

    fn take_line(&mut self) -> Line {
        let bytes = std::mem::take(&mut self.partial);
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Line(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::{
        collections::VecDeque,
        pin::Pin,
        task::{Context, Poll},
    };

    use tokio::io::{AsyncRead, BufReader, ReadBuf};

    use super::*;

    /// Reader that replays a script of chunks. `None` reports end of stream
    /// once without ending the script.
    struct ScriptedReader {
        script: VecDeque<Option<Vec<u8>>>,
    }

    impl ScriptedReader {
        fn new(script: impl IntoIterator<Item = Option<&'static [u8]>>) -> Self {
            Self { script: script.into_iter().map(|c| c.map(<[u8]>::to_vec)).collect() }
        }
    }

    impl AsyncRead for ScriptedReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if let Some(Some(chunk)) = self.script.pop_front() {
                buf.put_slice(&chunk);
            }
            Poll::Ready(Ok(()))
        }
    }

    struct FailingReader;

    impl AsyncRead for FailingReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::other("device gone")))
        }
    }

    fn line(s: &str) -> Scan {
        Scan::Line(Line(s.to_string()))
    }

    #[tokio::test]
    async fn single_line_with_newline() {
        let mut scanner = LineScanner::new(&b"hello\n"[..]);

        assert_eq!(scanner.next().await.unwrap(), line("hello"));
        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
    }

    #[tokio::test]
    async fn crlf_produces_one_line() {
        let mut scanner = LineScanner::new(&b"hello\r\nworld\r\n"[..]);

        assert_eq!(scanner.next().await.unwrap(), line("hello"));
        assert_eq!(scanner.next().await.unwrap(), line("world"));
        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
    }

    #[tokio::test]
    async fn terminator_runs_are_absorbed() {
        let mut scanner = LineScanner::new(&b"\r\n\n\r\rone\n\n\n\rtwo\r"[..]);

        assert_eq!(scanner.next().await.unwrap(), line("one"));
        assert_eq!(scanner.next().await.unwrap(), line("two"));
        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
    }

    #[tokio::test]
    async fn whitespace_inside_a_line_is_kept() {
        let mut scanner = LineScanner::new(&b"  spaced out \n"[..]);
        assert_eq!(scanner.next().await.unwrap(), line("  spaced out "));
    }

    #[tokio::test]
    async fn unterminated_tail_is_pending_and_retained() {
        let mut scanner = LineScanner::new(&b"done\npart"[..]);

        assert_eq!(scanner.next().await.unwrap(), line("done"));
        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
        assert_eq!(scanner.pending_len(), 4);
    }

    #[tokio::test]
    async fn line_split_across_end_of_stream_is_resumed() {
        let reader = ScriptedReader::new([Some(&b"hel"[..]), None, Some(&b"lo\nnext\n"[..])]);
        let mut scanner = LineScanner::new(BufReader::new(reader));

        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
        assert_eq!(scanner.pending_len(), 3);
        assert_eq!(scanner.next().await.unwrap(), line("hello"));
        assert_eq!(scanner.next().await.unwrap(), line("next"));
        assert_eq!(scanner.pending_len(), 0);
    }

    #[tokio::test]
    async fn terminator_after_end_of_stream_completes_partial_line() {
        let reader = ScriptedReader::new([Some(&b"abc"[..]), None, Some(&b"\r\n"[..])]);
        let mut scanner = LineScanner::new(BufReader::new(reader));

        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
        assert_eq!(scanner.next().await.unwrap(), line("abc"));
        assert_eq!(scanner.next().await.unwrap(), Scan::Pending);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let mut scanner = LineScanner::new(&b"a\xffb\n"[..]);
        assert_eq!(scanner.next().await.unwrap(), line("a\u{fffd}b"));
    }

    #[tokio::test]
    async fn read_failure_is_an_error() {
        let mut scanner = LineScanner::new(BufReader::new(FailingReader));
        assert!(matches!(scanner.next().await, Err(ScanError::Read(_))));
    }
}
