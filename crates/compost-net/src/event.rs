//! Inbound events emitted by the network collaborator.

/// Kind tag of an [`InboundEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Registration with the server completed.
    Connected,
    /// Server or user notice.
    Notice,
    /// Message addressed to a channel or to us.
    PrivateMessage,
    /// A user (possibly us) joined a channel.
    Join,
    /// Anything the client does not interpret, tagged with its command name.
    Other(String),
}

/// A typed notification from the network collaborator.
///
/// `params[0]` is the target (channel or nick) and `params[1]` carries the
/// message text for [`EventKind::Notice`] and [`EventKind::PrivateMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Display name of the originator.
    pub source: String,
    /// Positional parameters.
    pub params: Vec<String>,
}

impl InboundEvent {
    /// Position of the message text within [`InboundEvent::params`].
    pub const TEXT_PARAM: usize = 1;

    /// Registration completed on `server`.
    pub fn connected(server: impl Into<String>) -> Self {
        Self { kind: EventKind::Connected, source: server.into(), params: Vec::new() }
    }

    /// Notice from `source` to `target`.
    pub fn notice(
        source: impl Into<String>,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: EventKind::Notice,
            source: source.into(),
            params: vec![target.into(), text.into()],
        }
    }

    /// Message from `source` to `target`.
    pub fn message(
        source: impl Into<String>,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: EventKind::PrivateMessage,
            source: source.into(),
            params: vec![target.into(), text.into()],
        }
    }

    /// `source` joined `channel`.
    pub fn join(source: impl Into<String>, channel: impl Into<String>) -> Self {
        Self { kind: EventKind::Join, source: source.into(), params: vec![channel.into()] }
    }

    /// Message text, if the event carries one.
    pub fn text(&self) -> Option<&str> {
        self.params.get(Self::TEXT_PARAM).map(String::as_str)
    }
}
