//! Configuration data model.

use std::fmt;

use serde::Deserialize;

/// Operator identity and the ordered list of known servers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Nickname presented to the server.
    pub nick: String,
    /// Username (ident) presented to the server.
    pub username: String,
    /// Display name presented to the server.
    pub realname: String,
    /// Servers in file order. Indices are stable for selection.
    #[serde(rename = "server", default)]
    pub servers: Vec<Server>,
}

/// A single server descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Server {
    /// Human-readable label.
    pub name: String,
    /// Hostname or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Whether the connection should use TLS.
    #[serde(rename = "tls", default)]
    pub use_tls: bool,
    /// Channels joined once the connection is established.
    #[serde(rename = "join-channels", default)]
    pub autojoin: Vec<String>,
}

impl Config {
    /// Decode a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Lines describing the operator identity and every server, in the
    /// order they are printed before the selection prompt.
    pub fn listing(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.servers.len() + 1);
        lines.push(format!("nick = {}, realname = {}", self.nick, self.realname));
        lines.extend(self.servers.iter().enumerate().map(|(idx, server)| format!("{idx}: {server}")));
        lines
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name = {}, host = {}, port = {}, tls = {}, join = [{}]",
            self.name,
            self.host,
            self.port,
            self.use_tls,
            self.autojoin.join(" ")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
nick = "compost"
username = "cp"
realname = "Compost User"

[[server]]
name = "libera"
host = "irc.libera.chat"
port = 6697
tls = true
join-channels = ["#rust", "#compost"]

[[server]]
name = "local"
host = "127.0.0.1"
port = 6667
"##;

    #[test]
    fn decodes_servers_in_file_order() {
        let config = Config::from_toml(SAMPLE).unwrap();

        assert_eq!(config.nick, "compost");
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers[0].name, "libera");
        assert!(config.servers[0].use_tls);
        assert_eq!(config.servers[0].autojoin, vec!["#rust", "#compost"]);
        assert_eq!(config.servers[1].name, "local");
    }

    #[test]
    fn tls_and_channels_default_when_absent() {
        let config = Config::from_toml(SAMPLE).unwrap();

        assert!(!config.servers[1].use_tls);
        assert!(config.servers[1].autojoin.is_empty());
    }

    #[test]
    fn missing_identity_is_rejected() {
        let result = Config::from_toml("nick = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn listing_prints_identity_then_one_line_per_server() {
        let config = Config::from_toml(SAMPLE).unwrap();
        let lines = config.listing();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "nick = compost, realname = Compost User");
        assert_eq!(
            lines[1],
            "0: name = libera, host = irc.libera.chat, port = 6697, tls = true, join = [#rust #compost]"
        );
        assert_eq!(lines[2], "1: name = local, host = 127.0.0.1, port = 6667, tls = false, join = []");
    }
}
