//! Outbound intents issued to the network collaborator.

use tokio::sync::mpsc;

use crate::NetError;

/// Something the client asks the connection to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Join the listed channels.
    Join(Vec<String>),
    /// Send text to a channel or nick.
    Privmsg {
        /// Channel or nick.
        target: String,
        /// Message text.
        text: String,
    },
    /// Leave the server and end the connection.
    Quit,
}

/// Cloneable handle for submitting [`Command`]s.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<Command>,
}

impl CommandSender {
    /// Create a sender and the receiving end the connection task drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Command>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Submit a raw command.
    pub async fn send(&self, command: Command) -> Result<(), NetError> {
        self.tx.send(command).await.map_err(|_| NetError::Closed)
    }

    /// Join `channels`. An empty list is a no-op.
    pub async fn join(&self, channels: &[String]) -> Result<(), NetError> {
        if channels.is_empty() {
            return Ok(());
        }
        self.send(Command::Join(channels.to_vec())).await
    }

    /// Send `text` to `target`.
    pub async fn privmsg(&self, target: &str, text: &str) -> Result<(), NetError> {
        self.send(Command::Privmsg { target: target.to_string(), text: text.to_string() }).await
    }

    /// Ask the connection to quit.
    pub async fn quit(&self) -> Result<(), NetError> {
        self.send(Command::Quit).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn join_forwards_channel_list() {
        let (sender, mut rx) = CommandSender::channel(4);
        sender.join(&["#a".to_string(), "#b".to_string()]).await.unwrap();

        assert_eq!(rx.recv().await, Some(Command::Join(vec!["#a".into(), "#b".into()])));
    }

    #[tokio::test]
    async fn empty_join_sends_nothing() {
        let (sender, mut rx) = CommandSender::channel(4);
        sender.join(&[]).await.unwrap();
        drop(sender);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn closed_receiver_is_reported() {
        let (sender, rx) = CommandSender::channel(1);
        drop(rx);

        assert!(matches!(sender.quit().await, Err(NetError::Closed)));
    }
}
