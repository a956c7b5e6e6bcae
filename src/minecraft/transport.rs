//! Transports to Minecraft servers, as seen by the bridge.
//!
//! The host runtime owns the actual connections (a native plugin/mod
//! websocket per server, optionally with an RCON client next to it) and
//! exposes them through [`ConnectionRegistry`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::common::error::{TransportError, TransportResult};
use crate::minecraft::text::TextComponent;

/// RCON client of one server.
#[async_trait]
pub trait RconTransport: Send + Sync {
    /// Run a console command and return the server's response packets.
    async fn send_cmd(&self, command: &str) -> TransportResult<Vec<String>>;
}

/// Live connection to one server.
#[async_trait]
pub trait ServerHandle: Send + Sync {
    /// RCON client, if the server currently has one connected.
    fn rcon(&self) -> Option<Arc<dyn RconTransport>>;

    /// Broadcast a chat message over the native protocol.
    async fn send_message(&self, message: &[TextComponent]) -> TransportResult<()>;

    /// Show a title (and subtitle, possibly empty) to every player.
    async fn send_title(&self, title: &str, subtitle: &str) -> TransportResult<()>;

    /// Show an action bar text to every player.
    async fn send_actionbar(&self, text: &str) -> TransportResult<()>;
}

/// Lookup of live server connections by server name.
pub trait ConnectionRegistry: Send + Sync {
    fn lookup(&self, server_name: &str) -> Option<Arc<dyn ServerHandle>>;
}

/// Turns a shorthand command label and its argument into a console command.
pub trait ScreenCommandParser: Send + Sync {
    fn parse(&self, kind: &str, payload: &str) -> TransportResult<String>;
}

/// Parser for hosts that register no shorthand commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScreenCommands;

impl ScreenCommandParser for NoScreenCommands {
    fn parse(&self, kind: &str, _payload: &str) -> TransportResult<String> {
        Err(TransportError::parse(kind, "unknown command"))
    }
}

/// Run an RCON command and take the first response packet as its text.
pub async fn rcon_text(rcon: &dyn RconTransport, command: &str) -> TransportResult<String> {
    rcon.send_cmd(command)
        .await?
        .into_iter()
        .next()
        .ok_or(TransportError::EmptyResponse)
}

/// Registry backed by a map, updated as server connections come and go.
#[derive(Default)]
pub struct SharedRegistry {
    servers: RwLock<HashMap<String, Arc<dyn ServerHandle>>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a server connection, replacing any previous one.
    pub fn register(&self, server_name: impl Into<String>, handle: Arc<dyn ServerHandle>) {
        self.servers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(server_name.into(), handle);
    }

    /// Remove a server connection. Returns whether it was registered.
    pub fn unregister(&self, server_name: &str) -> bool {
        self.servers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(server_name)
            .is_some()
    }
}

impl ConnectionRegistry for SharedRegistry {
    fn lookup(&self, server_name: &str) -> Option<Arc<dyn ServerHandle>> {
        self.servers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(server_name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo(Vec<String>);

    #[async_trait]
    impl RconTransport for Echo {
        async fn send_cmd(&self, _command: &str) -> TransportResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct Offline;

    #[async_trait]
    impl ServerHandle for Offline {
        fn rcon(&self) -> Option<Arc<dyn RconTransport>> {
            None
        }

        async fn send_message(&self, _message: &[TextComponent]) -> TransportResult<()> {
            Err(TransportError::ConnectionClosed)
        }

        async fn send_title(&self, _title: &str, _subtitle: &str) -> TransportResult<()> {
            Err(TransportError::ConnectionClosed)
        }

        async fn send_actionbar(&self, _text: &str) -> TransportResult<()> {
            Err(TransportError::ConnectionClosed)
        }
    }

    #[tokio::test]
    async fn test_rcon_text_reads_first_packet() {
        let rcon = Echo(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(rcon_text(&rcon, "list").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_rcon_text_empty_response() {
        let rcon = Echo(Vec::new());
        assert_eq!(
            rcon_text(&rcon, "list").await,
            Err(TransportError::EmptyResponse)
        );
    }

    #[test]
    fn test_shared_registry() {
        let registry = SharedRegistry::new();
        assert!(registry.lookup("survival").is_none());

        registry.register("survival", Arc::new(Offline));
        assert!(registry.lookup("survival").is_some());

        assert!(registry.unregister("survival"));
        assert!(!registry.unregister("survival"));
        assert!(registry.lookup("survival").is_none());
    }

    #[test]
    fn test_no_screen_commands() {
        assert!(NoScreenCommands.parse("tp", "Steve").is_err());
    }
}
