//! Static per-server settings.
//!
//! Built once from configuration and immutable afterwards, so it can be
//! shared freely between concurrent dispatches.

use std::collections::HashMap;

use crate::config::types::Config;

/// Transport preferences of one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerBinding {
    pub name: String,
    pub rcon_cmd_enabled: bool,
    pub rcon_msg_enabled: bool,
}

impl ServerBinding {
    /// Binding for a server missing from configuration: native transport only.
    pub fn native_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rcon_cmd_enabled: false,
            rcon_msg_enabled: false,
        }
    }
}

/// All server bindings, keyed by server name.
#[derive(Debug, Clone, Default)]
pub struct ServerBindings {
    bindings: HashMap<String, ServerBinding>,
}

impl ServerBindings {
    pub fn from_config(config: &Config) -> Self {
        let bindings = config
            .servers
            .iter()
            .map(|server| {
                let binding = ServerBinding {
                    name: server.name.clone(),
                    rcon_cmd_enabled: server.rcon.command,
                    rcon_msg_enabled: server.rcon.message,
                };
                (server.name.clone(), binding)
            })
            .collect();

        Self { bindings }
    }

    pub fn get(&self, server_name: &str) -> Option<&ServerBinding> {
        self.bindings.get(server_name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    #[test]
    fn test_from_config() {
        let config = Config {
            servers: vec![ServerConfig {
                name: "survival".to_string(),
                rcon: RconConfig {
                    command: true,
                    message: false,
                },
                groups: Vec::new(),
                guilds: Vec::new(),
            }],
            chat: ChatConfig::default(),
            permissions: PermissionsConfig::default(),
        };

        let bindings = ServerBindings::from_config(&config);
        let survival = bindings.get("survival").unwrap();

        assert_eq!(bindings.len(), 1);
        assert!(survival.rcon_cmd_enabled);
        assert!(!survival.rcon_msg_enabled);
        assert!(bindings.get("creative").is_none());
    }
}
