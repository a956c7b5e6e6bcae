//! Source chat -> target server resolution.
//!
//! Maps the chat an event was posted in to the servers bound to it. Server
//! order follows the configuration and defines the order of every report.

use std::collections::HashMap;

use tracing::warn;

use crate::chat::event::{ChatEvent, SourceKey};
use crate::config::types::Config;

/// Static table of source chat -> bound servers.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    entries: HashMap<SourceKey, Vec<String>>,
}

impl SourceTable {
    /// Build the table by walking servers in configuration order.
    pub fn from_config(config: &Config) -> Self {
        let mut table = Self::default();

        for server in &config.servers {
            for group in &server.groups {
                let key = group
                    .platform()
                    .and_then(|platform| SourceKey::group(platform, &group.group_id));
                match key {
                    Some(key) => table.bind(key, &server.name),
                    None => warn!(
                        server = %server.name,
                        "Skipping invalid group binding {}:{}",
                        group.platform,
                        group.group_id
                    ),
                }
            }

            for guild in &server.guilds {
                let key = guild.platform().and_then(|platform| {
                    SourceKey::guild(platform, guild.guild_id.as_deref(), &guild.channel_id)
                });
                match key {
                    Some(key) => table.bind(key, &server.name),
                    None => warn!(
                        server = %server.name,
                        "Skipping invalid guild binding {}:{:?}:{}",
                        guild.platform,
                        guild.guild_id,
                        guild.channel_id
                    ),
                }
            }
        }

        table
    }

    /// Append a server to a source's list, once.
    pub fn bind(&mut self, key: SourceKey, server_name: &str) {
        let servers = self.entries.entry(key).or_default();
        if !servers.iter().any(|s| s == server_name) {
            servers.push(server_name.to_string());
        }
    }

    /// Servers bound to a source, in report order.
    pub fn servers_for(&self, key: &SourceKey) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// All entries, sorted by their display form.
    pub fn entries(&self) -> Vec<(&SourceKey, &[String])> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, servers)| (key, servers.as_slice()))
            .collect();
        entries.sort_by_key(|(key, _)| key.to_string());
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves inbound events to their target servers.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    table: SourceTable,
}

impl SourceResolver {
    pub fn new(table: SourceTable) -> Self {
        Self { table }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(SourceTable::from_config(config))
    }

    /// Target servers for an event. Empty when the chat is not bound.
    pub fn resolve(&self, event: &ChatEvent) -> Vec<String> {
        self.table.servers_for(&event.source_key()).to_vec()
    }

    /// Whether any server is bound to the event's chat.
    pub fn is_bound(&self, event: &ChatEvent) -> bool {
        !self.table.servers_for(&event.source_key()).is_empty()
    }

    /// Whether a plain chat message should be relayed to the servers.
    pub fn should_relay(&self, event: &ChatEvent) -> bool {
        self.is_bound(event) && !event.is_self_message()
    }

    pub fn table(&self) -> &SourceTable {
        &self.table
    }
}
