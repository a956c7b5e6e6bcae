//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use std::collections::HashSet;

use crate::chat::event::SourceKey;
use crate::common::error::ConfigError;
use crate::config::types::{Config, Platform};

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.servers.is_empty() {
        errors.push("servers is empty - no Minecraft server configured".to_string());
    }

    let mut seen = HashSet::new();
    for (i, server) in config.servers.iter().enumerate() {
        if server.name.trim().is_empty() {
            errors.push(format!("servers[{}].name is required", i));
        } else if !seen.insert(server.name.as_str()) {
            errors.push(format!("servers[{}].name '{}' is duplicated", i, server.name));
        }

        for (j, group) in server.groups.iter().enumerate() {
            let path = format!("servers[{}].groups[{}]", i, j);
            match group.platform() {
                None => errors.push(format!(
                    "{}.platform '{}' is invalid (use: onebot, qq)",
                    path, group.platform
                )),
                Some(Platform::OneBot) if SourceKey::group(Platform::OneBot, &group.group_id).is_none() => {
                    errors.push(format!(
                        "{}.group_id '{}' must be numeric for onebot",
                        path, group.group_id
                    ));
                }
                Some(_) if group.group_id.is_empty() => {
                    errors.push(format!("{}.group_id is required", path));
                }
                Some(_) => {}
            }
        }

        for (j, guild) in server.guilds.iter().enumerate() {
            let path = format!("servers[{}].guilds[{}]", i, j);
            if guild.channel_id.is_empty() {
                errors.push(format!("{}.channel_id is required", path));
            }
            match guild.platform() {
                None => errors.push(format!(
                    "{}.platform '{}' is invalid (use: onebot, qq)",
                    path, guild.platform
                )),
                Some(Platform::OneBot)
                    if guild.guild_id.as_deref().map_or(true, str::is_empty) =>
                {
                    errors.push(format!("{}.guild_id is required for onebot", path));
                }
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

/// Names of servers that no chat is bound to.
///
/// Not an error: such servers only receive traffic once a binding is added.
pub fn unbound_servers(config: &Config) -> Vec<&str> {
    config
        .servers
        .iter()
        .filter(|s| s.groups.is_empty() && s.guilds.is_empty())
        .map(|s| s.name.as_str())
        .collect()
}
