//! Minebridge - configuration checker
//!
//! Loads and validates the bridge configuration, then prints the routing
//! table the dispatcher would use: which servers each chat reaches and over
//! which transport.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, warn};

use minebridge::bridge::{Dispatcher, ServerBindings};
use minebridge::config::env::get_config_path;
use minebridge::config::load_and_validate;
use minebridge::config::validate::unbound_servers;
use minebridge::minecraft::{NoScreenCommands, SharedRegistry};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Minebridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Servers: {}", config.servers.len());
    info!("  Superusers: {}", config.permissions.superusers.len());
    info!("  Send source name: {}", config.chat.send_source_name);

    let bindings = ServerBindings::from_config(&config);
    for server in &config.servers {
        if let Some(binding) = bindings.get(&server.name) {
            info!(
                server = %server.name,
                rcon_commands = binding.rcon_cmd_enabled,
                rcon_messages = binding.rcon_msg_enabled,
                "Server transport"
            );
        }
    }

    let dispatcher = Dispatcher::from_config(
        &config,
        Arc::new(SharedRegistry::new()),
        Arc::new(NoScreenCommands),
    );

    let table = dispatcher.resolver().table();
    info!("Routing {} chat(s):", table.len());
    for (source, servers) in table.entries() {
        info!("  {} -> {}", source, servers.join(", "));
    }

    for server in unbound_servers(&config) {
        warn!(server, "Server is not bound to any chat");
    }

    Ok(())
}
