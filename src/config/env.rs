//! Environment variable overrides for configuration.
//!
//! - `MINEBRIDGE_CONFIG` - path of the HOCON config file
//! - `MINEBRIDGE_SUPERUSERS` - comma separated superuser ids, replaces `permissions.superusers`

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "MINEBRIDGE";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(superusers) = env::var(format!("{}_SUPERUSERS", ENV_PREFIX)) {
        config.permissions.superusers = parse_id_list(&superusers);
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `MINEBRIDGE_CONFIG` environment variable, otherwise returns "minebridge.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "minebridge.conf".to_string())
}

fn parse_id_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}
