//! Configuration type definitions.

use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub servers: Vec<ServerConfig>,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
}

/// One Minecraft server backend and the chats bound to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name, as registered by the server's bot connection.
    pub name: String,
    #[serde(default)]
    pub rcon: RconConfig,
    /// Group chats relayed to this server.
    #[serde(default)]
    pub groups: Vec<GroupBinding>,
    /// Guild channels relayed to this server.
    #[serde(default)]
    pub guilds: Vec<GuildBinding>,
}

/// Which operations prefer RCON over the native protocol.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RconConfig {
    /// Send commands (command, title, action bar) over RCON.
    #[serde(default)]
    pub command: bool,
    /// Send chat messages over RCON.
    #[serde(default)]
    pub message: bool,
}

/// Chat platform an event arrives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// OneBot v11 implementations (go-cqhttp, NapCat, ...), with the guild patch.
    OneBot,
    /// The official QQ bot API.
    Qq,
}

impl Platform {
    /// Parse a platform from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "onebot" | "onebot_v11" => Some(Self::OneBot),
            "qq" => Some(Self::Qq),
            _ => None,
        }
    }
}

/// Binds a group chat to a server.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupBinding {
    /// "onebot" or "qq".
    pub platform: String,
    pub group_id: String,
}

impl GroupBinding {
    pub fn platform(&self) -> Option<Platform> {
        Platform::from_name(&self.platform)
    }
}

/// Binds a guild channel to a server.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildBinding {
    /// "onebot" or "qq".
    pub platform: String,
    /// Required for OneBot guilds, ignored for QQ guilds (channel ids are global there).
    pub guild_id: Option<String>,
    pub channel_id: String,
}

impl GuildBinding {
    pub fn platform(&self) -> Option<Platform> {
        Platform::from_name(&self.platform)
    }
}

/// Chat relay settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Prefix relayed messages with the group/guild name.
    #[serde(default = "default_true")]
    pub send_source_name: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            send_source_name: true,
        }
    }
}

/// Who may issue commands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionsConfig {
    /// User ids that may run commands anywhere.
    #[serde(default)]
    pub superusers: Vec<String>,
    /// Guild roles that count as administrators: role names looked up on the
    /// platform, or the role ids QQ guild events carry.
    #[serde(default)]
    pub guild_admin_roles: Vec<String>,
}

fn default_true() -> bool {
    true
}

