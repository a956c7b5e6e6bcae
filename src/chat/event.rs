//! Inbound chat events.
//!
//! Platform adapters (outside this crate) translate their native event
//! schemas into [`ChatEvent`]. Everything downstream only uses the uniform
//! accessors (`source_key`, `sender`, `origin`), never the variant fields.

use std::fmt;

use crate::chat::message::ChatMessage;
use crate::config::types::Platform;

/// Where a chat event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatOrigin {
    OneBotGroup,
    OneBotGuild,
    QqGroup,
    QqGuild,
}

/// Lookup key identifying the chat an event was posted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// OneBot group number.
    OneBotGroup(u64),
    /// OneBot guild channel, as `"guild_id:channel_id"`.
    OneBotGuild(String),
    /// QQ group (openid).
    QqGroup(String),
    /// QQ guild channel id.
    QqGuild(String),
}

impl SourceKey {
    /// Build the key of a group binding. `None` if the id is malformed for the platform.
    pub fn group(platform: Platform, group_id: &str) -> Option<Self> {
        match platform {
            Platform::OneBot => group_id.trim().parse().ok().map(Self::OneBotGroup),
            Platform::Qq if !group_id.is_empty() => Some(Self::QqGroup(group_id.to_string())),
            Platform::Qq => None,
        }
    }

    /// Build the key of a guild channel binding.
    pub fn guild(platform: Platform, guild_id: Option<&str>, channel_id: &str) -> Option<Self> {
        if channel_id.is_empty() {
            return None;
        }
        match platform {
            Platform::OneBot => guild_id
                .filter(|g| !g.is_empty())
                .map(|g| Self::OneBotGuild(format!("{}:{}", g, channel_id))),
            Platform::Qq => Some(Self::QqGuild(channel_id.to_string())),
        }
    }

    pub fn origin(&self) -> ChatOrigin {
        match self {
            Self::OneBotGroup(_) => ChatOrigin::OneBotGroup,
            Self::OneBotGuild(_) => ChatOrigin::OneBotGuild,
            Self::QqGroup(_) => ChatOrigin::QqGroup,
            Self::QqGuild(_) => ChatOrigin::QqGuild,
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneBotGroup(id) => write!(f, "onebot group {}", id),
            Self::OneBotGuild(id) => write!(f, "onebot guild {}", id),
            Self::QqGroup(id) => write!(f, "qq group {}", id),
            Self::QqGuild(id) => write!(f, "qq guild channel {}", id),
        }
    }
}

/// Sender's standing in the chat, as reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SenderRole {
    Owner,
    Admin,
    #[default]
    Member,
}

/// Who sent an event.
#[derive(Debug, Clone)]
pub struct Sender {
    pub user_id: String,
    pub nickname: String,
    pub role: SenderRole,
}

impl Sender {
    pub fn new(user_id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            nickname: nickname.into(),
            role: SenderRole::Member,
        }
    }

    pub fn with_role(mut self, role: SenderRole) -> Self {
        self.role = role;
        self
    }
}

/// Group message from a OneBot implementation.
#[derive(Debug, Clone)]
pub struct OneBotGroupEvent {
    /// Account the bot runs as.
    pub self_id: u64,
    pub group_id: u64,
    pub group_name: Option<String>,
    pub sender: Sender,
    pub message: ChatMessage,
}

/// Guild channel message from a OneBot implementation.
#[derive(Debug, Clone)]
pub struct OneBotGuildEvent {
    pub guild_id: String,
    pub channel_id: String,
    pub guild_name: Option<String>,
    pub sender: Sender,
    pub message: ChatMessage,
}

/// Group @-message from the official QQ bot API.
#[derive(Debug, Clone)]
pub struct QqGroupEvent {
    pub group_id: String,
    pub sender: Sender,
    pub message: ChatMessage,
}

/// Guild channel message from the official QQ bot API.
#[derive(Debug, Clone)]
pub struct QqGuildEvent {
    pub guild_id: String,
    pub channel_id: String,
    pub guild_name: Option<String>,
    pub sender: Sender,
    /// Role ids the member holds in the guild.
    pub member_roles: Vec<String>,
    pub message: ChatMessage,
}

/// An inbound chat event from any supported origin.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    OneBotGroup(OneBotGroupEvent),
    OneBotGuild(OneBotGuildEvent),
    QqGroup(QqGroupEvent),
    QqGuild(QqGuildEvent),
}

impl ChatEvent {
    pub fn origin(&self) -> ChatOrigin {
        match self {
            Self::OneBotGroup(_) => ChatOrigin::OneBotGroup,
            Self::OneBotGuild(_) => ChatOrigin::OneBotGuild,
            Self::QqGroup(_) => ChatOrigin::QqGroup,
            Self::QqGuild(_) => ChatOrigin::QqGuild,
        }
    }

    /// Key used to look up the servers bound to this chat.
    pub fn source_key(&self) -> SourceKey {
        match self {
            Self::OneBotGroup(e) => SourceKey::OneBotGroup(e.group_id),
            Self::OneBotGuild(e) => {
                SourceKey::OneBotGuild(format!("{}:{}", e.guild_id, e.channel_id))
            }
            Self::QqGroup(e) => SourceKey::QqGroup(e.group_id.clone()),
            Self::QqGuild(e) => SourceKey::QqGuild(e.channel_id.clone()),
        }
    }

    pub fn sender(&self) -> &Sender {
        match self {
            Self::OneBotGroup(e) => &e.sender,
            Self::OneBotGuild(e) => &e.sender,
            Self::QqGroup(e) => &e.sender,
            Self::QqGuild(e) => &e.sender,
        }
    }

    pub fn message(&self) -> &ChatMessage {
        match self {
            Self::OneBotGroup(e) => &e.message,
            Self::OneBotGuild(e) => &e.message,
            Self::QqGroup(e) => &e.message,
            Self::QqGuild(e) => &e.message,
        }
    }

    /// Display name of the group or guild, when the platform provides one.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::OneBotGroup(e) => e.group_name.as_deref(),
            Self::OneBotGuild(e) => e.guild_name.as_deref(),
            Self::QqGroup(_) => None,
            Self::QqGuild(e) => e.guild_name.as_deref(),
        }
    }

    /// Guild roles carried on the event itself. Only QQ guild events have them.
    pub fn member_roles(&self) -> &[String] {
        match self {
            Self::QqGuild(e) => &e.member_roles,
            _ => &[],
        }
    }

    /// Whether the bot itself posted this event.
    ///
    /// Only OneBot groups echo the bot's own messages back as events.
    pub fn is_self_message(&self) -> bool {
        match self {
            Self::OneBotGroup(e) => e.sender.user_id == e.self_id.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_event(self_id: u64, user_id: &str) -> ChatEvent {
        ChatEvent::OneBotGroup(OneBotGroupEvent {
            self_id,
            group_id: 123,
            group_name: Some("Crafters".to_string()),
            sender: Sender::new(user_id, "Steve"),
            message: ChatMessage::text("hi"),
        })
    }

    #[test]
    fn test_source_key_per_origin() {
        assert_eq!(group_event(1, "2").source_key(), SourceKey::OneBotGroup(123));

        let guild = ChatEvent::OneBotGuild(OneBotGuildEvent {
            guild_id: "42".to_string(),
            channel_id: "7".to_string(),
            guild_name: None,
            sender: Sender::new("2", "Alex"),
            message: ChatMessage::text("hi"),
        });
        assert_eq!(guild.source_key(), SourceKey::OneBotGuild("42:7".to_string()));

        let qq_group = ChatEvent::QqGroup(QqGroupEvent {
            group_id: "OPENID".to_string(),
            sender: Sender::new("u", "Alex"),
            message: ChatMessage::text("hi"),
        });
        assert_eq!(qq_group.source_key(), SourceKey::QqGroup("OPENID".to_string()));

        let qq_guild = ChatEvent::QqGuild(QqGuildEvent {
            guild_id: "g".to_string(),
            channel_id: "c".to_string(),
            guild_name: None,
            sender: Sender::new("u", "Alex"),
            member_roles: Vec::new(),
            message: ChatMessage::text("hi"),
        });
        assert_eq!(qq_guild.source_key(), SourceKey::QqGuild("c".to_string()));
        assert_eq!(qq_guild.source_key().origin(), ChatOrigin::QqGuild);
    }

    #[test]
    fn test_config_keys_match_event_keys() {
        assert_eq!(
            SourceKey::group(Platform::OneBot, "123"),
            Some(SourceKey::OneBotGroup(123))
        );
        assert_eq!(SourceKey::group(Platform::OneBot, "abc"), None);
        assert_eq!(
            SourceKey::guild(Platform::OneBot, Some("42"), "7"),
            Some(SourceKey::OneBotGuild("42:7".to_string()))
        );
        assert_eq!(SourceKey::guild(Platform::OneBot, None, "7"), None);
        assert_eq!(
            SourceKey::guild(Platform::Qq, None, "c"),
            Some(SourceKey::QqGuild("c".to_string()))
        );
    }

    #[test]
    fn test_self_message_detection() {
        assert!(group_event(1000, "1000").is_self_message());
        assert!(!group_event(1000, "2000").is_self_message());
    }

    #[test]
    fn test_source_name() {
        assert_eq!(group_event(1, "2").source_name(), Some("Crafters"));
    }
}
