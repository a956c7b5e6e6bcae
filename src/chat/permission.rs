//! Who may send commands to the servers.
//!
//! Checked by the caller before anything reaches the dispatcher. Cheap checks
//! (superuser list, the sender role carried on the event) run first; guild
//! role names are only fetched when those fail.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::chat::event::{ChatEvent, ChatOrigin, SenderRole};
use crate::common::error::TransportResult;
use crate::config::types::PermissionsConfig;

/// Fixed reply when a sender is not allowed to run commands.
pub const PERMISSION_DENIED: &str = "You do not have permission to use this command";

/// Looks up guild role names on the chat platform.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Names of the roles the event's sender holds in its guild.
    async fn member_role_names(&self, event: &ChatEvent) -> TransportResult<Vec<String>>;
}

/// Per-origin command permission policy.
pub struct PermissionGate {
    superusers: HashSet<String>,
    admin_roles: HashSet<String>,
    roles: Arc<dyn RoleDirectory>,
}

impl PermissionGate {
    pub fn new(config: &PermissionsConfig, roles: Arc<dyn RoleDirectory>) -> Self {
        Self {
            superusers: config.superusers.iter().cloned().collect(),
            admin_roles: config.guild_admin_roles.iter().cloned().collect(),
            roles,
        }
    }

    /// Whether the event's sender may run commands.
    pub async fn check(&self, event: &ChatEvent) -> bool {
        let sender = event.sender();
        if self.superusers.contains(&sender.user_id) {
            return true;
        }

        match event.origin() {
            // Official QQ groups expose no member roles.
            ChatOrigin::QqGroup => false,
            ChatOrigin::OneBotGroup => {
                matches!(sender.role, SenderRole::Owner | SenderRole::Admin)
            }
            ChatOrigin::OneBotGuild | ChatOrigin::QqGuild => {
                if matches!(sender.role, SenderRole::Owner | SenderRole::Admin) {
                    return true;
                }
                self.holds_admin_role(event).await
            }
        }
    }

    async fn holds_admin_role(&self, event: &ChatEvent) -> bool {
        if self.admin_roles.is_empty() {
            return false;
        }
        if event.member_roles().iter().any(|role| self.admin_roles.contains(role)) {
            return true;
        }

        match self.roles.member_role_names(event).await {
            Ok(names) => {
                let allowed = names.iter().any(|name| self.admin_roles.contains(name));
                debug!(
                    user = %event.sender().user_id,
                    allowed,
                    "Checked guild admin roles"
                );
                allowed
            }
            Err(e) => {
                warn!(
                    user = %event.sender().user_id,
                    "Guild role lookup failed, denying command: {}",
                    e
                );
                false
            }
        }
    }
}
