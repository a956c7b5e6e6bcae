//! Chat platform side of the bridge.
//!
//! - `event`: inbound chat events and the source keys derived from them
//! - `message`: message content as segments
//! - `permission`: who may send commands

pub mod event;
pub mod message;
pub mod permission;

pub use event::{ChatEvent, ChatOrigin, Sender, SenderRole, SourceKey};
pub use message::{ChatMessage, Segment};
pub use permission::{PermissionGate, RoleDirectory, PERMISSION_DENIED};
