//! Minebridge - chat to Minecraft dispatch engine
//!
//! Relays chat messages and operator commands from QQ / OneBot groups and
//! guilds to the Minecraft servers bound to them, over RCON or the servers'
//! native bridge connection, and reports back what each server answered.

pub mod bridge;
pub mod chat;
pub mod common;
pub mod config;
pub mod minecraft;

pub use bridge::Dispatcher;
pub use common::{ConfigError, DispatchError, TransportError};
