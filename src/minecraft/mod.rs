//! Minecraft server side of the bridge.
//!
//! This module contains:
//! - JSON text components for relayed chat
//! - The transport traits the host runtime implements

pub mod text;
pub mod transport;

pub use text::{render_chat, ChatRenderOptions, RenderedChat, TextComponent};
pub use transport::{
    ConnectionRegistry, NoScreenCommands, RconTransport, ScreenCommandParser, ServerHandle,
    SharedRegistry,
};
