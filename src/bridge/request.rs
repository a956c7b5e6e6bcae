//! Dispatch requests and the context threaded through a dispatch.

use crate::chat::event::{ChatEvent, SourceKey};

/// Label of the built-in raw command, sent verbatim.
pub const LITERAL_COMMAND: &str = "command";

/// Raw console command flavour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCommand {
    /// Payload is a complete console command.
    Literal,
    /// Payload is the argument of a shorthand command, expanded by the
    /// screen-command parser.
    Shorthand(String),
}

/// What a request asks the servers to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Relay the originating chat message.
    ChatMessage,
    RawCommand(RawCommand),
    /// Payload is `title` or `title\nsubtitle`.
    Title,
    ActionBar,
}

impl CommandKind {
    /// Raw command kind for a label: `command` is literal, anything else is shorthand.
    pub fn raw(label: &str) -> Self {
        if label == LITERAL_COMMAND {
            Self::RawCommand(RawCommand::Literal)
        } else {
            Self::RawCommand(RawCommand::Shorthand(label.to_string()))
        }
    }

    /// Commands report back to the chat; chat messages are relayed silently.
    pub fn is_command(&self) -> bool {
        !matches!(self, Self::ChatMessage)
    }
}

/// A request to deliver something to every server bound to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub kind: CommandKind,
    /// Command text, title text or action bar text. Empty for chat messages,
    /// whose content comes from the originating event.
    pub payload: String,
}

impl CommandRequest {
    pub fn new(kind: CommandKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    pub fn chat_message() -> Self {
        Self::new(CommandKind::ChatMessage, String::new())
    }

    pub fn is_command(&self) -> bool {
        self.kind.is_command()
    }
}

/// Everything one dispatch needs, resolved once up front.
#[derive(Debug, Clone)]
pub struct RequestContext<'a> {
    pub event: &'a ChatEvent,
    pub request: &'a CommandRequest,
    pub source: SourceKey,
    /// Target servers, in report order.
    pub servers: Vec<String>,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        event: &'a ChatEvent,
        request: &'a CommandRequest,
        source: SourceKey,
        servers: Vec<String>,
    ) -> Self {
        Self {
            event,
            request,
            source,
            servers,
        }
    }
}
