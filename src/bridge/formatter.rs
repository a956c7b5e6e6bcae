//! Transport-specific payloads for each command kind.
//!
//! Every (kind, transport) pair maps to one small builder. The result is
//! either a list of RCON commands run in order, or a single native call,
//! plus the echo shown in the report.

use crate::bridge::request::{CommandKind, CommandRequest, RawCommand};
use crate::bridge::selector::Transport;
use crate::chat::event::ChatEvent;
use crate::common::error::{TransportError, TransportResult};
use crate::minecraft::text::{json_text, render_chat, tellraw_command, ChatRenderOptions, TextComponent};
use crate::minecraft::transport::ScreenCommandParser;

/// A call on the native protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    Message(Vec<TextComponent>),
    Title { title: String, subtitle: String },
    ActionBar(String),
}

/// What to send to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// RCON commands, run sequentially; their responses are concatenated.
    Rcon(Vec<String>),
    Native(NativeCall),
}

/// A formatted request for one transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCommand {
    pub delivery: Delivery,
    /// Human-readable summary of what was sent.
    pub echo: String,
}

/// Builds transport payloads for requests.
pub struct CommandFormatter<'a> {
    parser: &'a dyn ScreenCommandParser,
    chat: ChatRenderOptions,
}

impl<'a> CommandFormatter<'a> {
    pub fn new(parser: &'a dyn ScreenCommandParser, chat: ChatRenderOptions) -> Self {
        Self { parser, chat }
    }

    /// Format a request for the given transport.
    ///
    /// Raw commands have no native counterpart and fail with
    /// [`TransportError::RconRequired`] on the native transport.
    pub fn format(
        &self,
        event: &ChatEvent,
        request: &CommandRequest,
        transport: Transport,
    ) -> TransportResult<FormattedCommand> {
        let payload = request.payload.as_str();

        match (&request.kind, transport) {
            (CommandKind::Title, Transport::Rcon) => Ok(title_rcon(payload)),
            (CommandKind::Title, Transport::Native) => Ok(title_native(payload)),
            (CommandKind::ActionBar, Transport::Rcon) => Ok(action_bar_rcon(payload)),
            (CommandKind::ActionBar, Transport::Native) => Ok(action_bar_native(payload)),
            (CommandKind::RawCommand(RawCommand::Literal), Transport::Rcon) => {
                Ok(raw_rcon(payload.to_string(), payload))
            }
            (CommandKind::RawCommand(RawCommand::Shorthand(label)), Transport::Rcon) => {
                let command = self.parser.parse(label, payload)?;
                Ok(raw_rcon(command, payload))
            }
            (CommandKind::RawCommand(_), Transport::Native) => Err(TransportError::RconRequired {
                what: "raw command".to_string(),
            }),
            (CommandKind::ChatMessage, Transport::Rcon) => self.chat_rcon(event),
            (CommandKind::ChatMessage, Transport::Native) => Ok(self.chat_native(event)),
        }
    }

    fn chat_rcon(&self, event: &ChatEvent) -> TransportResult<FormattedCommand> {
        let rendered = render_chat(event, self.chat);
        Ok(FormattedCommand {
            delivery: Delivery::Rcon(vec![tellraw_command(&rendered.components)?]),
            echo: rendered.plain,
        })
    }

    fn chat_native(&self, event: &ChatEvent) -> FormattedCommand {
        let rendered = render_chat(event, self.chat);
        FormattedCommand {
            delivery: Delivery::Native(NativeCall::Message(rendered.components)),
            echo: rendered.plain,
        }
    }
}

/// Split a title payload on its first newline. The subtitle may be empty.
pub fn split_title(payload: &str) -> (&str, &str) {
    payload.split_once('\n').unwrap_or((payload, ""))
}

fn title_echo(title: &str, subtitle: &str) -> String {
    if subtitle.is_empty() {
        title.to_string()
    } else {
        format!("{} / {}", title, subtitle)
    }
}

fn title_rcon(payload: &str) -> FormattedCommand {
    let (title, subtitle) = split_title(payload);
    let mut commands = vec![format!("title @a title {}", json_text(title))];
    if !subtitle.is_empty() {
        commands.push(format!("title @a subtitle {}", json_text(subtitle)));
    }

    FormattedCommand {
        delivery: Delivery::Rcon(commands),
        echo: title_echo(title, subtitle),
    }
}

fn title_native(payload: &str) -> FormattedCommand {
    let (title, subtitle) = split_title(payload);
    FormattedCommand {
        delivery: Delivery::Native(NativeCall::Title {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        }),
        echo: title_echo(title, subtitle),
    }
}

fn action_bar_rcon(payload: &str) -> FormattedCommand {
    FormattedCommand {
        delivery: Delivery::Rcon(vec![format!("title @a actionbar {}", json_text(payload))]),
        echo: payload.to_string(),
    }
}

fn action_bar_native(payload: &str) -> FormattedCommand {
    FormattedCommand {
        delivery: Delivery::Native(NativeCall::ActionBar(payload.to_string())),
        echo: payload.to_string(),
    }
}

fn raw_rcon(command: String, payload: &str) -> FormattedCommand {
    FormattedCommand {
        delivery: Delivery::Rcon(vec![command]),
        echo: payload.to_string(),
    }
}
