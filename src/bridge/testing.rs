//! Recording fakes for dispatcher tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::chat::event::{ChatEvent, OneBotGroupEvent, Sender};
use crate::chat::message::ChatMessage;
use crate::common::error::{TransportError, TransportResult};
use crate::config::types::*;
use crate::minecraft::text::TextComponent;
use crate::minecraft::transport::{RconTransport, ScreenCommandParser, ServerHandle, SharedRegistry};

pub const BOT_ID: u64 = 1000;
pub const BOUND_GROUP: u64 = 123;

/// A call observed on a fake transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Rcon(String),
    Message(Vec<TextComponent>),
    Title(String, String),
    ActionBar(String),
}

impl Call {
    pub fn is_rcon(&self) -> bool {
        matches!(self, Call::Rcon(_))
    }
}

type CallLog = Arc<Mutex<Vec<(String, Call)>>>;

fn record(log: &CallLog, server: &str, call: Call) {
    log.lock().unwrap().push((server.to_string(), call));
}

/// RCON fake answering `ran <command>`.
pub struct FakeRcon {
    server: String,
    log: CallLog,
    fail: Option<TransportError>,
    empty: bool,
}

#[async_trait]
impl RconTransport for FakeRcon {
    async fn send_cmd(&self, command: &str) -> TransportResult<Vec<String>> {
        record(&self.log, &self.server, Call::Rcon(command.to_string()));
        if let Some(e) = &self.fail {
            return Err(e.clone());
        }
        if self.empty {
            return Ok(Vec::new());
        }
        Ok(vec![format!("ran {}", command), "ignored".to_string()])
    }
}

pub struct FakeServer {
    name: String,
    log: CallLog,
    rcon: Option<Arc<FakeRcon>>,
    native_fail: Option<TransportError>,
    delay: Duration,
}

impl FakeServer {
    async fn native(&self, call: Call) -> TransportResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        record(&self.log, &self.name, call);
        match &self.native_fail {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ServerHandle for FakeServer {
    fn rcon(&self) -> Option<Arc<dyn RconTransport>> {
        self.rcon
            .clone()
            .map(|rcon| rcon as Arc<dyn RconTransport>)
    }

    async fn send_message(&self, message: &[TextComponent]) -> TransportResult<()> {
        self.native(Call::Message(message.to_vec())).await
    }

    async fn send_title(&self, title: &str, subtitle: &str) -> TransportResult<()> {
        self.native(Call::Title(title.to_string(), subtitle.to_string()))
            .await
    }

    async fn send_actionbar(&self, text: &str) -> TransportResult<()> {
        self.native(Call::ActionBar(text.to_string())).await
    }
}

/// How a fake server is connected.
#[derive(Debug, Clone, Default)]
pub struct ServerSetup {
    pub rcon: bool,
    pub rcon_fail: Option<TransportError>,
    pub rcon_empty: bool,
    pub native_fail: Option<TransportError>,
    pub delay: Duration,
}

impl ServerSetup {
    pub fn native() -> Self {
        Self::default()
    }

    pub fn with_rcon() -> Self {
        Self {
            rcon: true,
            ..Self::default()
        }
    }
}

/// Registry of fake servers sharing one call log.
#[derive(Default)]
pub struct FakeNetwork {
    pub registry: Arc<SharedRegistry>,
    log: CallLog,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, name: &str, setup: ServerSetup) {
        let rcon = setup.rcon.then(|| {
            Arc::new(FakeRcon {
                server: name.to_string(),
                log: Arc::clone(&self.log),
                fail: setup.rcon_fail.clone(),
                empty: setup.rcon_empty,
            })
        });
        let server = FakeServer {
            name: name.to_string(),
            log: Arc::clone(&self.log),
            rcon,
            native_fail: setup.native_fail,
            delay: setup.delay,
        };
        self.registry.register(name, Arc::new(server));
    }

    pub fn calls(&self) -> Vec<(String, Call)> {
        self.log.lock().unwrap().clone()
    }

    pub fn calls_for(&self, server: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == server)
            .map(|(_, call)| call)
            .collect()
    }
}

/// Expands `kick`, `say` and `tp` into `<label> <payload>`.
pub struct PrefixParser;

impl ScreenCommandParser for PrefixParser {
    fn parse(&self, kind: &str, payload: &str) -> TransportResult<String> {
        match kind {
            "kick" | "say" | "tp" => Ok(format!("{} {}", kind, payload)),
            _ => Err(TransportError::parse(kind, "unknown command")),
        }
    }
}

/// Config binding every listed server, in order, to the OneBot group `BOUND_GROUP`.
///
/// Each entry is `(name, rcon_for_commands, rcon_for_messages)`.
pub fn config(servers: &[(&str, bool, bool)]) -> Config {
    Config {
        servers: servers
            .iter()
            .map(|&(name, command, message)| ServerConfig {
                name: name.to_string(),
                rcon: RconConfig { command, message },
                groups: vec![GroupBinding {
                    platform: "onebot".to_string(),
                    group_id: BOUND_GROUP.to_string(),
                }],
                guilds: Vec::new(),
            })
            .collect(),
        chat: ChatConfig::default(),
        permissions: PermissionsConfig::default(),
    }
}

fn event_in(group_id: u64, user_id: &str, text: &str) -> ChatEvent {
    ChatEvent::OneBotGroup(OneBotGroupEvent {
        self_id: BOT_ID,
        group_id,
        group_name: Some("Crafters".to_string()),
        sender: Sender::new(user_id, "Steve"),
        message: ChatMessage::text(text),
    })
}

/// Message from a member of the bound group.
pub fn group_event(text: &str) -> ChatEvent {
    event_in(BOUND_GROUP, "2", text)
}

/// Message from a group no server is bound to.
pub fn unbound_event(text: &str) -> ChatEvent {
    event_in(999, "2", text)
}

/// Message the bot itself posted in the bound group.
pub fn own_event(text: &str) -> ChatEvent {
    event_in(BOUND_GROUP, &BOT_ID.to_string(), text)
}
