//! Fan-out of one request to every server bound to its chat.
//!
//! Each server is handled independently: a missing bot, an unavailable
//! RCON connection or a failing transport only affects that server's line
//! in the report. The only request that is rejected as a whole is a command
//! issued from a chat with no bound server.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::bridge::formatter::{CommandFormatter, Delivery, NativeCall};
use crate::bridge::report::{AggregateReport, DispatchOutcome};
use crate::bridge::request::{CommandKind, CommandRequest, RequestContext, LITERAL_COMMAND};
use crate::bridge::resolver::SourceResolver;
use crate::bridge::selector::{select, Selection};
use crate::bridge::state::{ServerBinding, ServerBindings};
use crate::chat::event::ChatEvent;
use crate::chat::permission::{PermissionGate, PERMISSION_DENIED};
use crate::common::error::{DispatchError, TransportError, TransportResult};
use crate::config::types::Config;
use crate::minecraft::text::ChatRenderOptions;
use crate::minecraft::transport::{
    rcon_text, ConnectionRegistry, RconTransport, ScreenCommandParser, ServerHandle,
};

/// Detail recorded for a successful native call, which returns no text.
pub const NATIVE_OK: &str = "ok";

/// Sends requests to the servers bound to a chat and reports the results.
pub struct Dispatcher {
    resolver: SourceResolver,
    bindings: ServerBindings,
    registry: Arc<dyn ConnectionRegistry>,
    parser: Arc<dyn ScreenCommandParser>,
    chat: ChatRenderOptions,
}

impl Dispatcher {
    pub fn new(
        resolver: SourceResolver,
        bindings: ServerBindings,
        registry: Arc<dyn ConnectionRegistry>,
        parser: Arc<dyn ScreenCommandParser>,
    ) -> Self {
        Self {
            resolver,
            bindings,
            registry,
            parser,
            chat: ChatRenderOptions::default(),
        }
    }

    /// Create a dispatcher with routing and transport preferences from configuration.
    pub fn from_config(
        config: &Config,
        registry: Arc<dyn ConnectionRegistry>,
        parser: Arc<dyn ScreenCommandParser>,
    ) -> Self {
        Self::new(
            SourceResolver::from_config(config),
            ServerBindings::from_config(config),
            registry,
            parser,
        )
        .with_chat_options(ChatRenderOptions {
            send_source_name: config.chat.send_source_name,
        })
    }

    pub fn with_chat_options(mut self, chat: ChatRenderOptions) -> Self {
        self.chat = chat;
        self
    }

    pub fn resolver(&self) -> &SourceResolver {
        &self.resolver
    }

    /// Run a console command verbatim on every bound server.
    pub async fn send_command(&self, event: &ChatEvent, command: &str) -> Result<String, DispatchError> {
        self.dispatch(event, &CommandRequest::new(CommandKind::raw(LITERAL_COMMAND), command))
            .await
    }

    /// Run a shorthand command, expanded by the screen-command parser.
    pub async fn send_screen_command(
        &self,
        event: &ChatEvent,
        label: &str,
        payload: &str,
    ) -> Result<String, DispatchError> {
        self.dispatch(event, &CommandRequest::new(CommandKind::raw(label), payload))
            .await
    }

    /// Show a title to every player. A newline separates title and subtitle.
    pub async fn send_title(&self, event: &ChatEvent, text: &str) -> Result<String, DispatchError> {
        self.dispatch(event, &CommandRequest::new(CommandKind::Title, text))
            .await
    }

    pub async fn send_action_bar(&self, event: &ChatEvent, text: &str) -> Result<String, DispatchError> {
        self.dispatch(event, &CommandRequest::new(CommandKind::ActionBar, text))
            .await
    }

    /// Relay a chat message. Always returns an empty string.
    pub async fn send_message(&self, event: &ChatEvent) -> String {
        if !self.resolver.should_relay(event) {
            return String::new();
        }

        self.dispatch(event, &CommandRequest::chat_message())
            .await
            .unwrap_or_default()
    }

    /// Check the sender's permission, then dispatch a command.
    ///
    /// Returns the text to answer the chat with: the report, the no-server
    /// message, or the permission-denied message.
    pub async fn run_command(
        &self,
        gate: &PermissionGate,
        event: &ChatEvent,
        request: &CommandRequest,
    ) -> String {
        if !gate.check(event).await {
            info!(
                source = %event.source_key(),
                user = %event.sender().user_id,
                "Command rejected: insufficient permission"
            );
            return PERMISSION_DENIED.to_string();
        }

        match self.dispatch(event, request).await {
            Ok(report) => report,
            Err(e) => e.to_string(),
        }
    }

    /// Deliver a request to every server bound to the event's chat.
    ///
    /// Commands return the report, one line per server in binding order.
    /// Chat messages return an empty string; their report is only logged.
    pub async fn dispatch(
        &self,
        event: &ChatEvent,
        request: &CommandRequest,
    ) -> Result<String, DispatchError> {
        let source = event.source_key();
        let servers = self.resolver.resolve(event);

        if servers.is_empty() {
            if request.is_command() {
                info!(source = %source, "Command from a chat with no bound server");
                return Err(DispatchError::NoTargetServers);
            }
            debug!(source = %source, "No server bound, message not relayed");
            return Ok(String::new());
        }

        let ctx = RequestContext::new(event, request, source, servers);
        let outcomes = self.deliver(&ctx).await;
        let report = AggregateReport::from_outcomes(&outcomes);

        debug!(
            source = %ctx.source,
            servers = report.len(),
            delivered = report.delivered(),
            "Dispatch report:\n{}",
            report.text()
        );

        Ok(report.into_reply(request.is_command()))
    }

    /// Deliver to every server in the context, concurrently.
    ///
    /// Outcomes come back in the order of `ctx.servers`.
    pub async fn deliver(&self, ctx: &RequestContext<'_>) -> Vec<DispatchOutcome> {
        info!(
            source = %ctx.source,
            kind = ?ctx.request.kind,
            servers = ctx.servers.len(),
            "Dispatching to {}",
            ctx.servers.join(", ")
        );

        join_all(ctx.servers.iter().map(|server| self.deliver_to(ctx, server))).await
    }

    async fn deliver_to(&self, ctx: &RequestContext<'_>, server: &str) -> DispatchOutcome {
        let Some(handle) = self.registry.lookup(server) else {
            warn!(server, "Server bot not found");
            return DispatchOutcome::bot_not_found(server);
        };

        let binding = self
            .bindings
            .get(server)
            .cloned()
            .unwrap_or_else(|| ServerBinding::native_only(server));
        let rcon = handle.rcon();
        let is_command = ctx.request.is_command();

        let transport = match select(&binding, rcon.is_some(), is_command) {
            Selection::Use(transport) => transport,
            Selection::RconUnavailable => {
                let detail = format!(
                    "RCON is enabled for {} but not connected",
                    if is_command { "commands" } else { "messages" }
                );
                warn!(server, "{}", detail);
                return DispatchOutcome::rcon_unavailable(server, request_echo(ctx.request), detail);
            }
        };

        let formatter = CommandFormatter::new(self.parser.as_ref(), self.chat);
        let formatted = match formatter.format(ctx.event, ctx.request, transport) {
            Ok(formatted) => formatted,
            Err(e @ TransportError::RconRequired { .. }) => {
                warn!(server, error = %e, "Request needs RCON");
                return DispatchOutcome::rcon_unavailable(server, request_echo(ctx.request), e.to_string());
            }
            Err(e) => {
                warn!(server, error = %e, "Failed to format request");
                return DispatchOutcome::transport_error(server, request_echo(ctx.request), e.to_string());
            }
        };

        debug!(server, ?transport, "Sending: {}", formatted.echo);

        match execute(handle.as_ref(), rcon.as_deref(), &formatted.delivery).await {
            Ok(detail) => DispatchOutcome::delivered(server, formatted.echo, detail),
            Err(e) => {
                warn!(server, ?transport, error = %e, "Transport call failed");
                DispatchOutcome::transport_error(server, Some(formatted.echo), e.to_string())
            }
        }
    }
}

/// Echo for a request that never got formatted.
fn request_echo(request: &CommandRequest) -> Option<String> {
    request
        .is_command()
        .then(|| request.payload.replace('\n', " / "))
}

async fn execute(
    handle: &dyn ServerHandle,
    rcon: Option<&dyn RconTransport>,
    delivery: &Delivery,
) -> TransportResult<String> {
    match delivery {
        Delivery::Rcon(commands) => {
            let rcon = rcon.ok_or(TransportError::ConnectionClosed)?;
            let mut detail = String::new();
            for command in commands {
                detail.push_str(&rcon_text(rcon, command).await?);
            }
            Ok(detail)
        }
        Delivery::Native(call) => {
            match call {
                NativeCall::Message(components) => handle.send_message(components).await?,
                NativeCall::Title { title, subtitle } => handle.send_title(title, subtitle).await?,
                NativeCall::ActionBar(text) => handle.send_actionbar(text).await?,
            }
            Ok(NATIVE_OK.to_string())
        }
    }
}
