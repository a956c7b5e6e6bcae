//! Minecraft JSON text components.
//!
//! Chat messages relayed to a server are rendered as a list of text
//! components: an optional `[source]` prefix, the sender, then one component
//! per message segment. Over RCON the list becomes a `tellraw` argument;
//! over the native protocol it is sent as-is.

use serde::Serialize;

use crate::chat::event::ChatEvent;
use crate::chat::message::Segment;
use crate::common::error::{TransportError, TransportResult};

/// Click action attached to a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickEvent {
    pub action: String,
    pub value: String,
}

/// A single JSON text component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(rename = "clickEvent", skip_serializing_if = "Option::is_none")]
    pub click_event: Option<ClickEvent>,
}

impl TextComponent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            underlined: None,
            click_event: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underlined = Some(true);
        self
    }

    pub fn open_url(mut self, url: impl Into<String>) -> Self {
        self.click_event = Some(ClickEvent {
            action: "open_url".to_string(),
            value: url.into(),
        });
        self
    }
}

/// Options for rendering a relayed chat message.
#[derive(Debug, Clone, Copy)]
pub struct ChatRenderOptions {
    /// Prefix the message with the group/guild name.
    pub send_source_name: bool,
}

impl Default for ChatRenderOptions {
    fn default() -> Self {
        Self {
            send_source_name: true,
        }
    }
}

/// A chat message rendered for a Minecraft server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChat {
    pub components: Vec<TextComponent>,
    /// What a reader sees, used to echo the message in reports.
    pub plain: String,
}

/// Render a chat event into text components.
pub fn render_chat(event: &ChatEvent, options: ChatRenderOptions) -> RenderedChat {
    let mut components = Vec::new();

    if options.send_source_name {
        if let Some(name) = event.source_name() {
            components.push(TextComponent::plain(format!("[{}] ", name)).with_color("gold"));
        }
    }

    components.push(TextComponent::plain(event.sender().nickname.clone()).with_color("green"));
    components.push(TextComponent::plain(": "));

    for segment in &event.message().segments {
        components.push(segment_component(segment));
    }

    let plain = components.iter().map(|c| c.text.as_str()).collect();
    RenderedChat { components, plain }
}

fn segment_component(segment: &Segment) -> TextComponent {
    let component = TextComponent::plain(segment.display_text());
    match segment {
        Segment::Text(_) => component,
        Segment::Mention { .. } => component.with_color("aqua"),
        Segment::Image { url: Some(url) } => component
            .with_color("light_purple")
            .underlined()
            .open_url(url.clone()),
        Segment::Image { url: None } => component.with_color("light_purple"),
        Segment::Reply => component.with_color("gray"),
        Segment::Face | Segment::Other(_) => component,
    }
}

/// Replace single quotes with double quotes in every string a component carries.
pub fn normalize_quotes(components: &[TextComponent]) -> Vec<TextComponent> {
    components
        .iter()
        .map(|c| TextComponent {
            text: unquote(&c.text),
            color: c.color.as_deref().map(unquote),
            underlined: c.underlined,
            click_event: c.click_event.as_ref().map(|click| ClickEvent {
                action: unquote(&click.action),
                value: unquote(&click.value),
            }),
        })
        .collect()
}

fn unquote(text: &str) -> String {
    text.replace('\'', "\"")
}

/// Build a `tellraw` command broadcasting the components to every player.
///
/// Quotes are normalized first, so the command never contains `'`.
pub fn tellraw_command(components: &[TextComponent]) -> TransportResult<String> {
    let json = serde_json::to_string(&normalize_quotes(components))
        .map_err(|e| TransportError::protocol(e.to_string()))?;
    Ok(format!("tellraw @a {}", json))
}

/// JSON text argument holding a single string, e.g. `["Hello"]`.
pub fn json_text(text: &str) -> String {
    serde_json::json!([text]).to_string()
}
