//! Per-server outcomes and the aggregate report sent back to the chat.

use std::fmt;

/// Separator between report lines.
pub const SEPARATOR: &str = "\n";

/// Marker for a server whose bot is not connected.
pub const BOT_NOT_FOUND: &str = "server bot not found";

/// Marker for a server configured for RCON without a live RCON connection.
pub const RCON_UNAVAILABLE: &str = "RCON unavailable";

/// Marker for a failed transport call.
pub const TRANSPORT_FAILED: &str = "failed";

/// How delivery to one server ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Delivered,
    BotNotFound,
    RconUnavailable,
    TransportError,
}

/// Result of delivering one request to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub server_name: String,
    pub status: OutcomeStatus,
    /// What was sent, when the request got as far as formatting.
    pub echo: Option<String>,
    /// Response text or failure description.
    pub detail: String,
}

impl DispatchOutcome {
    pub fn delivered(server_name: &str, echo: String, detail: String) -> Self {
        Self {
            server_name: server_name.to_string(),
            status: OutcomeStatus::Delivered,
            echo: Some(echo),
            detail,
        }
    }

    pub fn bot_not_found(server_name: &str) -> Self {
        Self {
            server_name: server_name.to_string(),
            status: OutcomeStatus::BotNotFound,
            echo: None,
            detail: String::new(),
        }
    }

    pub fn rcon_unavailable(server_name: &str, echo: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            server_name: server_name.to_string(),
            status: OutcomeStatus::RconUnavailable,
            echo,
            detail: detail.into(),
        }
    }

    pub fn transport_error(server_name: &str, echo: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            server_name: server_name.to_string(),
            status: OutcomeStatus::TransportError,
            echo,
            detail: detail.into(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.status == OutcomeStatus::Delivered
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.server_name)?;
        if let Some(echo) = &self.echo {
            write!(f, "{} => ", echo)?;
        }
        match self.status {
            OutcomeStatus::Delivered => write!(f, "{}", self.detail),
            OutcomeStatus::BotNotFound => write!(f, "{}", BOT_NOT_FOUND),
            OutcomeStatus::RconUnavailable => write!(f, "{}: {}", RCON_UNAVAILABLE, self.detail),
            OutcomeStatus::TransportError => write!(f, "{}: {}", TRANSPORT_FAILED, self.detail),
        }
    }
}

/// Status lines of one dispatch, in server-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    text: String,
    lines: usize,
    delivered: usize,
}

impl AggregateReport {
    pub fn from_outcomes(outcomes: &[DispatchOutcome]) -> Self {
        let mut text = String::new();
        for outcome in outcomes {
            text.push_str(&outcome.to_string());
            text.push_str(SEPARATOR);
        }
        if text.ends_with(SEPARATOR) {
            text.truncate(text.len() - SEPARATOR.len());
        }

        Self {
            text,
            lines: outcomes.len(),
            delivered: outcomes.iter().filter(|o| o.is_delivered()).count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of servers reported on.
    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// What the caller gets back: the report for commands, nothing for relays.
    pub fn into_reply(self, is_command: bool) -> String {
        if is_command {
            self.text
        } else {
            String::new()
        }
    }
}
