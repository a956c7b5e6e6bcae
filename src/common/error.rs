//! Error types for the application.

use thiserror::Error;

/// Fixed reply for a command issued from a chat with no bound server.
pub const NO_SERVER_BOUND: &str = "No server is bound to this chat, nothing was sent";

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    IoError { path: String, message: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors that abort a whole dispatch.
///
/// Only a command with no target server ends up here; every per-server
/// failure is folded into the report instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("{}", NO_SERVER_BOUND)]
    NoTargetServers,
}

/// Failures raised by a transport (RCON or native) or by a collaborator
/// sitting in front of one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection closed by remote")]
    ConnectionClosed,

    #[error("protocol error: {message}")]
    Protocol { message: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("{what} can only be sent over RCON")]
    RconRequired { what: String },

    #[error("cannot build command '{kind}': {message}")]
    Parse { kind: String, message: String },
}

impl TransportError {
    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a screen-command parse error.
    pub fn parse(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_target_servers_displays_fixed_text() {
        assert_eq!(DispatchError::NoTargetServers.to_string(), NO_SERVER_BOUND);
    }

    #[test]
    fn test_transport_error_messages() {
        assert_eq!(
            TransportError::protocol("bad packet").to_string(),
            "protocol error: bad packet"
        );
        assert_eq!(
            TransportError::parse("tp", "missing target").to_string(),
            "cannot build command 'tp': missing target"
        );
        assert_eq!(
            TransportError::RconRequired {
                what: "raw command".to_string()
            }
            .to_string(),
            "raw command can only be sent over RCON"
        );
    }
}
