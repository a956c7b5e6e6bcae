//! RCON vs native transport selection.

use crate::bridge::state::ServerBinding;

/// Transport a request is delivered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Rcon,
    Native,
}

/// Outcome of transport selection for one server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Use(Transport),
    /// RCON is configured for this operation but not connected.
    RconUnavailable,
}

/// Pick the transport for one server.
///
/// Commands follow `rcon_cmd_enabled`, chat messages `rcon_msg_enabled`. An
/// enabled flag without a live RCON connection does not fall back to native.
pub fn select(binding: &ServerBinding, has_live_rcon: bool, is_command: bool) -> Selection {
    let wants_rcon = if is_command {
        binding.rcon_cmd_enabled
    } else {
        binding.rcon_msg_enabled
    };

    match (wants_rcon, has_live_rcon) {
        (true, true) => Selection::Use(Transport::Rcon),
        (true, false) => Selection::RconUnavailable,
        (false, _) => Selection::Use(Transport::Native),
    }
}
