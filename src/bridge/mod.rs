//! Outbound dispatch from chats to Minecraft servers.
//!
//! ## Module Structure
//!
//! - `request`: what to send, and the context of one dispatch
//! - `resolver`: chat -> bound servers
//! - `state`: per-server transport preferences
//! - `selector`: RCON or native, per server
//! - `formatter`: transport payloads per command kind
//! - `report`: per-server outcomes and the aggregate report
//! - `dispatcher`: the fan-out tying it together

pub mod dispatcher;
pub mod formatter;
pub mod report;
pub mod request;
pub mod resolver;
pub mod selector;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::Dispatcher;
pub use report::{AggregateReport, DispatchOutcome, OutcomeStatus};
pub use request::{CommandKind, CommandRequest, RawCommand, RequestContext};
pub use resolver::{SourceResolver, SourceTable};
pub use state::{ServerBinding, ServerBindings};
