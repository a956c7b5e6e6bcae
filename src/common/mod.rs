//! Common utilities and types shared across the application.

pub mod error;

pub use error::{ConfigError, DispatchError, TransportError, TransportResult, NO_SERVER_BOUND};
