//! Control session
//!
//! Connection bring-up, TLS upgrade, authentication and the command/reply
//! primitives every other module builds on.

pub mod connector;
pub mod control;
pub mod state;

pub use connector::{AsyncStream, BoxedStream, Connector, TlsConnector};
pub use control::ControlSession;
pub use state::SessionState;

use std::time::Duration;

use crate::config::{DataConnectOrder, StatusPolicy};

/// Per-connection settings handed to the control session at construction.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Identity verified on the control and data channel certificates
    pub server_name: String,
    pub connect_timeout: Duration,
    pub status_policy: StatusPolicy,
    pub data_connect_order: DataConnectOrder,
}
