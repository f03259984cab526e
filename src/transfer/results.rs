//! Transfer result types
//!
//! Defines result structures returned by negotiation and by operations.

use std::fmt;

use crate::protocol::StatusResponse;
use crate::transfer::data_channel::DataChannel;

/// Result of asking the server for a data channel
pub enum Negotiation {
    /// The command was accepted and the secured channel is ready for payload.
    Ready(DataChannel),
    /// The command drew an error reply; no data connection was kept.
    Rejected(StatusResponse),
}

/// Per-operation result. Fatal failures are returned as errors instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Finished; carries the server's final reply.
    Completed(StatusResponse),
    /// The server refused the command.
    Rejected(StatusResponse),
    /// A local file could not be opened, created, read, written or removed.
    LocalFailure(String),
    /// The data channel broke mid-transfer.
    Aborted(String),
    /// A move copied the file but the server did not confirm the transfer,
    /// so the source was left in place.
    CopiedNotMoved(StatusResponse),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed(reply) => write!(f, "Completed: {}", reply),
            Outcome::Rejected(reply) => write!(f, "Rejected by server: {}", reply),
            Outcome::LocalFailure(msg) => write!(f, "Local failure: {}", msg),
            Outcome::Aborted(msg) => write!(f, "Transfer aborted: {}", msg),
            Outcome::CopiedNotMoved(reply) => {
                write!(f, "Copied but not moved, source kept: {}", reply)
            }
        }
    }
}
