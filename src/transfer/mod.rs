//! Transfer module for the FTP client
//!
//! Handles passive data-channel negotiation, byte transfer between the data
//! channel and local files, and sequencing of list/copy/move operations.

pub mod data_channel;
pub mod file_ops;
pub mod negotiator;
pub mod orchestrator;
pub mod results;

// Re-export key types and functions
pub use data_channel::DataChannel;
pub use file_ops::{LocalFs, LocalStore};
pub use negotiator::negotiate;
pub use orchestrator::execute;
pub use results::{Negotiation, Outcome};
