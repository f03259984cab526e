//! Client core
//!
//! The top-level orchestration of one invocation, plus the operation and
//! request types it consumes.

pub mod core;
pub mod operation;
pub mod request;

pub use core::Client;
pub use operation::{Direction, Operation, OperationKind};
pub use request::Request;
