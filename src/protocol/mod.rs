//! FTP Protocol implementation
//!
//! Handles command rendering, reply parsing and operation translation.

pub mod commands;
pub mod parser;
pub mod responses;
pub mod translators;

pub use commands::Command;
pub use parser::parse_passive_response;
pub use responses::{StatusClass, StatusResponse};
pub use translators::{translate, translate_operation};
