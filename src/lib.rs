pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transfer;
pub mod utils;

pub use client::{Client, Request};
pub use config::ClientConfig;
pub use error::FtpClientError;
pub use transfer::Outcome;
