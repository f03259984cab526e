//! Error types
//!
//! Defines domain-specific error types for each module of the FTP client.

use std::fmt;
use std::io;

use crate::protocol::StatusResponse;

/// Control and data connection errors
#[derive(Debug)]
pub enum SessionError {
    ConnectTimeout(String),
    ConnectFailed(String, io::Error),
    InvalidServerName(String),
    NoTrustRoots,
    TlsHandshake(String, io::Error),
    ConnectionClosed,
    Io(io::Error),
    /// An error-class reply under the strict status policy.
    Rejected(StatusResponse),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ConnectTimeout(addr) => write!(f, "Timed out connecting to {}", addr),
            SessionError::ConnectFailed(addr, e) => {
                write!(f, "Failed to connect to {}: {}", addr, e)
            }
            SessionError::InvalidServerName(name) => {
                write!(f, "Invalid TLS server name: {}", name)
            }
            SessionError::NoTrustRoots => write!(f, "No usable root certificates found"),
            SessionError::TlsHandshake(name, e) => {
                write!(f, "TLS handshake with {} failed: {}", name, e)
            }
            SessionError::ConnectionClosed => write!(f, "Connection closed by server"),
            SessionError::Io(e) => write!(f, "Control channel I/O error: {}", e),
            SessionError::Rejected(reply) => write!(f, "Server rejected command: {}", reply),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(error: io::Error) -> Self {
        SessionError::Io(error)
    }
}

/// Malformed or unexpected server responses
#[derive(Debug, PartialEq)]
pub enum ProtocolError {
    MalformedStatus(String),
    MalformedPassiveResponse(String),
    InvalidPassivePort(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MalformedStatus(line) => write!(f, "Malformed status line: {}", line),
            ProtocolError::MalformedPassiveResponse(line) => {
                write!(f, "Malformed passive-mode response: {}", line)
            }
            ProtocolError::InvalidPassivePort(line) => {
                write!(f, "Invalid port values in passive-mode response: {}", line)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Byte transfer errors, split by which side of the copy failed
#[derive(Debug)]
pub enum TransferError {
    LocalIo(String, io::Error),
    DataChannel(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::LocalIo(path, e) => write!(f, "Local file error on {}: {}", path, e),
            TransferError::DataChannel(e) => write!(f, "Data channel error: {}", e),
        }
    }
}

impl std::error::Error for TransferError {}

/// Invalid operation arguments, detected before any network activity
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    MissingDirection(String),
    InvalidUrl(String),
    UnsupportedScheme(String),
    MissingCredentials(String),
    MissingHost(String),
    ArgumentMismatch(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDirection(op) => {
                write!(f, "{} requires exactly one local path and one remote URL", op)
            }
            ValidationError::InvalidUrl(u) => write!(f, "Invalid URL: {}", u),
            ValidationError::UnsupportedScheme(s) => {
                write!(f, "Unsupported scheme '{}', expected ftps://", s)
            }
            ValidationError::MissingCredentials(u) => write!(
                f,
                "URL must carry credentials in the form ftps://<user>:<pass>@<host>/<path>: {}",
                u
            ),
            ValidationError::MissingHost(u) => write!(f, "URL has no host: {}", u),
            ValidationError::ArgumentMismatch(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// General FTP client error that encompasses all error types
#[derive(Debug)]
pub enum FtpClientError {
    Session(SessionError),
    Protocol(ProtocolError),
    Transfer(TransferError),
    Validation(ValidationError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::Session(e) => write!(f, "Connection error: {}", e),
            FtpClientError::Protocol(e) => write!(f, "Protocol error: {}", e),
            FtpClientError::Transfer(e) => write!(f, "Transfer error: {}", e),
            FtpClientError::Validation(e) => write!(f, "Validation error: {}", e),
            FtpClientError::Config(e) => write!(f, "Configuration error: {}", e),
            FtpClientError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {}

impl From<SessionError> for FtpClientError {
    fn from(error: SessionError) -> Self {
        FtpClientError::Session(error)
    }
}

impl From<ProtocolError> for FtpClientError {
    fn from(error: ProtocolError) -> Self {
        FtpClientError::Protocol(error)
    }
}

impl From<TransferError> for FtpClientError {
    fn from(error: TransferError) -> Self {
        FtpClientError::Transfer(error)
    }
}

impl From<ValidationError> for FtpClientError {
    fn from(error: ValidationError) -> Self {
        FtpClientError::Validation(error)
    }
}

impl From<config::ConfigError> for FtpClientError {
    fn from(error: config::ConfigError) -> Self {
        FtpClientError::Config(error)
    }
}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        FtpClientError::IoError(error)
    }
}
