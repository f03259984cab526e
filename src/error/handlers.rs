//! Error handlers
//!
//! Reports fatal errors and maps them to process exit codes.

use crate::error::types::FtpClientError;
use log::error;

/// Handle a fatal FTP client error
pub fn handle_error(err: &FtpClientError) {
    error!("FTP Client Error: {}", err);
}

/// Convert error to a process exit code
pub fn error_to_exit_code(err: &FtpClientError) -> i32 {
    match err {
        FtpClientError::Validation(_) => 2,
        FtpClientError::Session(_) => 3,
        FtpClientError::Protocol(_) => 4,
        FtpClientError::Config(_) => 5,
        FtpClientError::Transfer(_) => 1,
        FtpClientError::IoError(_) => 1,
    }
}
