//! Module `commands`
//!
//! Defines the FTP commands this client sends on the control channel and
//! their wire form. Every command renders as one CRLF-terminated line.

use std::fmt;

/// Represents an FTP command sent by the client.
///
/// Commands that take arguments store them as `String` variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AuthTls,
    User(String),
    Pass(String),
    Pbsz(u32),
    ProtPrivate,
    Pasv,
    TypeImage,  // 8-bit binary transfers
    ModeStream, // Stream transfer mode
    StruFile,   // File-structured transfers
    List(String),
    Mkd(String),
    Dele(String),
    Rmd(String),
    Retr(String),
    Stor(String),
    Quit,
}

impl Command {
    /// Returns the line as it should appear in logs, with the password masked.
    pub fn log_line(&self) -> String {
        match self {
            Command::Pass(_) => "PASS ****".to_string(),
            other => other.to_string().trim_end_matches("\r\n").to_string(),
        }
    }

    /// Returns true for commands whose payload travels over a data channel.
    pub fn uses_data_channel(&self) -> bool {
        matches!(self, Command::List(_) | Command::Retr(_) | Command::Stor(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AuthTls => write!(f, "AUTH TLS\r\n"),
            Command::User(user) => write!(f, "USER {}\r\n", user),
            Command::Pass(pass) => write!(f, "PASS {}\r\n", pass),
            Command::Pbsz(size) => write!(f, "PBSZ {}\r\n", size),
            Command::ProtPrivate => write!(f, "PROT P\r\n"),
            Command::Pasv => write!(f, "PASV\r\n"),
            Command::TypeImage => write!(f, "TYPE I\r\n"),
            Command::ModeStream => write!(f, "MODE S\r\n"),
            Command::StruFile => write!(f, "STRU F\r\n"),
            Command::List(path) => write!(f, "LIST {}\r\n", path),
            Command::Mkd(path) => write!(f, "MKD {}\r\n", path),
            Command::Dele(path) => write!(f, "DELE {}\r\n", path),
            Command::Rmd(path) => write!(f, "RMD {}\r\n", path),
            Command::Retr(path) => write!(f, "RETR {}\r\n", path),
            Command::Stor(path) => write!(f, "STOR {}\r\n", path),
            Command::Quit => write!(f, "QUIT\r\n"),
        }
    }
}
