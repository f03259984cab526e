//! FTP Response handling
//!
//! Parses status replies read from the control channel and classifies them
//! by the first digit of their code.

use std::fmt;

use crate::error::ProtocolError;

/// Standard FTP response codes the client refers to by name
pub const READY: u16 = 220;
pub const CLOSING: u16 = 221;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const PASSIVE_MODE: u16 = 227;
pub const AUTH_OK: u16 = 234;

/// Reply class, decided by the first digit of the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Preliminary,       // 1xx
    Completion,        // 2xx
    Intermediate,      // 3xx
    TransientNegative, // 4xx
    PermanentNegative, // 5xx
    Protected,         // 6xx
}

impl StatusClass {
    /// Classifies a reply by the first digit of its code.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(StatusClass::Preliminary),
            '2' => Some(StatusClass::Completion),
            '3' => Some(StatusClass::Intermediate),
            '4' => Some(StatusClass::TransientNegative),
            '5' => Some(StatusClass::PermanentNegative),
            '6' => Some(StatusClass::Protected),
            _ => None,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            StatusClass::TransientNegative | StatusClass::PermanentNegative | StatusClass::Protected
        )
    }
}

/// One status reply: the numeric code plus the text that followed it.
///
/// For multi-line replies `text` holds every line joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    code: u16,
    class: StatusClass,
    text: String,
}

impl StatusResponse {
    /// Parses a single status line such as `226 Transfer complete\r\n`.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let code = parse_code(trimmed)
            .ok_or_else(|| ProtocolError::MalformedStatus(trimmed.to_string()))?;
        let class = trimmed
            .chars()
            .next()
            .and_then(StatusClass::from_digit)
            .ok_or_else(|| ProtocolError::MalformedStatus(trimmed.to_string()))?;

        Ok(Self {
            code,
            class,
            text: trimmed[3..].trim_start_matches([' ', '-']).to_string(),
        })
    }

    /// Returns true when the line opens a multi-line reply (`123-...`).
    pub fn opens_multiline(line: &str) -> bool {
        parse_code(line).is_some() && line.as_bytes().get(3) == Some(&b'-')
    }

    /// Returns true when `line` terminates a multi-line reply started with `code`.
    pub fn closes_multiline(code: u16, line: &str) -> bool {
        parse_code(line) == Some(code) && line.as_bytes().get(3) != Some(&b'-')
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn class(&self) -> StatusClass {
        self.class
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.class.is_error()
    }

    pub fn is_success(&self) -> bool {
        !self.is_error()
    }
}

impl fmt::Display for StatusResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

/// Reads the leading three-digit code of a reply line, if it has one.
fn parse_code(line: &str) -> Option<u16> {
    let digits = line.get(0..3)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match line.as_bytes().get(3) {
        None | Some(b' ') | Some(b'-') => {}
        Some(_) => return None,
    }
    digits.parse().ok()
}
