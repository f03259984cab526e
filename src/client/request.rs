//! Module `request`
//!
//! The validated input handed to the client core: where to connect, who to
//! log in as, and what to do.

use crate::client::Operation;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    host: String,
    port: u16,
    user: String,
    password: String,
    operation: Operation,
}

impl Request {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        operation: Operation,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            operation,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }
}
