//! Module `control`
//!
//! Owns the single control connection: line-level send/receive, reply
//! parsing, the explicit TLS upgrade and the login sequence.

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::StatusPolicy;
use crate::error::{FtpClientError, SessionError};
use crate::protocol::responses::{AUTH_OK, CLOSING, READY};
use crate::protocol::{Command, StatusResponse};
use crate::session::connector::{BoxedStream, Connector};
use crate::session::state::SessionState;
use crate::session::SessionSettings;

/// One control connection and everything needed to run commands over it.
pub struct ControlSession<C> {
    stream: Option<BufReader<BoxedStream>>,
    connector: C,
    settings: SessionSettings,
    state: SessionState,
    secure: bool,
    welcome: Option<StatusResponse>,
}

impl<C: Connector> ControlSession<C> {
    /// Opens the control connection to `host:port`. The greeting is left
    /// unread; see [`ControlSession::read_greeting`].
    pub async fn open(
        connector: C,
        host: &str,
        port: u16,
        settings: SessionSettings,
    ) -> Result<Self, SessionError> {
        let addr = format!("{}:{}", host, port);
        let stream = connector.connect(&addr, settings.connect_timeout).await?;

        Ok(Self {
            stream: Some(BufReader::new(stream)),
            connector,
            settings,
            state: SessionState::Unauthenticated,
            secure: false,
            welcome: None,
        })
    }

    /// Reads the server greeting, the first reply on a new connection.
    pub async fn read_greeting(&mut self) -> Result<&StatusResponse, FtpClientError> {
        let greeting = self.read_reply().await?;
        if greeting.code() != READY {
            warn!("Unexpected greeting: {}", greeting);
        }
        Ok(self.welcome.insert(greeting))
    }

    /// Writes one CRLF-terminated command line.
    pub async fn send(&mut self, command: &Command) -> Result<(), SessionError> {
        debug!("-> {}", command.log_line());
        let stream = self.stream_mut()?.get_mut();
        stream.write_all(command.to_string().as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Reads one line up to and including `\n`; empty at end of stream.
    pub async fn receive_line(&mut self) -> Result<String, SessionError> {
        let mut buf = Vec::new();
        self.stream_mut()?.read_until(b'\n', &mut buf).await?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Reads one status reply, folding multi-line replies into one.
    pub async fn read_reply(&mut self) -> Result<StatusResponse, FtpClientError> {
        let line = self.receive_line().await?;
        if line.is_empty() {
            return Err(SessionError::ConnectionClosed.into());
        }

        let first = line.trim_end_matches(['\r', '\n']).to_string();
        let mut reply = StatusResponse::parse(&first)?;

        if StatusResponse::opens_multiline(&first) {
            let mut text = vec![reply.text().to_string()];
            loop {
                let next = self.receive_line().await?;
                if next.is_empty() {
                    return Err(SessionError::ConnectionClosed.into());
                }
                let next = next.trim_end_matches(['\r', '\n']);
                if StatusResponse::closes_multiline(reply.code(), next) {
                    text.push(next[3..].trim_start().to_string());
                    break;
                }
                text.push(next.to_string());
            }
            reply = reply.with_text(text.join("\n"));
        }

        info!("<- {}", reply);
        Ok(reply)
    }

    /// Sends a command and reads its reply.
    pub async fn exchange(&mut self, command: &Command) -> Result<StatusResponse, FtpClientError> {
        self.send(command).await?;
        self.read_reply().await
    }

    /// Sends a command, reads its reply and applies the status policy to it.
    pub async fn exchange_checked(
        &mut self,
        command: &Command,
    ) -> Result<StatusResponse, FtpClientError> {
        let reply = self.exchange(command).await?;
        self.check(reply)
    }

    /// Wraps the control stream in TLS, verifying the configured server name.
    pub async fn upgrade_to_secure(&mut self) -> Result<(), FtpClientError> {
        let stream = self
            .stream
            .take()
            .ok_or(SessionError::ConnectionClosed)?
            .into_inner();
        self.state = SessionState::TlsNegotiating;

        match self.connector.secure(stream, &self.settings.server_name).await {
            Ok(secured) => {
                self.stream = Some(BufReader::new(secured));
                self.secure = true;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Closed;
                Err(e.into())
            }
        }
    }

    /// Runs the fixed login sequence: AUTH TLS, TLS upgrade, USER, PBSZ 0,
    /// PROT P, PASS.
    pub async fn authenticate(&mut self, user: &str, pass: &str) -> Result<(), FtpClientError> {
        let auth = self.exchange_checked(&Command::AuthTls).await?;
        if auth.code() != AUTH_OK {
            warn!("AUTH TLS answered with {}, upgrading anyway", auth);
        }
        self.upgrade_to_secure().await?;
        self.exchange_checked(&Command::User(user.to_string())).await?;
        self.exchange_checked(&Command::Pbsz(0)).await?;
        self.exchange_checked(&Command::ProtPrivate).await?;
        self.exchange_checked(&Command::Pass(pass.to_string())).await?;

        self.state = SessionState::Authenticated;
        info!("Logged in as {}", user);
        Ok(())
    }

    /// Sends QUIT, reads the farewell and closes the stream.
    ///
    /// Safe to call more than once; only the first call touches the network.
    pub async fn quit(&mut self) -> Result<Option<StatusResponse>, FtpClientError> {
        if self.state.is_closed() || self.stream.is_none() {
            self.state = SessionState::Closed;
            self.stream = None;
            return Ok(None);
        }

        let result = self.exchange(&Command::Quit).await;
        if let Ok(reply) = &result {
            if reply.code() != CLOSING {
                debug!("Unexpected QUIT reply: {}", reply);
            }
        }
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.get_mut().shutdown().await {
                debug!("Control stream shutdown: {}", e);
            }
        }
        self.state = SessionState::Closed;
        info!("Control connection closed");

        result.map(Some)
    }

    /// Applies the status policy to one reply of an unconditional sequence.
    fn check(&self, reply: StatusResponse) -> Result<StatusResponse, FtpClientError> {
        if reply.is_error() {
            match self.settings.status_policy {
                StatusPolicy::Strict => return Err(SessionError::Rejected(reply).into()),
                StatusPolicy::Lenient => warn!("Continuing after error reply: {}", reply),
            }
        }
        Ok(reply)
    }

    fn stream_mut(&mut self) -> Result<&mut BufReader<BoxedStream>, SessionError> {
        self.stream.as_mut().ok_or(SessionError::ConnectionClosed)
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns whether the control stream runs over TLS.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the server greeting read on connect.
    pub fn welcome(&self) -> Option<&StatusResponse> {
        self.welcome.as_ref()
    }
}
