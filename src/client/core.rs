use log::{info, warn};
use tokio::io::AsyncWrite;

use crate::client::Request;
use crate::config::ClientConfig;
use crate::error::FtpClientError;
use crate::protocol::translate_operation;
use crate::session::{Connector, ControlSession};
use crate::transfer::{LocalStore, Outcome, execute};

/// One invocation: a single control session running a single operation.
pub struct Client<C> {
    config: ClientConfig,
    connector: C,
}

impl<C: Connector> Client<C> {
    pub fn new(config: ClientConfig, connector: C) -> Self {
        Self { config, connector }
    }

    /// Connects, logs in, runs the request's operation and always tries to
    /// send QUIT on the way out, whatever happened before.
    pub async fn run<L, W>(
        self,
        request: &Request,
        local: &L,
        sink: &mut W,
    ) -> Result<Outcome, FtpClientError>
    where
        L: LocalStore,
        W: AsyncWrite + Unpin + ?Sized,
    {
        // Reject malformed operations before touching the network
        translate_operation(request.operation())?;

        let settings = self.config.session_settings(request.host());
        info!(
            "Connecting to {}:{} as {} (TLS name {})",
            request.host(),
            request.port(),
            request.user(),
            settings.server_name
        );

        let mut session =
            ControlSession::open(self.connector, request.host(), request.port(), settings).await?;

        let result = async {
            session.read_greeting().await?;
            session
                .authenticate(request.user(), request.password())
                .await?;
            execute(&mut session, local, request.operation(), sink).await
        }
        .await;

        if let Err(e) = session.quit().await {
            warn!("QUIT did not complete cleanly: {}", e);
        }

        result
    }
}
