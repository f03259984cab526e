//! Transport factory
//!
//! The session core never names a concrete socket type. It asks a
//! [`Connector`] to open a duplex byte stream and, when required, to wrap an
//! existing stream in TLS.

use log::{debug, info};
use rustls::pki_types::ServerName;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::error::SessionError;

/// Any duplex byte stream a channel can run over.
pub trait AsyncStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> AsyncStream for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

/// The stream type carried by control and data channels.
pub type BoxedStream = Box<dyn AsyncStream>;

/// Opens plain streams and upgrades them to secure ones.
#[allow(async_fn_in_trait)]
pub trait Connector {
    /// Opens a stream to `addr` (`host:port`), failing after `timeout`.
    async fn connect(&self, addr: &str, timeout: Duration) -> Result<BoxedStream, SessionError>;

    /// Runs a TLS client handshake over `stream`, verifying `server_name`.
    async fn secure(&self, stream: BoxedStream, server_name: &str)
    -> Result<BoxedStream, SessionError>;
}

/// TCP + rustls connector used by the binary.
///
/// One `ClientConfig` backs every handshake, so data channels can resume the
/// control channel's TLS session.
#[derive(Clone)]
pub struct TlsConnector {
    inner: tokio_rustls::TlsConnector,
}

impl TlsConnector {
    /// Builds a connector trusting the system's native root certificates.
    pub fn new() -> Result<Self, SessionError> {
        let mut roots = rustls::RootCertStore::empty();
        let native = rustls_native_certs::load_native_certs();
        for err in native.errors {
            debug!("Skipping native certificate source: {}", err);
        }
        for cert in native.certs {
            if let Err(e) = roots.add(cert) {
                debug!("Skipping unusable root certificate: {}", e);
            }
        }
        if roots.is_empty() {
            return Err(SessionError::NoTrustRoots);
        }
        debug!("Loaded {} root certificates", roots.len());

        let config = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        Ok(Self::with_config(Arc::new(config)))
    }

    /// Builds a connector around a caller-supplied rustls configuration.
    pub fn with_config(config: Arc<rustls::ClientConfig>) -> Self {
        Self {
            inner: tokio_rustls::TlsConnector::from(config),
        }
    }
}

impl Connector for TlsConnector {
    async fn connect(&self, addr: &str, timeout: Duration) -> Result<BoxedStream, SessionError> {
        let stream = connect_tcp(addr, timeout).await?;
        Ok(Box::new(stream))
    }

    async fn secure(
        &self,
        stream: BoxedStream,
        server_name: &str,
    ) -> Result<BoxedStream, SessionError> {
        let name = ServerName::try_from(server_name.to_string())
            .map_err(|_| SessionError::InvalidServerName(server_name.to_string()))?;

        debug!("Starting TLS handshake with {}", server_name);
        let secured = self
            .inner
            .connect(name, stream)
            .await
            .map_err(|e| SessionError::TlsHandshake(server_name.to_string(), e))?;
        info!("TLS established with {}", server_name);

        Ok(Box::new(secured))
    }
}

/// Opens a TCP stream bounded by `timeout`.
pub async fn connect_tcp(addr: &str, timeout: Duration) -> Result<TcpStream, SessionError> {
    debug!("Connecting to {} (timeout {:?})", addr, timeout);
    match tokio::time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => {
            info!("Connected to {}", addr);
            Ok(stream)
        }
        Ok(Err(e)) => Err(SessionError::ConnectFailed(addr.to_string(), e)),
        Err(_) => Err(SessionError::ConnectTimeout(addr.to_string())),
    }
}
