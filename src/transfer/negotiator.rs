//! Passive data-channel negotiation
//!
//! Obtains a secured data channel for exactly one command that needs one.

use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;

use crate::config::DataConnectOrder;
use crate::error::FtpClientError;
use crate::protocol::{Command, parse_passive_response};
use crate::session::{BoxedStream, Connector, ControlSession};
use crate::transfer::data_channel::DataChannel;
use crate::transfer::results::Negotiation;

/// Negotiates a passive data channel for `command`.
///
/// Sends PASV, decodes the advertised address, sends `command` and reads its
/// preliminary reply. An error-class reply yields [`Negotiation::Rejected`]
/// and no channel. Otherwise the data connection is secured with the session's
/// server name and returned.
///
/// With [`DataConnectOrder::AfterReply`] the data address is never contacted
/// for a rejected command.
pub async fn negotiate<C: Connector>(
    session: &mut ControlSession<C>,
    command: &Command,
) -> Result<Negotiation, FtpClientError> {
    debug_assert!(command.uses_data_channel());

    let reply = session.exchange(&Command::Pasv).await?;
    let addr = parse_passive_response(&reply.to_string())?;
    let target = addr.to_string();
    debug!("Passive data address {}", target);

    let timeout = session.settings().connect_timeout;
    let early: Option<BoxedStream> = match session.settings().data_connect_order {
        DataConnectOrder::BeforeReply => Some(session.connector().connect(&target, timeout).await?),
        DataConnectOrder::AfterReply => None,
    };

    session.send(command).await?;
    let reply = session.read_reply().await?;
    if reply.is_error() {
        warn!("{} rejected: {}", command.log_line(), reply);
        if let Some(mut stream) = early {
            if let Err(e) = stream.shutdown().await {
                debug!("Unused data connection to {} shutdown: {}", target, e);
            }
        }
        return Ok(Negotiation::Rejected(reply));
    }

    let stream = match early {
        Some(stream) => stream,
        None => session.connector().connect(&target, timeout).await?,
    };
    let secured = session
        .connector()
        .secure(stream, &session.settings().server_name)
        .await?;
    info!("Data channel to {} ready for {}", target, command.log_line());

    Ok(Negotiation::Ready(DataChannel::new(secured, addr)))
}
