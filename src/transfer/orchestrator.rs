//! Transfer orchestration
//!
//! Runs one operation against an authenticated session: simple remote
//! commands, listings, and copy/move in either direction.

use log::{debug, error, info, warn};
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::client::{Direction, Operation, OperationKind};
use crate::error::{FtpClientError, TransferError, ValidationError};
use crate::protocol::responses::TRANSFER_COMPLETE;
use crate::protocol::{Command, StatusResponse, translate, translate_operation};
use crate::session::{Connector, ControlSession};
use crate::transfer::data_channel::DataChannel;
use crate::transfer::file_ops::LocalStore;
use crate::transfer::negotiator::negotiate;
use crate::transfer::results::{Negotiation, Outcome};

/// Fixed preamble sent before every file transfer.
const TRANSFER_PREAMBLE: [Command; 3] = [Command::TypeImage, Command::ModeStream, Command::StruFile];

/// Where a copy stopped: finished with the server's completion reply, or cut
/// short with a final outcome.
enum CopyStep {
    Transferred(StatusResponse),
    Stopped(Outcome),
}

/// Executes `operation`, writing listings to `sink`.
///
/// Rejections and local failures come back as an [`Outcome`]; connection and
/// protocol failures come back as errors.
pub async fn execute<C, L, W>(
    session: &mut ControlSession<C>,
    local: &L,
    operation: &Operation,
    sink: &mut W,
) -> Result<Outcome, FtpClientError>
where
    C: Connector,
    L: LocalStore,
    W: AsyncWrite + Unpin + ?Sized,
{
    info!("Running {} {}", operation.kind(), operation.remote_path());
    match operation.kind() {
        OperationKind::List => list(session, operation.remote_path(), sink).await,
        OperationKind::MakeDirectory | OperationKind::RemoveFile | OperationKind::RemoveDirectory => {
            remote_only(session, operation).await
        }
        OperationKind::Copy => match copy(session, local, operation).await? {
            CopyStep::Transferred(reply) if reply.is_error() => Ok(Outcome::Rejected(reply)),
            CopyStep::Transferred(reply) => Ok(Outcome::Completed(reply)),
            CopyStep::Stopped(outcome) => Ok(outcome),
        },
        OperationKind::Move => move_file(session, local, operation).await,
    }
}

/// MKD, DELE and RMD: one command, one reply.
async fn remote_only<C: Connector>(
    session: &mut ControlSession<C>,
    operation: &Operation,
) -> Result<Outcome, FtpClientError> {
    let command = translate_operation(operation)?;
    let reply = session.exchange(&command).await?;
    Ok(reply_outcome(reply))
}

/// LIST: drain the listing to `sink`, then read the completion reply.
async fn list<C, W>(
    session: &mut ControlSession<C>,
    remote_path: &str,
    sink: &mut W,
) -> Result<Outcome, FtpClientError>
where
    C: Connector,
    W: AsyncWrite + Unpin + ?Sized,
{
    let command = translate(OperationKind::List, remote_path, None)?;
    let mut channel = match negotiate(session, &command).await? {
        Negotiation::Ready(channel) => channel,
        Negotiation::Rejected(reply) => return Ok(Outcome::Rejected(reply)),
    };

    let drained = channel.drain_lines(sink).await;
    channel.close().await;
    let completion = session.read_reply().await?;

    match drained {
        Ok(lines) => {
            info!("Listed {} entries under {}", lines, remote_path);
            Ok(reply_outcome(completion))
        }
        Err(e) => Ok(failure_outcome(e)),
    }
}

/// Copies between the local store and the server in the operation's direction.
async fn copy<C, L>(
    session: &mut ControlSession<C>,
    local: &L,
    operation: &Operation,
) -> Result<CopyStep, FtpClientError>
where
    C: Connector,
    L: LocalStore,
{
    let command = translate_operation(operation)?;
    let (local_path, direction) = transfer_sides(operation)?;
    let label = local_path.display().to_string();

    match direction {
        Direction::LocalToRemote => {
            let mut source = match local.open(local_path).await {
                Ok(source) => source,
                Err(e) => {
                    error!("Error reading from local file {}: {}", label, e);
                    return Ok(CopyStep::Stopped(Outcome::LocalFailure(format!(
                        "cannot open {}: {}",
                        label, e
                    ))));
                }
            };

            let mut channel = match open_transfer_channel(session, &command).await? {
                Negotiation::Ready(channel) => channel,
                Negotiation::Rejected(reply) => return Ok(CopyStep::Stopped(Outcome::Rejected(reply))),
            };
            let sent = channel.send_from(&mut source, &label).await;
            finish_transfer(session, channel, sent.map(|_| ())).await
        }
        Direction::RemoteToLocal => {
            let mut channel = match open_transfer_channel(session, &command).await? {
                Negotiation::Ready(channel) => channel,
                Negotiation::Rejected(reply) => return Ok(CopyStep::Stopped(Outcome::Rejected(reply))),
            };

            let mut destination = match local.create(local_path).await {
                Ok(destination) => destination,
                Err(e) => {
                    error!("Error creating local file {}: {}", label, e);
                    let failure = TransferError::LocalIo(label.clone(), e);
                    return finish_transfer(session, channel, Err(failure)).await;
                }
            };

            let mut received = channel
                .receive_into(&mut destination, &label)
                .await
                .map(|_| ());
            if received.is_ok() {
                received = destination
                    .shutdown()
                    .await
                    .map_err(|e| TransferError::LocalIo(label.clone(), e));
            }
            finish_transfer(session, channel, received).await
        }
    }
}

/// Copy, then remove the source once the server confirmed the transfer.
async fn move_file<C, L>(
    session: &mut ControlSession<C>,
    local: &L,
    operation: &Operation,
) -> Result<Outcome, FtpClientError>
where
    C: Connector,
    L: LocalStore,
{
    let completion = match copy(session, local, operation).await? {
        CopyStep::Transferred(reply) => reply,
        CopyStep::Stopped(outcome) => return Ok(outcome),
    };

    if completion.is_error() {
        warn!(
            "Transfer not confirmed, leaving source of {} in place: {}",
            operation.remote_path(),
            completion
        );
        return Ok(Outcome::CopiedNotMoved(completion));
    }

    let (local_path, direction) = transfer_sides(operation)?;
    match direction {
        Direction::LocalToRemote => match local.remove(local_path).await {
            Ok(()) => Ok(Outcome::Completed(completion)),
            Err(e) => {
                error!("Error deleting file {}: {}", local_path.display(), e);
                Ok(Outcome::LocalFailure(format!(
                    "copied, but cannot delete {}: {}",
                    local_path.display(),
                    e
                )))
            }
        },
        Direction::RemoteToLocal => {
            let delete = Command::Dele(operation.remote_path().to_string());
            let reply = session.exchange(&delete).await?;
            Ok(reply_outcome(reply))
        }
    }
}

/// Sends the transfer preamble and negotiates the data channel.
async fn open_transfer_channel<C: Connector>(
    session: &mut ControlSession<C>,
    command: &Command,
) -> Result<Negotiation, FtpClientError> {
    for step in &TRANSFER_PREAMBLE {
        session.exchange_checked(step).await?;
    }
    negotiate(session, command).await
}

/// Closes the channel, reads the completion reply and folds in the byte
/// transfer result.
async fn finish_transfer<C: Connector>(
    session: &mut ControlSession<C>,
    channel: DataChannel,
    transferred: Result<(), TransferError>,
) -> Result<CopyStep, FtpClientError> {
    channel.close().await;
    let completion = session.read_reply().await?;
    if completion.code() != TRANSFER_COMPLETE {
        debug!("Transfer completion reply: {}", completion);
    }

    match transferred {
        Ok(()) => Ok(CopyStep::Transferred(completion)),
        Err(e) => {
            warn!("Transfer failed ({}), server replied {}", e, completion);
            Ok(CopyStep::Stopped(failure_outcome(e)))
        }
    }
}

fn transfer_sides(operation: &Operation) -> Result<(&Path, Direction), ValidationError> {
    match (operation.local_path(), operation.direction()) {
        (Some(path), Some(direction)) => Ok((path, direction)),
        _ => Err(ValidationError::MissingDirection(operation.kind().to_string())),
    }
}

fn reply_outcome(reply: StatusResponse) -> Outcome {
    if reply.is_error() {
        Outcome::Rejected(reply)
    } else {
        Outcome::Completed(reply)
    }
}

fn failure_outcome(error: TransferError) -> Outcome {
    match error {
        TransferError::LocalIo(..) => Outcome::LocalFailure(error.to_string()),
        TransferError::DataChannel(_) => Outcome::Aborted(error.to_string()),
    }
}
