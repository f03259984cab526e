//! Protocol translators
//!
//! Maps a user-facing operation onto the single FTP command that carries it.
//! Pure: no I/O and no side effects.

use crate::client::{Direction, Operation, OperationKind};
use crate::error::ValidationError;
use crate::protocol::Command;

/// Translates an operation tag, its remote path and (for copy/move) the
/// transfer direction into the protocol command.
pub fn translate(
    kind: OperationKind,
    remote_path: &str,
    direction: Option<Direction>,
) -> Result<Command, ValidationError> {
    let path = remote_path.to_string();
    match kind {
        OperationKind::List => Ok(Command::List(path)),
        OperationKind::MakeDirectory => Ok(Command::Mkd(path)),
        OperationKind::RemoveFile => Ok(Command::Dele(path)),
        OperationKind::RemoveDirectory => Ok(Command::Rmd(path)),
        OperationKind::Copy | OperationKind::Move => match direction {
            Some(Direction::RemoteToLocal) => Ok(Command::Retr(path)),
            Some(Direction::LocalToRemote) => Ok(Command::Stor(path)),
            None => Err(ValidationError::MissingDirection(kind.to_string())),
        },
    }
}

/// Translates a fully built operation.
pub fn translate_operation(operation: &Operation) -> Result<Command, ValidationError> {
    translate(
        operation.kind(),
        operation.remote_path(),
        operation.direction(),
    )
}
