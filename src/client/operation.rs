//! Module `operation`
//!
//! Defines the user-facing operations the client can perform and the
//! direction of a copy or move.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ValidationError;

/// The closed set of actions a single invocation can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    List,
    MakeDirectory,
    RemoveFile,
    RemoveDirectory,
    Copy,
    Move,
}

impl OperationKind {
    /// Returns true for copy and move, which need a local path and a direction.
    pub fn is_transfer(self) -> bool {
        matches!(self, OperationKind::Copy | OperationKind::Move)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::List => "ls",
            OperationKind::MakeDirectory => "mkdir",
            OperationKind::RemoveFile => "rm",
            OperationKind::RemoveDirectory => "rmdir",
            OperationKind::Copy => "cp",
            OperationKind::Move => "mv",
        }
    }
}

impl FromStr for OperationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ls" => Ok(OperationKind::List),
            "mkdir" => Ok(OperationKind::MakeDirectory),
            "rm" => Ok(OperationKind::RemoveFile),
            "rmdir" => Ok(OperationKind::RemoveDirectory),
            "cp" => Ok(OperationKind::Copy),
            "mv" => Ok(OperationKind::Move),
            other => Err(ValidationError::ArgumentMismatch(format!(
                "Unknown operation: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Which way bytes flow for a copy or move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Local path came first: upload with STOR.
    LocalToRemote,
    /// Remote URL came first: download with RETR.
    RemoteToLocal,
}

/// One operation, built once from validated input and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    remote_path: String,
    local_path: Option<PathBuf>,
    direction: Option<Direction>,
}

impl Operation {
    /// Builds one of the operations that only touch the remote side.
    pub fn remote(kind: OperationKind, remote_path: impl Into<String>) -> Self {
        Self {
            kind,
            remote_path: remote_path.into(),
            local_path: None,
            direction: None,
        }
    }

    /// Builds a copy or move between `local_path` and `remote_path`.
    pub fn transfer(
        kind: OperationKind,
        remote_path: impl Into<String>,
        local_path: impl Into<PathBuf>,
        direction: Direction,
    ) -> Self {
        Self {
            kind,
            remote_path: remote_path.into(),
            local_path: Some(local_path.into()),
            direction: Some(direction),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn remote_path(&self) -> &str {
        &self.remote_path
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}
