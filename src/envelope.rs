//! Result envelope shared by every remote operation.
//!
//! A repository operation either succeeds with typed data or fails with an
//! [`OperationError`] carrying a kind and a message. The dispatcher widens
//! that into [`ToolError`], which additionally covers failures that happen
//! before the repository is ever touched.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::GitError;
use crate::path::PathError;

/// Failure kinds reported by a repository service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RemoteExists,
    InvalidUrl,
    UnknownRemote,
    NetworkFailure,
    AuthFailure,
    NoUpstream,
    MergeConflict,
    /// The remote has diverged. Not transient: callers must not blindly retry.
    NonFastForward,
    IoFailure,
    Timeout,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::RemoteExists => "remote_exists",
            ErrorKind::InvalidUrl => "invalid_url",
            ErrorKind::UnknownRemote => "unknown_remote",
            ErrorKind::NetworkFailure => "network_failure",
            ErrorKind::AuthFailure => "auth_failure",
            ErrorKind::NoUpstream => "no_upstream",
            ErrorKind::MergeConflict => "merge_conflict",
            ErrorKind::NonFastForward => "non_fast_forward",
            ErrorKind::IoFailure => "io_failure",
            ErrorKind::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-tagged failure from a repository service.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<GitError> for OperationError {
    fn from(e: GitError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

/// Outcome of a single repository service call.
pub type OperationResult<T> = Result<T, OperationError>;

/// Everything that can go wrong during one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Malformed or missing caller input. The repository service is never invoked.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error(transparent)]
    Operation(#[from] OperationError),

    /// A panic or other unexpected fault caught at the dispatcher boundary.
    #[error("Internal fault: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn category(&self) -> &'static str {
        match self {
            ToolError::Validation(_) => "validation_error",
            ToolError::NotARepository(_) => "not_a_repository",
            ToolError::Operation(_) => "operation_error",
            ToolError::Internal(_) => "internal_fault",
        }
    }

    /// Operation kind, present only for repository service failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ToolError::Operation(e) => Some(e.kind),
            _ => None,
        }
    }

    /// JSON metadata describing this failure.
    pub fn metadata(&self) -> Value {
        json!({
            "success": false,
            "category": self.category(),
            "kind": self.kind(),
            "message": self.to_string(),
        })
    }
}

impl From<PathError> for ToolError {
    fn from(e: PathError) -> Self {
        ToolError::Validation(e.to_string())
    }
}

/// Result of a whole dispatch: typed data or a tool failure, never both.
pub type Envelope<T> = Result<T, ToolError>;
