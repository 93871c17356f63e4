//! `kodegen_tools_git_remote` - MCP tools for git remote management
//!
//! This library exposes remote-repository operations (add remote, list
//! remotes, fetch, pull, push) as MCP tools. Every tool runs through one
//! dispatch pipeline: arguments are validated, the repository path is
//! normalized and probed, the operation runs against a [`RepositoryService`],
//! and the outcome is rendered into a single success/error payload.

use std::path::PathBuf;

use thiserror::Error;

// Module declarations
pub mod config;
pub mod envelope;
pub mod format;
pub mod operations;
pub mod path;
pub mod server;
pub mod service;
pub mod tools;

pub use config::ServerConfig;
pub use envelope::{Envelope, ErrorKind, OperationError, OperationResult, ToolError};
pub use format::{Summary, ToolResponse};
pub use path::{PathError, normalize};
pub use server::GitRemoteServer;
pub use service::{
    FetchRequest, GitService, PullRequest, PushRequest, RemoteDescriptor, RepositoryService,
};

// Re-export Git operations
pub use operations::{
    GitCommandOpts, add_remote, fetch, find_remote, git_available, is_repository,
    is_valid_git_url, list_remotes, open_repo, pull, push, remote_exists,
};

// Re-export MCP tools
pub use tools::{
    Dispatcher, GitFetchTool, GitPullTool, GitPushTool, GitRemoteAddTool, GitRemoteListTool,
    RegistryError, RemoteTool, ToolDefinition, ToolRegistry,
};

/// Error types for git engine operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Gix error: {0}")]
    Gix(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository not found at path: {0}")]
    RepoNotFound(PathBuf),

    #[error("Remote '{0}' not found")]
    RemoteNotFound(String),

    #[error("Remote '{0}' already exists")]
    RemoteExists(String),

    #[error("Invalid Git URL format: {0}")]
    InvalidUrl(String),

    #[error("No upstream configured: {0}")]
    NoUpstream(String),

    #[error("Merge conflict: {0}")]
    MergeConflict(String),

    #[error("Push rejected (non-fast-forward): {0}")]
    NonFastForward(String),

    #[error("{0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Git operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Git command failed: {0}")]
    CommandFailed(String),
}

impl GitError {
    /// The caller-facing failure kind this engine error maps onto.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GitError::RemoteExists(_) => ErrorKind::RemoteExists,
            GitError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            GitError::RemoteNotFound(_) => ErrorKind::UnknownRemote,
            GitError::Network(_) => ErrorKind::NetworkFailure,
            GitError::Auth(_) => ErrorKind::AuthFailure,
            GitError::NoUpstream(_) => ErrorKind::NoUpstream,
            GitError::MergeConflict(_) => ErrorKind::MergeConflict,
            GitError::NonFastForward(_) => ErrorKind::NonFastForward,
            GitError::Timeout(_) => ErrorKind::Timeout,
            GitError::Gix(_)
            | GitError::Io(_)
            | GitError::RepoNotFound(_)
            | GitError::InvalidInput(_)
            | GitError::CommandFailed(_) => ErrorKind::IoFailure,
        }
    }
}

impl From<gix::open::Error> for GitError {
    fn from(e: gix::open::Error) -> Self {
        GitError::Gix(Box::new(e))
    }
}

/// Convenience result alias.
pub type GitResult<T> = Result<T, GitError>;

/// Strong-typed repository wrapper with cheap cloning.
///
/// Wraps a single `gix::Repository` instance. Cloning this handle creates
/// a new repository instance that shares underlying data structures (refs, objects)
/// but has independent thread-local buffers, making it Send-safe.
#[derive(Debug, Clone)]
pub struct RepoHandle {
    inner: gix::Repository,
}

impl RepoHandle {
    /// Create from an existing `gix::Repository`.
    #[inline]
    pub fn new(inner: gix::Repository) -> Self {
        Self { inner }
    }

    /// Access the underlying `gix::Repository` with zero cost.
    #[inline]
    pub fn raw(&self) -> &gix::Repository {
        &self.inner
    }

    /// Clone the underlying repository for use in `spawn_blocking`.
    #[inline]
    pub fn clone_inner(&self) -> gix::Repository {
        self.inner.clone()
    }

    /// Directory git CLI commands run in.
    ///
    /// The working tree for regular repositories, the git dir for bare ones.
    pub fn command_dir(&self) -> PathBuf {
        self.inner
            .workdir()
            .unwrap_or_else(|| self.inner.git_dir())
            .to_path_buf()
    }
}
