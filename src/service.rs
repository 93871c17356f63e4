//! Repository service contract
//!
//! The dispatcher only ever talks to a repository through
//! [`RepositoryService`]. [`GitService`] is the production implementation;
//! tests substitute their own.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::operations::{self, GitCommandOpts};
use crate::{OperationResult, RepoHandle};

/// One configured remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteDescriptor {
    pub name: String,
    pub fetch_url: String,
    pub push_url: String,
}

impl RemoteDescriptor {
    /// Remote whose fetch and push URLs are the same.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: name.into(),
            fetch_url: url.clone(),
            push_url: url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub remote: String,
    /// `None` fetches all branches.
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// `None` falls through to the current branch's upstream.
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub rebase: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    pub remote: String,
    /// `None` pushes the currently checked-out branch.
    pub branch: Option<String>,
    pub force: bool,
    pub set_upstream: bool,
}

/// Remote operations against a single repository path.
///
/// Implementations must report every failure through the returned
/// [`OperationResult`]. Concurrent mutating calls against one path are not
/// serialized here.
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// `false` for any non-repository or inaccessible path. Never fails.
    async fn is_repository(&self, path: &Path) -> bool;

    async fn add_remote(&self, repo: &Path, name: &str, url: &str) -> OperationResult<()>;

    /// Empty when no remotes exist. Ordered as the underlying store tracks them.
    async fn list_remotes(&self, repo: &Path) -> OperationResult<Vec<RemoteDescriptor>>;

    async fn fetch(&self, repo: &Path, request: &FetchRequest) -> OperationResult<()>;

    async fn pull(&self, repo: &Path, request: &PullRequest) -> OperationResult<()>;

    async fn push(&self, repo: &Path, request: &PushRequest) -> OperationResult<()>;
}

/// [`RepositoryService`] backed by gix and the git CLI.
#[derive(Debug, Clone)]
pub struct GitService {
    timeout_secs: u64,
}

impl GitService {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    async fn open(&self, repo: &Path) -> OperationResult<(RepoHandle, GitCommandOpts)> {
        let handle = operations::open_repo(repo).await?;
        let opts = GitCommandOpts::new(handle.command_dir()).with_timeout(self.timeout_secs);
        Ok((handle, opts))
    }
}

impl Default for GitService {
    fn default() -> Self {
        Self::new(operations::command::DEFAULT_TIMEOUT_SECS)
    }
}

#[async_trait]
impl RepositoryService for GitService {
    async fn is_repository(&self, path: &Path) -> bool {
        operations::is_repository(path).await
    }

    async fn add_remote(&self, repo: &Path, name: &str, url: &str) -> OperationResult<()> {
        let (handle, opts) = self.open(repo).await?;
        operations::add_remote(handle, name, url, &opts).await?;
        Ok(())
    }

    async fn list_remotes(&self, repo: &Path) -> OperationResult<Vec<RemoteDescriptor>> {
        let handle = operations::open_repo(repo).await?;
        Ok(operations::list_remotes(handle).await?)
    }

    async fn fetch(&self, repo: &Path, request: &FetchRequest) -> OperationResult<()> {
        let (handle, opts) = self.open(repo).await?;
        operations::fetch(handle, request, &opts).await?;
        Ok(())
    }

    async fn pull(&self, repo: &Path, request: &PullRequest) -> OperationResult<()> {
        let (handle, opts) = self.open(repo).await?;
        operations::pull(handle, request, &opts).await?;
        Ok(())
    }

    async fn push(&self, repo: &Path, request: &PushRequest) -> OperationResult<()> {
        let (handle, opts) = self.open(repo).await?;
        operations::push(handle, request, &opts).await?;
        Ok(())
    }
}
