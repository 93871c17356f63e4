//! Git operations module
//!
//! Repository probing and config reads go through gix (Gitoxide); network
//! and config-mutating operations go through the git CLI.

pub mod command;
pub mod fetch;
pub mod open;
pub mod pull;
pub mod push;
pub mod remote;

use gix::bstr::ByteSlice;

use crate::{GitError, GitResult, RepoHandle};

// Re-export operation functions
pub use command::{GitCommandOpts, classify_failure, git_available, run_git_command};
pub use fetch::fetch;
pub use open::{is_repository, open_repo};
pub use pull::pull;
pub use push::push;
pub use remote::{add_remote, find_remote, is_valid_git_url, list_remotes, remote_exists};

/// Short name of the checked-out branch, `None` when HEAD is detached.
pub async fn current_branch(repo: RepoHandle) -> GitResult<Option<String>> {
    let inner = repo.clone_inner();

    tokio::task::spawn_blocking(move || {
        let head = inner.head().map_err(|e| GitError::Gix(Box::new(e)))?;
        Ok(head
            .referent_name()
            .and_then(|name| name.shorten().to_str().ok().map(ToString::to_string)))
    })
    .await
    .map_err(|e| GitError::Gix(Box::new(e)))?
}
