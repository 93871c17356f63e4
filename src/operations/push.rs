//! Git push operation
//!
//! Uses native git CLI since gix doesn't yet support push operations.
//! Authentication relies on the user's git configuration (ssh-agent or a
//! credential helper). `GIT_TERMINAL_PROMPT=0` is always set, so missing
//! credentials fail fast with an auth error instead of hanging.

use crate::operations::command::{GitCommandOpts, run_git_checked};
use crate::operations::remote::find_remote;
use crate::{GitError, GitResult, PushRequest, RepoHandle};

/// Push a branch to a configured remote.
///
/// Without a branch the currently checked-out branch is pushed. A rejected
/// non-fast-forward push surfaces as [`GitError::NonFastForward`] unless
/// `force` is set.
pub async fn push(repo: RepoHandle, request: &PushRequest, opts: &GitCommandOpts) -> GitResult<()> {
    let remote = find_remote(repo.clone(), &request.remote).await?;

    let branch = match &request.branch {
        Some(branch) => branch.clone(),
        None => super::current_branch(repo).await?.ok_or_else(|| {
            GitError::InvalidInput(
                "HEAD is detached; specify a branch to push".to_string(),
            )
        })?,
    };

    let mut args = vec!["push"];
    if request.force {
        args.push("--force");
    }
    if request.set_upstream {
        args.push("--set-upstream");
    }
    args.push("--");
    args.push(&request.remote);
    args.push(&branch);

    run_git_checked(&args, opts, Some(&remote.push_url)).await?;
    Ok(())
}
