//! Git pull operation (fetch + integrate)

use gix::bstr::ByteSlice;

use crate::operations::command::{GitCommandOpts, run_git_checked};
use crate::operations::remote::find_remote;
use crate::{GitError, GitResult, PullRequest, RepoHandle};

/// Pull into the current branch.
///
/// With neither remote nor branch the current branch's upstream is used.
/// A branch without a remote pulls from the current branch's configured
/// remote, failing with [`GitError::NoUpstream`] when there is none.
pub async fn pull(repo: RepoHandle, request: &PullRequest, opts: &GitCommandOpts) -> GitResult<()> {
    let (remote, url) = match (&request.remote, &request.branch) {
        (Some(remote), _) => {
            let descriptor = find_remote(repo, remote).await?;
            (Some(remote.clone()), Some(descriptor.fetch_url))
        }
        (None, Some(_)) => {
            let remote = tracking_remote(repo.clone()).await?;
            let url = find_remote(repo, &remote).await.ok().map(|r| r.fetch_url);
            (Some(remote), url)
        }
        (None, None) => (None, upstream_url(repo).await),
    };

    let mut args = vec!["pull", "--no-edit"];
    args.push(if request.rebase { "--rebase" } else { "--no-rebase" });
    if let Some(remote) = &remote {
        args.push("--");
        args.push(remote);
        if let Some(branch) = &request.branch {
            args.push(branch);
        }
    }

    run_git_checked(&args, opts, url.as_deref()).await?;
    Ok(())
}

/// Fetch URL of the current branch's upstream remote, if one is configured.
async fn upstream_url(repo: RepoHandle) -> Option<String> {
    let remote = tracking_remote(repo.clone()).await.ok()?;
    find_remote(repo, &remote).await.ok().map(|r| r.fetch_url)
}

/// Remote configured for the current branch (`branch.<name>.remote`).
async fn tracking_remote(repo: RepoHandle) -> GitResult<String> {
    let branch = super::current_branch(repo.clone())
        .await?
        .ok_or_else(|| GitError::NoUpstream("HEAD is detached".to_string()))?;
    let repo_clone = repo.clone_inner();

    let key = format!("branch.{branch}.remote");
    let remote = tokio::task::spawn_blocking(move || {
        repo_clone
            .config_snapshot()
            .string(key.as_str())
            .map(|v| v.to_str_lossy().into_owned())
    })
    .await
    .map_err(|e| GitError::Gix(Box::new(e)))?;

    remote.ok_or_else(|| {
        GitError::NoUpstream(format!(
            "branch '{branch}' has no configured remote; specify one explicitly"
        ))
    })
}
