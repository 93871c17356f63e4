//! Git fetch operation

use crate::operations::command::{GitCommandOpts, run_git_checked};
use crate::operations::remote::find_remote;
use crate::{FetchRequest, GitResult, RepoHandle};

/// Fetch from a configured remote.
///
/// Without a branch every branch covered by the remote's refspecs is fetched.
pub async fn fetch(repo: RepoHandle, request: &FetchRequest, opts: &GitCommandOpts) -> GitResult<()> {
    let remote = find_remote(repo, &request.remote).await?;

    let mut args = vec!["fetch", "--", request.remote.as_str()];
    if let Some(branch) = &request.branch {
        args.push(branch);
    }

    run_git_checked(&args, opts, Some(&remote.fetch_url)).await?;
    Ok(())
}
