//! Git push tool

use std::path::Path;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    RemoteTool, check_optional_ref_name, check_ref_name, default_remote, flag_or_default,
    remote_or_default,
};
use crate::{OperationResult, PushRequest, RepositoryService, Summary, ToolError, format};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitPushArgs {
    /// Path to the git repository
    pub path: String,
    /// Remote to push to
    #[serde(default = "default_remote", deserialize_with = "remote_or_default")]
    pub remote: String,
    /// Branch to push; the currently checked-out branch when omitted
    #[serde(default)]
    pub branch: Option<String>,
    /// Overwrite the remote branch even when it has diverged
    #[serde(default, deserialize_with = "flag_or_default")]
    pub force: bool,
    /// Record the remote branch as the upstream of the local branch
    #[serde(default, alias = "set_upstream", deserialize_with = "flag_or_default")]
    pub set_upstream: bool,
}

impl GitPushArgs {
    pub fn request(&self) -> PushRequest {
        PushRequest {
            remote: self.remote.clone(),
            branch: self.branch.clone(),
            force: self.force,
            set_upstream: self.set_upstream,
        }
    }
}

/// Tool for pushing commits to remote repositories
#[derive(Clone)]
pub struct GitPushTool;

impl RemoteTool for GitPushTool {
    type Args = GitPushArgs;
    type Output = ();

    fn name() -> &'static str {
        super::GIT_PUSH
    }

    fn description() -> &'static str {
        "Push a branch to a remote repository. \
         A rejected non-fast-forward push means the remote has diverged; \
         integrate first or push with force. \
         Requires proper authentication setup (SSH keys or credential helpers)."
    }

    fn read_only() -> bool {
        false // Modifies remote repository
    }

    fn destructive() -> bool {
        true // Force push can discard remote commits
    }

    fn idempotent() -> bool {
        true // Re-pushing the same ref is a no-op
    }

    fn path(args: &Self::Args) -> &str {
        &args.path
    }

    fn validate(&self, args: &Self::Args) -> Result<(), ToolError> {
        check_ref_name("remote", &args.remote)?;
        check_optional_ref_name("branch", args.branch.as_deref())
    }

    fn execute<'a>(
        &'a self,
        service: &'a dyn RepositoryService,
        repo: &'a Path,
        args: &'a Self::Args,
    ) -> BoxFuture<'a, OperationResult<()>> {
        Box::pin(async move { service.push(repo, &args.request()).await })
    }

    fn summarize(&self, args: &Self::Args, _output: ()) -> Summary {
        format::pushed(&args.request())
    }
}
