//! Git pull tool

use std::path::Path;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{RemoteTool, check_optional_ref_name, flag_or_default};
use crate::{OperationResult, PullRequest, RepositoryService, Summary, ToolError, format};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GitPullArgs {
    /// Path to the git repository
    pub path: String,
    /// Remote to pull from; the current branch's upstream when omitted
    #[serde(default)]
    pub remote: Option<String>,
    /// Branch to pull; the current branch's upstream when omitted
    #[serde(default)]
    pub branch: Option<String>,
    /// Rebase local commits onto the fetched branch instead of merging
    #[serde(default, deserialize_with = "flag_or_default")]
    pub rebase: bool,
}

impl GitPullArgs {
    pub fn request(&self) -> PullRequest {
        PullRequest {
            remote: self.remote.clone(),
            branch: self.branch.clone(),
            rebase: self.rebase,
        }
    }
}

/// Tool for pulling from remote repositories
#[derive(Clone)]
pub struct GitPullTool;

impl RemoteTool for GitPullTool {
    type Args = GitPullArgs;
    type Output = ();

    fn name() -> &'static str {
        super::GIT_PULL
    }

    fn description() -> &'static str {
        "Pull changes from a remote repository. \
         Fetches and integrates remote changes into the current branch, \
         by merge or, with rebase, by replaying local commits."
    }

    fn read_only() -> bool {
        false // Modifies HEAD and working tree
    }

    fn destructive() -> bool {
        false
    }

    fn idempotent() -> bool {
        false // Can create new merge commits
    }

    fn path(args: &Self::Args) -> &str {
        &args.path
    }

    fn validate(&self, args: &Self::Args) -> Result<(), ToolError> {
        check_optional_ref_name("remote", args.remote.as_deref())?;
        check_optional_ref_name("branch", args.branch.as_deref())
    }

    fn execute<'a>(
        &'a self,
        service: &'a dyn RepositoryService,
        repo: &'a Path,
        args: &'a Self::Args,
    ) -> BoxFuture<'a, OperationResult<()>> {
        Box::pin(async move { service.pull(repo, &args.request()).await })
    }

    fn summarize(&self, args: &Self::Args, _output: ()) -> Summary {
        format::pulled(&args.request())
    }
}
