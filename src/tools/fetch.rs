//! Git fetch tool

use std::path::Path;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    RemoteTool, check_optional_ref_name, check_ref_name, default_remote, remote_or_default,
};
use crate::{FetchRequest, OperationResult, RepositoryService, Summary, ToolError, format};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GitFetchArgs {
    /// Path to the git repository
    pub path: String,
    /// Remote to fetch from
    #[serde(default = "default_remote", deserialize_with = "remote_or_default")]
    pub remote: String,
    /// Branch to fetch; all branches when omitted
    #[serde(default)]
    pub branch: Option<String>,
}

impl GitFetchArgs {
    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            remote: self.remote.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// Tool for fetching from remote repositories
#[derive(Clone)]
pub struct GitFetchTool;

impl RemoteTool for GitFetchTool {
    type Args = GitFetchArgs;
    type Output = ();

    fn name() -> &'static str {
        super::GIT_FETCH
    }

    fn description() -> &'static str {
        "Fetch updates from a remote repository. \
         Downloads objects and refs from another repository without touching the working tree."
    }

    fn read_only() -> bool {
        false // Updates remote-tracking refs
    }

    fn destructive() -> bool {
        false
    }

    fn idempotent() -> bool {
        true // Safe to fetch repeatedly
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
        Box::pin(async move { service.fetch(repo, &args.request()).await })
    }

    fn summarize(&self, args: &Self::Args, _output: ()) -> Summary {
        format::fetched(&args.request())
    }
}
