//! Git remote add tool

use std::path::Path;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{RemoteTool, check_ref_name};
use crate::{OperationResult, RepositoryService, Summary, ToolError, format, is_valid_git_url};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GitRemoteAddArgs {
    /// Path to the git repository
    pub path: String,
    /// Name of the new remote (e.g. "origin", "upstream")
    pub name: String,
    /// Remote URL: https, http, git, ssh, file, or scp-like `user@host:path`
    pub url: String,
}

/// Tool for adding remote repositories
#[derive(Clone)]
pub struct GitRemoteAddTool;

impl RemoteTool for GitRemoteAddTool {
    type Args = GitRemoteAddArgs;
    type Output = ();

    fn name() -> &'static str {
        super::GIT_REMOTE_ADD
    }

    fn description() -> &'static str {
        "Add a new remote repository. \
         Configures a named remote with a fetch/push URL for collaboration."
    }

    fn read_only() -> bool {
        false // Modifies repository configuration
    }

    fn destructive() -> bool {
        false
    }

    fn idempotent() -> bool {
        false // A second add of the same name fails with remote_exists
    }

    fn path(args: &Self::Args) -> &str {
        &args.path
    }

    fn validate(&self, args: &Self::Args) -> Result<(), ToolError> {
        check_ref_name("remote name", &args.name)?;
        if !is_valid_git_url(&args.url) {
            return Err(ToolError::Validation(format!(
                "'{}' is not a valid git URL",
                args.url
            )));
        }
        Ok(())
    }

    fn execute<'a>(
        &'a self,
        service: &'a dyn RepositoryService,
        repo: &'a Path,
        args: &'a Self::Args,
    ) -> BoxFuture<'a, OperationResult<()>> {
        service.add_remote(repo, &args.name, &args.url)
    }

    fn summarize(&self, args: &Self::Args, _output: ()) -> Summary {
        format::remote_added(&args.name, &args.url)
    }
}
