//! Git remote list tool

use std::path::Path;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RemoteTool;
use crate::{OperationResult, RemoteDescriptor, RepositoryService, Summary, format};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GitRemoteListArgs {
    /// Path to the git repository
    pub path: String,
}

/// Tool for listing remote repositories
#[derive(Clone)]
pub struct GitRemoteListTool;

impl RemoteTool for GitRemoteListTool {
    type Args = GitRemoteListArgs;
    type Output = Vec<RemoteDescriptor>;

    fn name() -> &'static str {
        super::GIT_REMOTE_LIST
    }

    fn description() -> &'static str {
        "List all configured remote repositories. \
         Shows remote names and their fetch/push URLs."
    }

    fn read_only() -> bool {
        true // Only reads configuration
    }

    fn destructive() -> bool {
        false
    }

    fn idempotent() -> bool {
        true
    }

    fn path(args: &Self::Args) -> &str {
        &args.path
    }

    fn execute<'a>(
        &'a self,
        service: &'a dyn RepositoryService,
        repo: &'a Path,
        _args: &'a Self::Args,
    ) -> BoxFuture<'a, OperationResult<Vec<RemoteDescriptor>>> {
        service.list_remotes(repo)
    }

    fn summarize(&self, _args: &Self::Args, remotes: Vec<RemoteDescriptor>) -> Summary {
        format::remote_list(&remotes)
    }
}
