//! MCP tools for git remote operations
//!
//! Each tool is a zero-state struct implementing [`RemoteTool`]: it declares
//! its name, description, argument schema and the single repository service
//! call it makes. Everything else (argument parsing, path normalization,
//! the repository probe, error conversion, formatting) is shared and lives
//! in [`registry`].

use std::path::Path;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::{OperationResult, RepositoryService, Summary, ToolError};

pub mod registry;

// Remote Operations
pub mod fetch;
pub mod pull;
pub mod push;
pub mod remote_add;
pub mod remote_list;

// Re-export tools
pub use fetch::{GitFetchArgs, GitFetchTool};
pub use pull::{GitPullArgs, GitPullTool};
pub use push::{GitPushArgs, GitPushTool};
pub use remote_add::{GitRemoteAddArgs, GitRemoteAddTool};
pub use remote_list::{GitRemoteListArgs, GitRemoteListTool};

pub use registry::{Dispatcher, JsonObject, RegistryError, ToolDefinition, ToolRegistry};

/// Stable tool names.
pub const GIT_REMOTE_ADD: &str = "remote-add";
pub const GIT_REMOTE_LIST: &str = "remote-list";
pub const GIT_FETCH: &str = "fetch";
pub const GIT_PULL: &str = "pull";
pub const GIT_PUSH: &str = "push";

/// Remote used by fetch and push when the caller names none.
pub const DEFAULT_REMOTE: &str = "origin";

pub(crate) fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

/// `remote` field that treats an explicit `null` like an omitted one.
pub(crate) fn remote_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_remote))
}

/// Flag field that treats an explicit `null` like an omitted one.
pub(crate) fn flag_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// One remote operation exposed as a tool.
pub trait RemoteTool: Send + Sync + 'static {
    type Args: DeserializeOwned + JsonSchema + Send + Sync + 'static;
    type Output: Send + 'static;

    fn name() -> &'static str;

    fn description() -> &'static str;

    fn read_only() -> bool;

    fn destructive() -> bool;

    fn idempotent() -> bool;

    /// Repository path exactly as the caller supplied it.
    fn path(args: &Self::Args) -> &str;

    /// Checks beyond what deserialization enforces.
    fn validate(&self, _args: &Self::Args) -> Result<(), ToolError> {
        Ok(())
    }

    /// Run the operation. Only called after validation and a successful
    /// repository probe.
    fn execute<'a>(
        &'a self,
        service: &'a dyn RepositoryService,
        repo: &'a Path,
        args: &'a Self::Args,
    ) -> BoxFuture<'a, OperationResult<Self::Output>>;

    fn summarize(&self, args: &Self::Args, output: Self::Output) -> Summary;
}

/// Remote and branch names: non-empty, no whitespace, no leading `-`, no `..`.
pub(crate) fn check_ref_name(field: &str, value: &str) -> Result<(), ToolError> {
    let reason = if value.trim().is_empty() {
        Some("must not be empty")
    } else if value.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if value.starts_with('-') {
        Some("must not start with '-'")
    } else if value.contains("..") {
        Some("must not contain '..'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ToolError::Validation(format!(
            "{field} '{value}' {reason}"
        ))),
        None => Ok(()),
    }
}

pub(crate) fn check_optional_ref_name(field: &str, value: Option<&str>) -> Result<(), ToolError> {
    value.map_or(Ok(()), |v| check_ref_name(field, v))
}
