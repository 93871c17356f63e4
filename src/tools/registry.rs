//! Tool registry and dispatcher
//!
//! Every invocation walks the same stages:
//! `Received → Validated → Probed → Executed → Formatted`. A failure at any
//! stage short-circuits straight to formatting, so the repository service is
//! never reached with unvalidated input and no operation runs against a path
//! that failed the repository probe.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::ToolAnnotations;
use schemars::JsonSchema;
use serde_json::Value;
use thiserror::Error;

use super::RemoteTool;
use crate::format::{self, Summary, ToolResponse};
use crate::{Envelope, ErrorKind, OperationError, RepositoryService, ToolError, path};

pub type JsonObject = serde_json::Map<String, Value>;

type Handler =
    Arc<dyn Fn(Arc<dyn RepositoryService>, JsonObject) -> BoxFuture<'static, Envelope<Summary>> + Send + Sync>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Received,
    Validated,
    Probed,
    Executed,
    Formatted,
}

/// Immutable description of one callable tool.
#[derive(Clone)]
pub struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
    read_only: bool,
    destructive: bool,
    idempotent: bool,
    handler: Handler,
}

impl ToolDefinition {
    pub fn of<T: RemoteTool>(tool: T) -> Self {
        let tool = Arc::new(tool);
        let handler: Handler = Arc::new(
            move |service: Arc<dyn RepositoryService>,
                  arguments: JsonObject|
                  -> BoxFuture<'static, Envelope<Summary>> {
                let tool = Arc::clone(&tool);
                Box::pin(async move {
                    run_stages(tool.as_ref(), service.as_ref(), arguments).await
                })
            },
        );

        Self {
            name: T::name(),
            description: T::description(),
            input_schema: schema_for::<T::Args>(),
            read_only: T::read_only(),
            destructive: T::destructive(),
            idempotent: T::idempotent(),
            handler,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &JsonObject {
        &self.input_schema
    }

    pub fn to_mcp_tool(&self) -> rmcp::model::Tool {
        let mut tool =
            rmcp::model::Tool::new(self.name, self.description, Arc::clone(&self.input_schema));
        tool.annotations = Some(ToolAnnotations {
            read_only_hint: Some(self.read_only),
            destructive_hint: Some(self.destructive),
            idempotent_hint: Some(self.idempotent),
            open_world_hint: Some(!self.read_only),
            ..Default::default()
        });
        tool
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("read_only", &self.read_only)
            .field("destructive", &self.destructive)
            .field("idempotent", &self.idempotent)
            .finish_non_exhaustive()
    }
}

fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

async fn run_stages<T: RemoteTool>(
    tool: &T,
    service: &dyn RepositoryService,
    arguments: JsonObject,
) -> Envelope<Summary> {
    let name = T::name();
    log::debug!("{name}: {:?}", Stage::Received);

    let args: T::Args = serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::Validation(e.to_string()))?;
    tool.validate(&args)?;
    let repo = path::normalize(T::path(&args))?;
    log::debug!("{name}: {:?} {}", Stage::Validated, repo.display());

    if !service.is_repository(&repo).await {
        return Err(ToolError::NotARepository(repo));
    }
    log::debug!("{name}: {:?}", Stage::Probed);

    let output = tool.execute(service, &repo, &args).await?;
    log::debug!("{name}: {:?}", Stage::Executed);

    Ok(tool.summarize(&args, output))
}

/// Name-keyed set of tool definitions, fixed once built.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the five remote tools.
    pub fn remote_tools() -> Result<Self, RegistryError> {
        use super::{GitFetchTool, GitPullTool, GitPushTool, GitRemoteAddTool, GitRemoteListTool};

        let mut registry = Self::new();
        registry.register(GitRemoteAddTool)?;
        registry.register(GitRemoteListTool)?;
        registry.register(GitFetchTool)?;
        registry.register(GitPullTool)?;
        registry.register(GitPushTool)?;
        Ok(registry)
    }

    pub fn register<T: RemoteTool>(&mut self, tool: T) -> Result<(), RegistryError> {
        if self.get(T::name()).is_some() {
            return Err(RegistryError::DuplicateTool(T::name().to_string()));
        }
        self.tools.push(ToolDefinition::of(tool));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Definitions in registration order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn mcp_tools(&self) -> Vec<rmcp::model::Tool> {
        self.tools.iter().map(ToolDefinition::to_mcp_tool).collect()
    }
}

/// Routes named invocations through the registry to a repository service.
///
/// Cheap to clone and safe to share between concurrent invocations; the only
/// shared state is the immutable registry and the service. Concurrent
/// mutating calls against the same repository path are not serialized:
/// callers that need ordering must serialize them themselves.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    service: Arc<dyn RepositoryService>,
    call_timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, service: Arc<dyn RepositoryService>) -> Self {
        Self {
            registry: Arc::new(registry),
            service,
            call_timeout: None,
        }
    }

    /// Bound each invocation. An elapsed call reports a `Timeout` failure.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Invoke a tool by name. Always yields a payload; never panics outward.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> ToolResponse {
        let Some(definition) = self.registry.get(name) else {
            return format::render(
                name,
                Err(ToolError::Validation(format!("Unknown tool '{name}'"))),
            );
        };

        let pipeline = AssertUnwindSafe((definition.handler)(
            Arc::clone(&self.service),
            arguments.unwrap_or_default(),
        ))
        .catch_unwind();

        let outcome = match self.call_timeout {
            Some(limit) => match tokio::time::timeout(limit, pipeline).await {
                Ok(outcome) => outcome,
                Err(_) => Ok(Err(OperationError::new(
                    ErrorKind::Timeout,
                    format!("'{name}' timed out after {} ms", limit.as_millis()),
                )
                .into())),
            },
            None => pipeline.await,
        };

        let envelope = outcome.unwrap_or_else(|panic| {
            Err(ToolError::Internal(panic_message(panic.as_ref())))
        });
        let response = format::render(name, envelope);
        log::debug!("{name}: {:?} (error: {})", Stage::Formatted, response.is_error);
        response
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "operation panicked".to_string()
    }
}
