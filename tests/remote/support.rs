//! Spy repository service and dispatch helpers shared by the tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kodegen_tools_git_remote::tools::JsonObject;
use kodegen_tools_git_remote::{
    Dispatcher, FetchRequest, OperationError, OperationResult, PullRequest, PushRequest,
    RemoteDescriptor, RepositoryService, ToolRegistry, ToolResponse,
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IsRepository(PathBuf),
    AddRemote { name: String, url: String },
    ListRemotes,
    Fetch(FetchRequest),
    Pull(PullRequest),
    Push(PushRequest),
}

/// Records every call; answers with canned data.
#[derive(Debug, Default)]
pub struct SpyService {
    pub not_a_repository: bool,
    pub remotes: Vec<RemoteDescriptor>,
    pub failure: Option<OperationError>,
    pub panic_on_operation: bool,
    pub delay: Option<Duration>,
    pub calls: Mutex<Vec<Call>>,
}

impl SpyService {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls other than the repository probe.
    pub fn operation_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::IsRepository(_)))
            .collect()
    }

    async fn record(&self, call: Call) -> OperationResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panic_on_operation {
            panic!("spy service exploded");
        }
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RepositoryService for SpyService {
    async fn is_repository(&self, path: &Path) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(Call::IsRepository(path.to_path_buf()));
        !self.not_a_repository
    }

    async fn add_remote(&self, _repo: &Path, name: &str, url: &str) -> OperationResult<()> {
        self.record(Call::AddRemote {
            name: name.to_string(),
            url: url.to_string(),
        })
        .await
    }

    async fn list_remotes(&self, _repo: &Path) -> OperationResult<Vec<RemoteDescriptor>> {
        self.record(Call::ListRemotes).await?;
        Ok(self.remotes.clone())
    }

    async fn fetch(&self, _repo: &Path, request: &FetchRequest) -> OperationResult<()> {
        self.record(Call::Fetch(request.clone())).await
    }

    async fn pull(&self, _repo: &Path, request: &PullRequest) -> OperationResult<()> {
        self.record(Call::Pull(request.clone())).await
    }

    async fn push(&self, _repo: &Path, request: &PushRequest) -> OperationResult<()> {
        self.record(Call::Push(request.clone())).await
    }
}

pub fn dispatcher(spy: &Arc<SpyService>) -> Dispatcher {
    let registry = ToolRegistry::remote_tools().unwrap();
    Dispatcher::new(registry, Arc::clone(spy) as Arc<dyn RepositoryService>)
}

pub fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        other => panic!("arguments must be a JSON object, got {other}"),
    }
}

pub async fn call(spy: &Arc<SpyService>, tool: &str, arguments: Value) -> ToolResponse {
    dispatcher(spy).call(tool, args(arguments)).await
}

/// Exactly one of success text / error message is present.
pub fn assert_well_formed(response: &ToolResponse) {
    assert!(!response.segments.is_empty(), "payload has no segments");
    assert!(!response.text().trim().is_empty(), "payload text is blank");
    let metadata: Value = serde_json::from_str(&response.segments[1]).unwrap();
    assert_eq!(metadata["success"], Value::Bool(!response.is_error));
}
