//! Tests for the shared dispatch pipeline.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kodegen_tools_git_remote::{ErrorKind, OperationError, ToolRegistry};
use serde_json::{Value, json};

use super::support::{Call, SpyService, args, assert_well_formed, call, dispatcher};

#[tokio::test]
async fn test_probe_failure_blocks_every_operation() {
    let spy = Arc::new(SpyService {
        not_a_repository: true,
        ..Default::default()
    });

    let invocations = [
        ("remote-add", json!({"path": "/tmp/repo", "name": "origin", "url": "https://example.com/r.git"})),
        ("remote-list", json!({"path": "/tmp/repo"})),
        ("fetch", json!({"path": "/tmp/repo"})),
        ("pull", json!({"path": "/tmp/repo"})),
        ("push", json!({"path": "/tmp/repo"})),
    ];

    for (tool, arguments) in invocations {
        let response = call(&spy, tool, arguments).await;
        assert!(response.is_error, "{tool} should fail");
        assert!(response.text().contains("Not a git repository"));
        assert_well_formed(&response);
    }

    assert!(spy.operation_calls().is_empty());
    assert_eq!(spy.calls().len(), 5);
}

#[tokio::test]
async fn test_path_is_normalized_before_probe() {
    let spy = Arc::new(SpyService::default());

    let response = call(&spy, "remote-list", json!({"path": "/tmp/a/../repo/./"})).await;

    assert!(!response.is_error);
    assert_eq!(spy.calls()[0], Call::IsRepository(PathBuf::from("/tmp/repo")));
}

#[tokio::test]
async fn test_empty_path_is_validation_error() {
    let spy = Arc::new(SpyService::default());

    let response = call(&spy, "fetch", json!({"path": "   "})).await;

    assert!(response.is_error);
    assert!(response.text().starts_with("Invalid arguments"));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_missing_required_field_never_reaches_service() {
    let spy = Arc::new(SpyService::default());

    let response = call(&spy, "remote-add", json!({"path": "/tmp/repo", "url": "https://example.com/r.git"})).await;

    assert!(response.is_error);
    assert!(response.text().contains("name"));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_wrong_type_is_validation_error() {
    let spy = Arc::new(SpyService::default());

    let response = call(&spy, "push", json!({"path": "/tmp/repo", "force": "yes"})).await;

    assert!(response.is_error);
    let metadata: Value = serde_json::from_str(&response.segments[1]).unwrap();
    assert_eq!(metadata["category"], "validation_error");
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_missing_arguments_object_is_validation_error() {
    let spy = Arc::new(SpyService::default());

    let response = dispatcher(&spy).call("remote-list", None).await;

    assert!(response.is_error);
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_tool() {
    let spy = Arc::new(SpyService::default());

    let response = call(&spy, "rebase", json!({"path": "/tmp/repo"})).await;

    assert!(response.is_error);
    assert!(response.text().contains("Unknown tool 'rebase'"));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_operation_error_is_reported_with_kind() {
    let spy = Arc::new(SpyService {
        failure: Some(OperationError::new(ErrorKind::AuthFailure, "credentials rejected")),
        ..Default::default()
    });

    let response = call(&spy, "fetch", json!({"path": "/tmp/repo"})).await;

    assert!(response.is_error);
    assert_eq!(response.text(), "credentials rejected");
    let metadata: Value = serde_json::from_str(&response.segments[1]).unwrap();
    assert_eq!(metadata["category"], "operation_error");
    assert_eq!(metadata["kind"], "auth_failure");
    assert_well_formed(&response);
}

#[tokio::test]
async fn test_panic_becomes_internal_fault() {
    let spy = Arc::new(SpyService {
        panic_on_operation: true,
        ..Default::default()
    });

    let response = call(&spy, "pull", json!({"path": "/tmp/repo"})).await;

    assert!(response.is_error);
    assert!(response.text().contains("Internal fault"));
    assert!(response.text().contains("spy service exploded"));
    assert_well_formed(&response);
}

#[tokio::test]
async fn test_call_timeout_yields_timeout_kind() {
    let spy = Arc::new(SpyService {
        delay: Some(Duration::from_secs(5)),
        ..Default::default()
    });
    let dispatcher = dispatcher(&spy).with_call_timeout(Some(Duration::from_millis(50)));

    let response = dispatcher.call("push", args(json!({"path": "/tmp/repo"}))).await;

    assert!(response.is_error);
    let metadata: Value = serde_json::from_str(&response.segments[1]).unwrap();
    assert_eq!(metadata["kind"], "timeout");
}

#[tokio::test]
async fn test_concurrent_invocations_are_independent() {
    let spy = Arc::new(SpyService::default());
    let dispatcher = dispatcher(&spy);

    let (a, b) = tokio::join!(
        dispatcher.call("fetch", args(json!({"path": "/tmp/one"}))),
        dispatcher.call("push", args(json!({"path": "/tmp/two", "remote": "upstream"}))),
    );

    assert!(!a.is_error);
    assert!(!b.is_error);
    assert_eq!(spy.operation_calls().len(), 2);
}

#[test]
fn test_registry_exposes_five_tools_in_order() {
    let registry = ToolRegistry::remote_tools().unwrap();
    let names: Vec<&str> = registry.definitions().iter().map(|d| d.name()).collect();

    assert_eq!(names, ["remote-add", "remote-list", "fetch", "pull", "push"]);
}

#[test]
fn test_registry_rejects_duplicate_names() {
    let mut registry = ToolRegistry::remote_tools().unwrap();

    let result = registry.register(kodegen_tools_git_remote::GitFetchTool);

    assert!(result.is_err());
    assert_eq!(registry.definitions().len(), 5);
}

#[test]
fn test_input_schema_marks_required_params() {
    let registry = ToolRegistry::remote_tools().unwrap();

    let required = |tool: &str| -> Vec<String> {
        let schema = registry.get(tool).unwrap().input_schema();
        let mut names: Vec<String> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default();
        names.sort();
        names
    };

    assert_eq!(required("remote-add"), ["name", "path", "url"]);
    assert_eq!(required("remote-list"), ["path"]);
    assert_eq!(required("fetch"), ["path"]);
    assert_eq!(required("pull"), ["path"]);
    assert_eq!(required("push"), ["path"]);

    let push = registry.get("push").unwrap().input_schema();
    assert!(push["properties"].get("setUpstream").is_some());
}

#[test]
fn test_mcp_tool_annotations() {
    let registry = ToolRegistry::remote_tools().unwrap();
    let tools = registry.mcp_tools();

    let list = tools.iter().find(|t| t.name == "remote-list").unwrap();
    let annotations = list.annotations.as_ref().unwrap();
    assert_eq!(annotations.read_only_hint, Some(true));

    let push = tools.iter().find(|t| t.name == "push").unwrap();
    let annotations = push.annotations.as_ref().unwrap();
    assert_eq!(annotations.read_only_hint, Some(false));
    assert_eq!(annotations.destructive_hint, Some(true));
}
