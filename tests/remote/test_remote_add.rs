//! Tests for the remote-add tool.

use std::sync::Arc;

use kodegen_tools_git_remote::{ErrorKind, OperationError};
use serde_json::json;

use super::support::{Call, SpyService, assert_well_formed, call};

#[tokio::test]
async fn test_add_remote_success() {
    let spy = Arc::new(SpyService::default());

    let response = call(
        &spy,
        "remote-add",
        json!({"path": "/tmp/repo", "name": "upstream", "url": "git@github.com:acme/widgets.git"}),
    )
    .await;

    assert!(!response.is_error);
    assert_eq!(
        spy.operation_calls(),
        [Call::AddRemote {
            name: "upstream".to_string(),
            url: "git@github.com:acme/widgets.git".to_string(),
        }]
    );
    assert!(response.text().contains("upstream"));
    assert_well_formed(&response);
}

#[tokio::test]
async fn test_add_remote_invalid_url_rejected_before_service() {
    let spy = Arc::new(SpyService::default());

    let response = call(
        &spy,
        "remote-add",
        json!({"path": "/tmp/repo", "name": "origin", "url": "not-a-url"}),
    )
    .await;

    assert!(response.is_error);
    assert!(response.text().contains("not a valid git URL"));
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_add_remote_empty_name_rejected() {
    let spy = Arc::new(SpyService::default());

    let response = call(
        &spy,
        "remote-add",
        json!({"path": "/tmp/repo", "name": "", "url": "https://example.com/r.git"}),
    )
    .await;

    assert!(response.is_error);
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn test_add_existing_remote_reports_failure() {
    let spy = Arc::new(SpyService {
        failure: Some(OperationError::new(
            ErrorKind::RemoteExists,
            "Remote 'origin' already exists",
        )),
        ..Default::default()
    });

    let response = call(
        &spy,
        "remote-add",
        json!({"path": "/tmp/repo", "name": "origin", "url": "https://example.com/r.git"}),
    )
    .await;

    assert!(response.is_error);
    assert_eq!(response.text(), "Remote 'origin' already exists");
    assert!(!response.text().contains("Added"));
    assert!(response.segments[1].contains("remote_exists"));
    assert_well_formed(&response);
}
