//! Tests for the remote-list tool.

use std::sync::Arc;

use kodegen_tools_git_remote::RemoteDescriptor;
use serde_json::{Value, json};

use super::support::{SpyService, assert_well_formed, call};

#[tokio::test]
async fn test_list_no_remotes_has_distinct_message() {
    let spy = Arc::new(SpyService::default());

    let response = call(&spy, "remote-list", json!({"path": "/tmp/repo"})).await;

    assert!(!response.is_error);
    assert_eq!(response.text(), "No remotes found");
    assert_well_formed(&response);
}

#[tokio::test]
async fn test_list_preserves_service_order_and_urls() {
    let spy = Arc::new(SpyService {
        remotes: vec![
            RemoteDescriptor::new("origin", "https://example.com/a.git"),
            RemoteDescriptor {
                name: "upstream".to_string(),
                fetch_url: "https://example.com/b.git".to_string(),
                push_url: "git@example.com:b.git".to_string(),
            },
        ],
        ..Default::default()
    });

    let response = call(&spy, "remote-list", json!({"path": "/tmp/repo"})).await;

    assert!(!response.is_error);
    let lines: Vec<&str> = response.text().lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Remotes (2)");
    assert!(lines[1].contains("origin"));
    assert!(lines[1].contains("fetch: https://example.com/a.git"));
    assert!(lines[1].contains("push: https://example.com/a.git"));
    assert!(lines[2].contains("upstream"));
    assert!(lines[2].contains("fetch: https://example.com/b.git"));
    assert!(lines[2].contains("push: git@example.com:b.git"));

    let metadata: Value = serde_json::from_str(&response.segments[1]).unwrap();
    assert_eq!(metadata["count"], 2);
    assert_eq!(metadata["remotes"][0]["name"], "origin");
    assert_eq!(metadata["remotes"][1]["push_url"], "git@example.com:b.git");
}
