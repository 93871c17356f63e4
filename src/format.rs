//! Response formatting
//!
//! Turns a dispatch [`Envelope`] into the caller-facing payload: text
//! segments plus an error flag. Formatting performs no I/O and cannot fail.

use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};

use crate::{Envelope, FetchRequest, PullRequest, PushRequest, RemoteDescriptor, ToolError};

/// Rendered result of a successful operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Human-readable confirmation.
    pub text: String,
    /// Machine-readable metadata, emitted as a pretty-printed JSON segment.
    pub metadata: Value,
}

impl Summary {
    pub fn new(text: impl Into<String>, metadata: Value) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Caller-facing payload of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    pub segments: Vec<String>,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn success(summary: Summary) -> Self {
        Self {
            segments: vec![summary.text, pretty(&summary.metadata)],
            is_error: false,
        }
    }

    pub fn failure(error: &ToolError) -> Self {
        Self {
            segments: vec![error.to_string(), pretty(&error.metadata())],
            is_error: true,
        }
    }

    /// First segment: the summary on success, the error message on failure.
    pub fn text(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    pub fn into_call_result(self) -> CallToolResult {
        let contents: Vec<Content> = self.segments.into_iter().map(Content::text).collect();
        if self.is_error {
            CallToolResult::error(contents)
        } else {
            CallToolResult::success(contents)
        }
    }
}

/// Render the outcome of a tool invocation.
pub fn render(tool: &str, envelope: Envelope<Summary>) -> ToolResponse {
    match envelope {
        Ok(summary) => ToolResponse::success(summary),
        Err(error) => {
            log::warn!("{tool} failed ({}): {error}", error.category());
            ToolResponse::failure(&error)
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn remote_added(name: &str, url: &str) -> Summary {
    Summary::new(
        format!("✓ Added remote '{name}' ➜ {url}"),
        json!({
            "success": true,
            "remote_name": name,
            "remote_url": url,
        }),
    )
}

/// Line-per-remote listing, or a distinct message when there are none.
pub fn remote_list(remotes: &[RemoteDescriptor]) -> Summary {
    let text = if remotes.is_empty() {
        "No remotes found".to_string()
    } else {
        let mut text = format!("Remotes ({})", remotes.len());
        for remote in remotes {
            text.push_str(&format!(
                "\n  {}\tfetch: {}\tpush: {}",
                remote.name, remote.fetch_url, remote.push_url
            ));
        }
        text
    };

    Summary::new(
        text,
        json!({
            "success": true,
            "count": remotes.len(),
            "remotes": remotes,
        }),
    )
}

pub fn fetched(request: &FetchRequest) -> Summary {
    let scope = match &request.branch {
        Some(branch) => format!("branch '{branch}'"),
        None => "all branches".to_string(),
    };

    Summary::new(
        format!("✓ Fetched {scope} from remote '{}'", request.remote),
        json!({
            "success": true,
            "remote": request.remote,
            "branch": request.branch,
        }),
    )
}

pub fn pulled(request: &PullRequest) -> Summary {
    let source = match (&request.remote, &request.branch) {
        (Some(remote), Some(branch)) => format!("remote '{remote}' branch '{branch}'"),
        (Some(remote), None) => format!("remote '{remote}'"),
        (None, Some(branch)) => format!("branch '{branch}' of the tracked remote"),
        (None, None) => "upstream tracking branch".to_string(),
    };
    let strategy = if request.rebase { "rebase" } else { "merge" };

    Summary::new(
        format!("✓ Pulled from {source} ({strategy})"),
        json!({
            "success": true,
            "remote": request.remote,
            "branch": request.branch,
            "rebase": request.rebase,
        }),
    )
}

pub fn pushed(request: &PushRequest) -> Summary {
    let branch = match &request.branch {
        Some(branch) => format!("branch '{branch}'"),
        None => "current branch".to_string(),
    };
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    let text = format!(
        "✓ Pushed {branch} to remote '{}'\n\nForce push: {}\nSet upstream: {}",
        request.remote,
        yes_no(request.force),
        yes_no(request.set_upstream),
    );

    Summary::new(
        text,
        json!({
            "success": true,
            "remote": request.remote,
            "branch": request.branch,
            "force": request.force,
            "set_upstream": request.set_upstream,
        }),
    )
}
