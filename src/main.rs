// Git remote tools MCP server
//
// Serves remote-add, remote-list, fetch, pull and push over stdio.
// Logs go to stderr; stdout carries the MCP transport.

use anyhow::Result;
use kodegen_tools_git_remote::{GitRemoteServer, ServerConfig, git_available};
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ServerConfig::from_env()?;
    if !git_available() {
        log::warn!("git binary not found in PATH; fetch, pull, push and remote-add will fail");
    }

    let server = GitRemoteServer::new(&config)?;
    log::info!(
        "git remote tools starting on stdio (git timeout {}s, call timeout {:?})",
        config.git_timeout_secs,
        config.call_timeout
    );

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| log::error!("serving error: {e:?}"))?;
    service.waiting().await?;

    Ok(())
}
