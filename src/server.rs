//! MCP server exposing the remote tools

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use crate::{Dispatcher, GitService, RegistryError, RepositoryService, ServerConfig, ToolRegistry};

#[derive(Clone)]
pub struct GitRemoteServer {
    dispatcher: Dispatcher,
}

impl GitRemoteServer {
    /// Server over the git-backed repository service.
    pub fn new(config: &ServerConfig) -> Result<Self, RegistryError> {
        let service = Arc::new(GitService::new(config.git_timeout_secs));
        Self::with_service(config, service)
    }

    pub fn with_service(
        config: &ServerConfig,
        service: Arc<dyn RepositoryService>,
    ) -> Result<Self, RegistryError> {
        let dispatcher = Dispatcher::new(ToolRegistry::remote_tools()?, service)
            .with_call_timeout(config.call_timeout);
        Ok(Self { dispatcher })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl ServerHandler for GitRemoteServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Git remote tools: remote-add, remote-list, fetch, pull, push. \
                 Every tool takes the repository `path`; failures are reported \
                 as error results, never as protocol errors."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.dispatcher.registry().mcp_tools(),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let CallToolRequestParam {
            name, arguments, ..
        } = request;
        let response = self.dispatcher.call(&name, arguments).await;
        Ok(response.into_call_result())
    }
}
