//! MCP server snapshots consumed by the prompt engine.
//!
//! The engine never talks to MCP servers. The host hands it an [`McpHub`]
//! that reports what is configured and connected right now; the prompt
//! lists those servers, their tools and their resources.

use serde::{Deserialize, Serialize};

/// Connection state of a configured server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpServerStatus {
    Connected,
    Connecting,
    #[default]
    Disconnected,
}

/// A tool exposed by a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema of the tool arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

/// A resource exposed by a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpResource {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Point-in-time view of one configured server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServer {
    pub name: String,
    #[serde(default)]
    pub status: McpServerStatus,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<McpTool>,
    #[serde(default)]
    pub resources: Vec<McpResource>,
}

impl McpServer {
    /// Connected and not disabled.
    pub fn is_available(&self) -> bool {
        self.status == McpServerStatus::Connected && !self.disabled
    }
}

/// Host-provided registry of MCP servers.
pub trait McpHub: Send + Sync {
    /// Every configured server, in configuration order.
    fn servers(&self) -> Vec<McpServer>;

    /// Connected, enabled servers.
    fn available_servers(&self) -> Vec<McpServer> {
        self.servers()
            .into_iter()
            .filter(McpServer::is_available)
            .collect()
    }

    /// Where the host keeps MCP server sources, if anywhere.
    fn servers_path(&self) -> Option<String> {
        None
    }

    /// Where the host keeps its MCP settings file, if anywhere.
    fn settings_path(&self) -> Option<String> {
        None
    }
}

/// True when `hub` reports at least one connected, enabled server.
pub fn has_available_servers(hub: Option<&dyn McpHub>) -> bool {
    hub.is_some_and(|hub| !hub.available_servers().is_empty())
}

/// An [`McpHub`] over a fixed snapshot, typically loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMcpHub {
    #[serde(default)]
    pub servers: Vec<McpServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<String>,
}

impl StaticMcpHub {
    pub fn new(servers: Vec<McpServer>) -> Self {
        Self {
            servers,
            ..Default::default()
        }
    }

    /// Parse `{ "servers": [...], "serversPath"?, "settingsPath"? }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl McpHub for StaticMcpHub {
    fn servers(&self) -> Vec<McpServer> {
        self.servers.clone()
    }

    fn servers_path(&self) -> Option<String> {
        self.servers_path.clone()
    }

    fn settings_path(&self) -> Option<String> {
        self.settings_path.clone()
    }
}
