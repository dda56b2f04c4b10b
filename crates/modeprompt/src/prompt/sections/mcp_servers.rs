//! The MCP SERVERS section.

use crate::mcp::{McpHub, McpServer};
use crate::prompt::builder::section;

/// List connected servers with their tools and resources.
///
/// Only connected, enabled servers are rendered. With `enable_server_creation`
/// a short guide on adding new servers follows the list.
pub async fn mcp_servers_section(hub: &dyn McpHub, enable_server_creation: bool) -> String {
    let servers = hub.available_servers();
    let connected = if servers.is_empty() {
        "(No MCP servers currently connected)".to_string()
    } else {
        servers.iter().map(render_server).collect::<Vec<_>>().join("\n\n")
    };

    let mut content = format!(
        "\
The Model Context Protocol (MCP) enables communication between the system and MCP servers that provide \
additional tools and resources to extend your capabilities.

# Connected MCP Servers

When a server is connected, you can use the server's tools via the `use_mcp_tool` tool, and access the \
server's resources via the `access_mcp_resource` tool.

{connected}"
    );

    if enable_server_creation {
        content.push_str("\n\n");
        content.push_str(&creation_guide(hub));
    }

    section("MCP SERVERS", &content)
}

fn render_server(server: &McpServer) -> String {
    let mut out = format!("## {}", server.name);

    if let Some(instructions) = server.instructions.as_deref().filter(|i| !i.trim().is_empty()) {
        out.push_str(&format!("\n\n### Instructions\n{}", instructions.trim()));
    }

    if !server.tools.is_empty() {
        let tools = server
            .tools
            .iter()
            .map(|tool| {
                let mut line = format!("- {}", tool.name);
                if let Some(description) = &tool.description {
                    line.push_str(&format!(": {description}"));
                }
                if let Some(schema) = &tool.input_schema {
                    let pretty = serde_json::to_string_pretty(schema).unwrap_or_default();
                    line.push_str(&format!(
                        "\n    Input Schema:\n    {}",
                        pretty.replace('\n', "\n    ")
                    ));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push_str(&format!("\n\n### Available Tools\n{tools}"));
    }

    if !server.resources.is_empty() {
        let resources = server
            .resources
            .iter()
            .map(|resource| {
                let mut line = format!("- {} ({})", resource.uri, resource.name);
                if let Some(mime) = &resource.mime_type {
                    line.push_str(&format!(" [{mime}]"));
                }
                if let Some(description) = &resource.description {
                    line.push_str(&format!(": {description}"));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");
        out.push_str(&format!("\n\n### Direct Resources\n{resources}"));
    }

    out
}

fn creation_guide(hub: &dyn McpHub) -> String {
    let mut guide = String::from(
        "\
## Creating an MCP Server

The user may ask you to \"add a tool\" that does some function, in other words to create an MCP server \
that provides tools and resources for external APIs. Build it as a standalone server, then register it \
in the MCP settings so it starts with the next connection.",
    );
    if let Some(path) = hub.servers_path() {
        guide.push_str(&format!("\n\nCreate new servers under: {path}"));
    }
    if let Some(path) = hub.settings_path() {
        guide.push_str(&format!("\n\nRegister them in the MCP settings file: {path}"));
    }
    guide
}
