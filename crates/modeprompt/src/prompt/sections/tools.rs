//! Tool descriptions offered to a mode.

use std::path::Path;

use crate::diff::DiffStrategy;
use crate::modes::{ModeConfig, ToolGroup};

/// Tools the prompt can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ReadFile,
    SearchFiles,
    ListFiles,
    ListCodeDefinitionNames,
    ApplyDiff,
    WriteToFile,
    InsertContent,
    SearchAndReplace,
    BrowserAction,
    ExecuteCommand,
    UseMcpTool,
    AccessMcpResource,
    AskFollowupQuestion,
    AttemptCompletion,
    SwitchMode,
    NewTask,
    UpdateTodoList,
}

/// Offered to every mode regardless of its groups.
pub const ALWAYS_AVAILABLE_TOOLS: [Tool; 5] = [
    Tool::AskFollowupQuestion,
    Tool::AttemptCompletion,
    Tool::SwitchMode,
    Tool::NewTask,
    Tool::UpdateTodoList,
];

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Self::ReadFile => "read_file",
            Self::SearchFiles => "search_files",
            Self::ListFiles => "list_files",
            Self::ListCodeDefinitionNames => "list_code_definition_names",
            Self::ApplyDiff => "apply_diff",
            Self::WriteToFile => "write_to_file",
            Self::InsertContent => "insert_content",
            Self::SearchAndReplace => "search_and_replace",
            Self::BrowserAction => "browser_action",
            Self::ExecuteCommand => "execute_command",
            Self::UseMcpTool => "use_mcp_tool",
            Self::AccessMcpResource => "access_mcp_resource",
            Self::AskFollowupQuestion => "ask_followup_question",
            Self::AttemptCompletion => "attempt_completion",
            Self::SwitchMode => "switch_mode",
            Self::NewTask => "new_task",
            Self::UpdateTodoList => "update_todo_list",
        }
    }

    /// Tools granted by membership in `group`.
    pub fn for_group(group: ToolGroup) -> &'static [Tool] {
        match group {
            ToolGroup::Read => &[
                Self::ReadFile,
                Self::SearchFiles,
                Self::ListFiles,
                Self::ListCodeDefinitionNames,
            ],
            ToolGroup::Edit => &[
                Self::ApplyDiff,
                Self::WriteToFile,
                Self::InsertContent,
                Self::SearchAndReplace,
            ],
            ToolGroup::Browser => &[Self::BrowserAction],
            ToolGroup::Command => &[Self::ExecuteCommand],
            ToolGroup::Mcp => &[Self::UseMcpTool, Self::AccessMcpResource],
            ToolGroup::Modes => &[Self::SwitchMode, Self::NewTask],
        }
    }
}

/// Inputs that decide which tools are offered and how they read.
#[derive(Clone, Copy)]
pub struct ToolDescriptionOptions<'a> {
    pub cwd: &'a Path,
    pub supports_computer_use: bool,
    /// Present only when diff editing is enabled.
    pub diff_strategy: Option<&'a dyn DiffStrategy>,
    pub browser_viewport_size: Option<&'a str>,
    /// Whether the MCP section is part of this prompt.
    pub include_mcp: bool,
}

impl<'a> ToolDescriptionOptions<'a> {
    pub fn new(cwd: &'a Path) -> Self {
        Self {
            cwd,
            supports_computer_use: false,
            diff_strategy: None,
            browser_viewport_size: None,
            include_mcp: false,
        }
    }
}

/// The tools offered to `mode`, in grant order, each once.
pub fn tools_for_mode(mode: &ModeConfig, options: &ToolDescriptionOptions<'_>) -> Vec<Tool> {
    let granted = mode
        .groups
        .iter()
        .flat_map(|entry| Tool::for_group(entry.group()).iter().copied())
        .chain(ALWAYS_AVAILABLE_TOOLS);

    let mut tools: Vec<Tool> = Vec::new();
    for tool in granted {
        if tools.contains(&tool) {
            continue;
        }
        let offered = match tool {
            Tool::ApplyDiff => options.diff_strategy.is_some(),
            Tool::BrowserAction => options.supports_computer_use,
            Tool::UseMcpTool | Tool::AccessMcpResource => options.include_mcp,
            _ => true,
        };
        if offered {
            tools.push(tool);
        }
    }
    tools
}

/// `# Tools` followed by every offered tool's description.
pub fn tool_descriptions_for_mode(mode: &ModeConfig, options: &ToolDescriptionOptions<'_>) -> String {
    let mut descriptions: Vec<String> = tools_for_mode(mode, options)
        .into_iter()
        .map(|tool| describe(tool, options))
        .collect();

    if let Some(regex) = mode
        .group_options(ToolGroup::Edit)
        .and_then(|o| o.file_regex.as_deref())
    {
        descriptions.push(format!(
            "Note: in this mode, file edits are restricted to paths matching `{regex}`. \
             Edits to any other file will be rejected."
        ));
    }

    format!("# Tools\n\n{}", descriptions.join("\n\n"))
}

fn describe(tool: Tool, options: &ToolDescriptionOptions<'_>) -> String {
    let cwd = options.cwd.display();
    match tool {
        Tool::ReadFile => format!(
            "\
## read_file
Description: Read the contents of a file. Output is prefixed with line numbers (e.g. \"1 | const x = 1\").
Parameters:
- path: (required) The path of the file to read (relative to the current workspace directory {cwd})
Usage:
<read_file>
<path>File path here</path>
</read_file>"
        ),
        Tool::SearchFiles => format!(
            "\
## search_files
Description: Perform a regex search across files in a directory, showing each match with surrounding context.
Parameters:
- path: (required) The directory to search in (relative to the current workspace directory {cwd}). Searched recursively.
- regex: (required) The regular expression pattern, in Rust regex syntax.
- file_pattern: (optional) Glob pattern to filter files (e.g. '*.md').
Usage:
<search_files>
<path>Directory path here</path>
<regex>Your regex pattern here</regex>
<file_pattern>file pattern here (optional)</file_pattern>
</search_files>"
        ),
        Tool::ListFiles => format!(
            "\
## list_files
Description: List files and directories within a directory. Do not use it to confirm files you created; the result of the creating tool tells you that.
Parameters:
- path: (required) The directory to list (relative to the current workspace directory {cwd})
- recursive: (optional) true to list recursively, false or omitted for the top level only.
Usage:
<list_files>
<path>Directory path here</path>
<recursive>true or false (optional)</recursive>
</list_files>"
        ),
        Tool::ListCodeDefinitionNames => format!(
            "\
## list_code_definition_names
Description: List definition names (classes, functions, methods) in a source file or in the top level of a directory.
Parameters:
- path: (required) The file or directory (relative to the current workspace directory {cwd})
Usage:
<list_code_definition_names>
<path>Directory path here</path>
</list_code_definition_names>"
        ),
        Tool::ApplyDiff => options
            .diff_strategy
            .map(|strategy| strategy.tool_description(options.cwd))
            .unwrap_or_default(),
        Tool::WriteToFile => format!(
            "\
## write_to_file
Description: Write complete content to a file, creating it and any missing directories if needed. An existing file is overwritten.
Parameters:
- path: (required) The path of the file to write to (relative to the current workspace directory {cwd})
- content: (required) The complete intended content of the file, without omissions.
- line_count: (required) The number of lines in the file.
Usage:
<write_to_file>
<path>File path here</path>
<content>
Your file content here
</content>
<line_count>total number of lines in the file</line_count>
</write_to_file>"
        ),
        Tool::InsertContent => format!(
            "\
## insert_content
Description: Insert lines into a file at a line number without rewriting the rest of it.
Parameters:
- path: (required) File path relative to the workspace directory {cwd}
- line: (required) Line number to insert before, or 0 to append at the end.
- content: (required) The content to insert.
Usage:
<insert_content>
<path>File path here</path>
<line>Line number</line>
<content>Content to insert</content>
</insert_content>"
        ),
        Tool::SearchAndReplace => format!(
            "\
## search_and_replace
Description: Find and replace text or regex matches in a file, optionally within a line range.
Parameters:
- path: (required) File path relative to the workspace directory {cwd}
- search: (required) Text or pattern to search for.
- replace: (required) Replacement text.
- use_regex: (optional) true to treat search as a regex.
- ignore_case: (optional) true to ignore case.
Usage:
<search_and_replace>
<path>File path here</path>
<search>Text to find</search>
<replace>Replacement text</replace>
</search_and_replace>"
        ),
        Tool::BrowserAction => {
            let viewport = options.browser_viewport_size.unwrap_or("900x600");
            format!(
                "\
## browser_action
Description: Interact with a Puppeteer-controlled browser. Every action except close returns a screenshot and the console log. \
The sequence must start with launch and end with close. The browser window has a resolution of {viewport} pixels.
Parameters:
- action: (required) One of launch, click, hover, type, scroll_down, scroll_up, resize, close.
- url: (optional) URL for launch.
- coordinate: (optional) x,y position for click and hover, within the {viewport} viewport.
- text: (optional) Text for type.
Usage:
<browser_action>
<action>Action to perform (e.g., launch, click, type, close)</action>
<url>URL to launch the browser at (optional)</url>
</browser_action>"
            )
        }
        Tool::ExecuteCommand => format!(
            "\
## execute_command
Description: Run a CLI command on the user's system. Tailor the command to the user's shell and explain what it does.
Parameters:
- command: (required) The command to execute.
- cwd: (optional) Working directory for the command (default: {cwd})
Usage:
<execute_command>
<command>Your command here</command>
<cwd>Working directory path (optional)</cwd>
</execute_command>"
        ),
        Tool::UseMcpTool => "\
## use_mcp_tool
Description: Call a tool provided by a connected MCP server.
Parameters:
- server_name: (required) The name of the MCP server providing the tool.
- tool_name: (required) The name of the tool to execute.
- arguments: (required) A JSON object with the tool's input parameters, following its input schema.
Usage:
<use_mcp_tool>
<server_name>server name here</server_name>
<tool_name>tool name here</tool_name>
<arguments>
{
  \"param1\": \"value1\"
}
</arguments>
</use_mcp_tool>"
            .to_string(),
        Tool::AccessMcpResource => "\
## access_mcp_resource
Description: Read a resource provided by a connected MCP server.
Parameters:
- server_name: (required) The name of the MCP server providing the resource.
- uri: (required) The URI identifying the resource.
Usage:
<access_mcp_resource>
<server_name>server name here</server_name>
<uri>resource URI here</uri>
</access_mcp_resource>"
            .to_string(),
        Tool::AskFollowupQuestion => "\
## ask_followup_question
Description: Ask the user a question when required information is missing. Offer 2-4 concrete suggested answers.
Parameters:
- question: (required) A clear, specific question.
- follow_up: (required) Suggested answers, each in its own <suggest> tag.
Usage:
<ask_followup_question>
<question>Your question here</question>
<follow_up>
<suggest>First suggestion</suggest>
<suggest>Second suggestion</suggest>
</follow_up>
</ask_followup_question>"
            .to_string(),
        Tool::AttemptCompletion => "\
## attempt_completion
Description: Present the final result once the task is complete and every previous tool use has been confirmed successful. \
Do not end the result with a question or an offer of further help.
Parameters:
- result: (required) The final result of the task.
Usage:
<attempt_completion>
<result>
Your final result description here
</result>
</attempt_completion>"
            .to_string(),
        Tool::SwitchMode => "\
## switch_mode
Description: Request a switch to another mode. The user must approve the switch.
Parameters:
- mode_slug: (required) The slug of the mode to switch to (e.g. \"architect\", \"pm\").
- reason: (optional) Why the switch is needed.
Usage:
<switch_mode>
<mode_slug>Mode slug here</mode_slug>
<reason>Reason for switching here</reason>
</switch_mode>"
            .to_string(),
        Tool::NewTask => "\
## new_task
Description: Start a new task in the given mode with an initial message.
Parameters:
- mode: (required) The slug of the mode to start the task in.
- message: (required) The initial user message or instructions for the task.
Usage:
<new_task>
<mode>your-mode-slug-here</mode>
<message>Your initial instructions here</message>
</new_task>"
            .to_string(),
        Tool::UpdateTodoList => "\
## update_todo_list
Description: Replace the task's todo list with an updated checklist. Use [ ] for pending, [x] for completed and [-] for in-progress items.
Parameters:
- todos: (required) The full checklist, one item per line.
Usage:
<update_todo_list>
<todos>
[x] Analyse requirements
[-] Draft the document
[ ] Review with the user
</todos>
</update_todo_list>"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::MultiSearchReplaceDiffStrategy;
    use crate::modes::ModeCatalog;

    fn names(tools: Vec<Tool>) -> Vec<&'static str> {
        tools.into_iter().map(Tool::name).collect()
    }

    #[test]
    fn helper_gets_read_tools_and_always_available() {
        let catalog = ModeCatalog::builtin();
        let helper = catalog.mode("helper").unwrap();
        let tools = names(tools_for_mode(helper, &ToolDescriptionOptions::new(Path::new("/p"))));
        assert_eq!(
            tools,
            vec![
                "read_file",
                "search_files",
                "list_files",
                "list_code_definition_names",
                "ask_followup_question",
                "attempt_completion",
                "switch_mode",
                "new_task",
                "update_todo_list",
            ]
        );
    }

    #[test]
    fn capability_flags_gate_tools() {
        let catalog = ModeCatalog::builtin();
        let code = catalog.mode("code").unwrap();
        let strategy = MultiSearchReplaceDiffStrategy;

        let plain = names(tools_for_mode(code, &ToolDescriptionOptions::new(Path::new("/p"))));
        assert!(!plain.contains(&"apply_diff"));
        assert!(!plain.contains(&"browser_action"));
        assert!(!plain.contains(&"use_mcp_tool"));
        assert!(plain.contains(&"execute_command"));

        let options = ToolDescriptionOptions {
            supports_computer_use: true,
            diff_strategy: Some(&strategy),
            include_mcp: true,
            ..ToolDescriptionOptions::new(Path::new("/p"))
        };
        let full = names(tools_for_mode(code, &options));
        assert!(full.contains(&"apply_diff"));
        assert!(full.contains(&"browser_action"));
        assert!(full.contains(&"access_mcp_resource"));
    }

    #[test]
    fn modes_group_does_not_duplicate_always_available() {
        let catalog = ModeCatalog::builtin();
        let pm = catalog.mode("pm").unwrap();
        let tools = names(tools_for_mode(pm, &ToolDescriptionOptions::new(Path::new("/p"))));
        assert_eq!(tools.iter().filter(|t| **t == "switch_mode").count(), 1);
    }

    #[test]
    fn descriptions_mention_workspace_and_restrictions() {
        let catalog = ModeCatalog::builtin();
        let architect = catalog.mode("architect").unwrap();
        let text = tool_descriptions_for_mode(architect, &ToolDescriptionOptions::new(Path::new("/proj")));
        assert!(text.starts_with("# Tools\n\n## read_file"));
        assert!(text.contains("current workspace directory /proj"));
        assert!(text.contains(r"restricted to paths matching `\.md$`"));
    }

    #[test]
    fn browser_description_uses_viewport() {
        let catalog = ModeCatalog::builtin();
        let helper = catalog.mode("helper").unwrap();
        let options = ToolDescriptionOptions {
            supports_computer_use: true,
            browser_viewport_size: Some("1280x800"),
            ..ToolDescriptionOptions::new(Path::new("/p"))
        };
        let text = tool_descriptions_for_mode(helper, &options);
        assert!(text.contains("resolution of 1280x800 pixels"));
    }
}
