//! Prompt sections, one function per block of the generated prompt.
//!
//! Sections that only depend on their arguments are plain functions; the
//! ones that consult the filesystem or the mode catalog are async. Each
//! returns the full block, including its `====` rule and title where the
//! block has one.

pub mod capabilities;
pub mod custom_instructions;
pub mod mcp_servers;
pub mod modes;
pub mod tools;

pub use capabilities::{SystemInfo, capabilities_section, rules_section, system_info_section};
pub use custom_instructions::{CustomInstructionsOptions, custom_instructions_section};
pub use mcp_servers::mcp_servers_section;
pub use modes::modes_section;
pub use tools::{Tool, ToolDescriptionOptions, tool_descriptions_for_mode, tools_for_mode};

use super::builder::section;

pub fn markdown_formatting_section() -> String {
    section(
        "MARKDOWN RULES",
        "ALL responses MUST show ANY `language construct` OR filename reference as clickable, exactly as \
         [`filename OR language.declaration()`](relative/file/path.ext:line); line is required for \
         `syntax` and optional for filename links. This applies to ALL markdown responses and ALSO \
         those in <attempt_completion>",
    )
}

pub fn shared_tool_use_section() -> String {
    section(
        "TOOL USE",
        "\
You have access to a set of tools that are executed upon the user's approval. You can use one tool per \
message, and will receive the result of that tool use in the user's response. You use tools step-by-step \
to accomplish a given task, with each tool use informed by the result of the previous tool use.

# Tool Use Formatting

Tool uses are formatted using XML-style tags. The tool name itself becomes the XML tag name. Each \
parameter is enclosed within its own set of tags. Here's the structure:

<actual_tool_name>
<parameter1_name>value1</parameter1_name>
<parameter2_name>value2</parameter2_name>
...
</actual_tool_name>

For example, to use the read_file tool:

<read_file>
<path>docs/requirements.md</path>
</read_file>

Always use the actual tool name as the XML tag name for proper parsing and execution.",
    )
}

/// Guidelines follow the tool descriptions directly, so they carry a
/// heading rather than a ruled title.
pub fn tool_use_guidelines_section() -> String {
    "\
# Tool Use Guidelines

1. In <thinking> tags, assess what information you already have and what information you need to proceed with the task.
2. Choose the most appropriate tool based on the task and the tool descriptions provided.
3. If multiple actions are needed, use one tool at a time per message, each informed by the result of the previous one.
4. Formulate your tool use using the XML format specified for each tool.
5. After each tool use, the user will respond with the result of that tool use. Use it to decide the next step.
6. ALWAYS wait for user confirmation after each tool use before proceeding."
        .to_string()
}

pub fn objective_section() -> String {
    section(
        "OBJECTIVE",
        "\
You accomplish a given task iteratively, breaking it down into clear steps and working through them methodically.

1. Analyze the user's task and set clear, achievable goals to accomplish it. Prioritize these goals in a logical order.
2. Work through these goals sequentially, utilizing available tools one at a time as necessary.
3. Before calling a tool, check that every required parameter is known or can be reasonably inferred. \
If a required value is missing, ask the user for it with ask_followup_question instead of guessing.
4. Once you've completed the user's task, use the attempt_completion tool to present the result.
5. The user may provide feedback, which you can use to make improvements and try again. Do not continue in \
pointless back and forth conversations.",
    )
}
