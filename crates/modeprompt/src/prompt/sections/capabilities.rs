//! Environment-dependent sections: CAPABILITIES, RULES and SYSTEM
//! INFORMATION.

use std::path::Path;

use crate::diff::DiffStrategy;
use crate::prompt::builder::section;

pub fn capabilities_section(
    cwd: &Path,
    supports_computer_use: bool,
    include_mcp: bool,
    diff_strategy: Option<&dyn DiffStrategy>,
) -> String {
    let cwd = cwd.display();
    let browser = if supports_computer_use { ", use the browser" } else { "" };
    let editing = if diff_strategy.is_some() {
        "apply_diff or write_to_file"
    } else {
        "write_to_file"
    };

    let mut lines = vec![
        format!(
            "- You have access to tools that let you execute CLI commands on the user's computer, list files, \
             view source code definitions, regex search{browser}, read and write files, and ask follow-up \
             questions. These tools help you write documents, review artifacts and keep the project's \
             knowledge up to date."
        ),
        format!(
            "- When the user initially gives you a task, a recursive list of all filepaths in the current \
             workspace directory ('{cwd}') will be included in environment_details. Use it to understand the \
             project's structure before reading individual files."
        ),
        format!(
            "- Use {editing} to make changes to files. Prefer small, targeted edits over rewriting documents \
             you have not read."
        ),
    ];
    if supports_computer_use {
        lines.push(
            "- You can use the browser_action tool to interact with websites through a Puppeteer-controlled \
             browser, which is useful for checking published documents and prototypes."
                .to_string(),
        );
    }
    if include_mcp {
        lines.push(
            "- You have access to MCP servers that may provide additional tools and resources. Each server \
             may provide different capabilities that you can use to accomplish tasks more effectively."
                .to_string(),
        );
    }

    section("CAPABILITIES", &lines.join("\n"))
}

pub fn rules_section(
    cwd: &Path,
    supports_computer_use: bool,
    diff_strategy: Option<&dyn DiffStrategy>,
) -> String {
    let cwd = cwd.display();
    let editing_tools = if diff_strategy.is_some() {
        "apply_diff (for replacing lines in existing files), write_to_file (for creating new files or \
         complete file rewrites), insert_content (for adding lines) and search_and_replace (for finding \
         and replacing text)"
    } else {
        "write_to_file (for creating new files or complete file rewrites), insert_content (for adding \
         lines) and search_and_replace (for finding and replacing text)"
    };

    let mut rules = vec![
        format!("- The project base directory is: {cwd}"),
        "- All file paths must be relative to the project base directory. You cannot `cd` into a \
         different directory to complete a task; pass a working directory to execute_command instead."
            .to_string(),
        format!("- For editing files, you have access to these tools: {editing_tools}."),
        "- Some modes restrict which files they may edit. An edit to a restricted file is rejected; switch \
         to a mode that allows it instead."
            .to_string(),
        "- Do not ask for more information than necessary. Use the tools provided to accomplish the task \
         efficiently, and use ask_followup_question only when you cannot proceed otherwise."
            .to_string(),
        "- Your goal is to accomplish the user's task, not to hold a conversation. Never end \
         attempt_completion with a question."
            .to_string(),
        "- Do not start messages with \"Great\", \"Certainly\", \"Okay\" or \"Sure\". Be direct and \
         technical."
            .to_string(),
        "- Wait for the user's response after each tool use to confirm it succeeded before continuing."
            .to_string(),
    ];
    if supports_computer_use {
        rules.push(
            "- Use browser_action only when the task needs a browser, and always finish with the close \
             action."
                .to_string(),
        );
    }

    section("RULES", &rules.join("\n"))
}

/// Host facts reported in the SYSTEM INFORMATION section.
#[derive(Debug, Clone, Copy)]
pub struct SystemInfo<'a> {
    pub operating_system: &'a str,
    pub shell: &'a str,
    pub home_dir: &'a str,
    pub cwd: &'a Path,
}

pub fn system_info_section(info: &SystemInfo<'_>) -> String {
    section(
        "SYSTEM INFORMATION",
        &format!(
            "\
Operating System: {os}
Default Shell: {shell}
Home Directory: {home}
Current Workspace Directory: {cwd}

The Current Workspace Directory is the active project directory, and is therefore the default directory \
for all tool operations.",
            os = info.operating_system,
            shell = info.shell,
            home = info.home_dir,
            cwd = info.cwd.display(),
        ),
    )
}
