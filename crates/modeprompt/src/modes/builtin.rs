//! The built-in mode catalog and its packaged-asset lookup tables.

use std::sync::LazyLock;

use super::{GroupEntry, GroupOptions, ModeConfig, ModeOrigin, ToolGroup};

/// Slug used when a request names no mode, or an unknown one.
pub const DEFAULT_MODE_SLUG: &str = "code";

/// Modes shipped with the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMode {
    /// Business analyst.
    Code,
    Architect,
    /// System analyst.
    Ask,
    /// Reviewer.
    Debug,
    Designer,
    Helper,
    /// Project manager.
    Pm,
}

impl BuiltinMode {
    pub const ALL: [BuiltinMode; 7] = [
        Self::Code,
        Self::Architect,
        Self::Ask,
        Self::Debug,
        Self::Designer,
        Self::Helper,
        Self::Pm,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Architect => "architect",
            Self::Ask => "ask",
            Self::Debug => "debug",
            Self::Designer => "designer",
            Self::Helper => "helper",
            Self::Pm => "pm",
        }
    }

    /// Packaged override prompt, relative to the assets directory.
    pub fn prompt_filename(self) -> &'static str {
        match self {
            Self::Code => "ba.txt",
            Self::Architect => "architect.txt",
            Self::Ask => "sa.txt",
            Self::Debug => "reviewer.txt",
            Self::Designer => "designer.txt",
            Self::Helper => "helper.txt",
            Self::Pm => "pm.txt",
        }
    }

    /// Candidate base-instruction files, relative to the package root, in
    /// the order they are tried.
    pub fn instruction_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Code => &["dist/prompts/ba.txt", "dist/prompts/BA/ba.txt"],
            Self::Architect => &[
                "dist/prompts/architect.txt",
                "dist/prompts/Architect/architect.txt",
            ],
            Self::Ask => &["dist/prompts/sa.txt", "dist/prompts/SA/SA.txt"],
            Self::Debug => &["dist/prompts/review.txt", "dist/prompts/Reviewer/reviewer.txt"],
            Self::Designer => &[
                "dist/prompts/designer.txt",
                "dist/prompts/Designer/designer.txt",
            ],
            Self::Helper => &["dist/prompts/helper.txt", "dist/prompts/Helper/helper.txt"],
            Self::Pm => &["dist/prompts/pm.txt", "dist/prompts/PM/pm.txt"],
        }
    }
}

/// Built-in mode records, in display order. The first is the default.
pub fn builtin_modes() -> &'static [ModeConfig] {
    &BUILTIN_MODES
}

static BUILTIN_MODES: LazyLock<Vec<ModeConfig>> = LazyLock::new(|| {
    use ToolGroup::*;
    let markdown_only = || GroupOptions {
        file_regex: Some(r"\.md$".into()),
        description: Some("Markdown files only".into()),
    };
    vec![
        builtin(
            BuiltinMode::Code,
            "📋 BA (Business Analyst)",
            "You are Roo, an experienced business analyst who turns stakeholder needs into clear, \
             testable requirements: user stories, use cases, activity diagrams and acceptance criteria.",
            "Use this mode to elicit, structure and document business requirements.",
            "Responsible for generating requirements (User Story, Use Case, Activity Diagram, Acceptance Criteria).",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::Plain(Edit),
                GroupEntry::Plain(Browser),
                GroupEntry::Plain(Command),
                GroupEntry::Plain(Mcp),
            ],
        ),
        builtin(
            BuiltinMode::Architect,
            "🏗️ Architect",
            "You are Roo, a software architect who designs system structure and documents it as \
             component diagrams and architecture decision records.",
            "Use this mode to plan system structure or produce architecture documents before implementation.",
            "Generates architectural documents (currently: component diagram).",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::WithOptions(Edit, markdown_only()),
                GroupEntry::Plain(Browser),
                GroupEntry::Plain(Mcp),
            ],
        ),
        builtin(
            BuiltinMode::Ask,
            "📝 SA (System Analyst)",
            "You are Roo, a system analyst who translates requirements into precise system \
             specifications: interfaces, data models, integration flows and constraints.",
            "Use this mode to prepare system analysis documents from agreed requirements.",
            "Prepares system analysis documents.",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::WithOptions(Edit, markdown_only()),
                GroupEntry::Plain(Browser),
                GroupEntry::Plain(Mcp),
            ],
        ),
        builtin(
            BuiltinMode::Debug,
            "🔍 Reviewer",
            "You are Roo, a senior reviewer who examines architecture and analysis documents for \
             security, maintainability and consistency, and reports concrete findings.",
            "Use this mode to review documents or code and get prioritised, actionable findings.",
            "Reviews architecture, security, maintainability and senior-level system analysis documents.",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::Plain(Edit),
                GroupEntry::Plain(Browser),
                GroupEntry::Plain(Command),
                GroupEntry::Plain(Mcp),
            ],
        ),
        builtin(
            BuiltinMode::Designer,
            "🎨 Designer",
            "You are Roo, a product designer who describes screens, user flows and interaction \
             details so they can be implemented without guesswork.",
            "Use this mode to describe UI screens, user flows and interaction details.",
            "Produces UI and UX design descriptions.",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::WithOptions(Edit, markdown_only()),
                GroupEntry::Plain(Browser),
                GroupEntry::Plain(Mcp),
            ],
        ),
        builtin(
            BuiltinMode::Helper,
            "❓ Helper",
            "You are Roo, a knowledgeable assistant who answers questions about the project, its \
             documents and the available modes.",
            "Use this mode for questions and explanations that do not require changing files.",
            "Answers questions and explains project artifacts.",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::Plain(Browser),
                GroupEntry::Plain(Mcp),
            ],
        ),
        builtin(
            BuiltinMode::Pm,
            "📈 PM (Project Manager)",
            "You are Roo, a project manager who breaks work into milestones and tasks, tracks \
             risks and keeps stakeholders informed.",
            "Use this mode to plan delivery, decompose work and track risks.",
            "Plans delivery and manages project tasks.",
            vec![
                GroupEntry::Plain(Read),
                GroupEntry::WithOptions(Edit, markdown_only()),
                GroupEntry::Plain(Mcp),
                GroupEntry::Plain(Modes),
            ],
        ),
    ]
});

fn builtin(
    mode: BuiltinMode,
    name: &str,
    role_definition: &str,
    when_to_use: &str,
    description: &str,
    groups: Vec<GroupEntry>,
) -> ModeConfig {
    ModeConfig {
        slug: mode.slug().to_string(),
        name: name.to_string(),
        role_definition: role_definition.to_string(),
        when_to_use: Some(when_to_use.to_string()),
        description: Some(description.to_string()),
        custom_instructions: None,
        groups,
        origin: ModeOrigin::BuiltIn,
    }
}
