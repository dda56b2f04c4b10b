//! Convenience re-exports for hosts.
//!
//! ```ignore
//! use modeprompt::prelude::*;
//! ```
//!
//! Section renderers and the extractor internals are left out; import those
//! from [`crate::prompt`] when needed.

// ── Context and configuration ───────────────────────────────────────
pub use crate::config::EngineConfig;
pub use crate::error::PromptError;
pub use crate::host::{DirEntry, ExtensionContext, FsFuture, HostFs, LocalFs};

// ── Modes ───────────────────────────────────────────────────────────
pub use crate::modes::{
    BuiltinMode, CustomModePrompts, DEFAULT_MODE_SLUG, GroupEntry, GroupOptions, ModeCatalog,
    ModeConfig, ModeOrigin, PromptComponent, ToolGroup, builtin_modes,
};

// ── Collaborators ───────────────────────────────────────────────────
pub use crate::diff::{DiffStrategy, MultiSearchReplaceDiffStrategy};
pub use crate::mcp::{McpHub, McpResource, McpServer, McpServerStatus, McpTool, StaticMcpHub};

// ── Prompt ──────────────────────────────────────────────────────────
pub use crate::prompt::{
    ExtractionPatterns, ModeInfo, ModeInfoOptions, PromptVariables, SystemPromptRequest,
    export_builtin_rules, export_role_instructions, format_language, load_mode_info,
    load_system_prompt_file, system_prompt,
};
