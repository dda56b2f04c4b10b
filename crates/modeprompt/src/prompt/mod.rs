//! Prompt resolution and assembly.
//!
//! Bottom-up:
//!
//! 1. **[`variables`]**: `{{name}}` substitution for override files.
//! 2. **[`source`]**: the single best override body for a mode.
//! 3. **[`extract`]**: role / description / "when to use" from free text.
//! 4. **[`mode_info`]**: those fields merged across ranked rule sources.
//! 5. **[`system`]**: the final prompt, either from an override or fully
//!    assembled from [`sections`] with the [`SystemPromptBuilder`].
//!
//! [`export`] copies the packaged rules and prompts into a project so users
//! can edit them.

pub mod builder;
pub mod export;
pub mod extract;
pub mod language;
pub mod mode_info;
pub mod sections;
pub mod source;
pub mod system;
pub mod variables;

pub use builder::SystemPromptBuilder;
pub use export::{export_builtin_rules, export_role_instructions};
pub use extract::{ExtractionPatterns, FieldExtractor};
pub use language::format_language;
pub use mode_info::{
    ModeInfo, ModeInfoOptions, description_from_rules, load_builtin_mode_rules, load_mode_info,
    role_definition_from_rules, try_load_mode_info, when_to_use_from_rules,
};
pub use source::{ensure_config_dir, load_system_prompt_file, system_prompt_file_path};
pub use system::{SystemPromptRequest, load_builtin_mode_instructions, system_prompt};
pub use variables::PromptVariables;
