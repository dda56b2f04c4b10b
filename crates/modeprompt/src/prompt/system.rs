//! System prompt generation.
//!
//! [`system_prompt`] takes one of two paths:
//!
//! - **Override**: a project or packaged override body exists for the mode
//!   (see [`load_system_prompt_file`]). The result is the mode's role
//!   definition, the body, and the custom-instructions block. No tool or
//!   capability sections are generated.
//! - **Full assembly**: every section in a fixed order, each separated by a
//!   blank line. Blocks that come out empty keep their position.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::builder::SystemPromptBuilder;
use super::language::format_language;
use super::sections::{
    CustomInstructionsOptions, SystemInfo, ToolDescriptionOptions, capabilities_section,
    custom_instructions_section, markdown_formatting_section, mcp_servers_section, modes_section,
    objective_section, rules_section, shared_tool_use_section, system_info_section,
    tool_descriptions_for_mode, tool_use_guidelines_section,
};
use super::source::load_system_prompt_file;
use super::variables::PromptVariables;
use crate::diff::DiffStrategy;
use crate::error::PromptError;
use crate::host::ExtensionContext;
use crate::mcp::{McpHub, has_available_servers};
use crate::modes::{BuiltinMode, CustomModePrompts, ModeCatalog, ToolGroup, prompt_component};

/// Everything one prompt generation needs besides the [`ExtensionContext`].
///
/// Built with [`new`](Self::new) and `with_*` methods:
///
/// ```
/// use modeprompt::prompt::SystemPromptRequest;
///
/// let request = SystemPromptRequest::new("/work/project", "architect")
///     .with_language("ru")
///     .with_diff_enabled(true)
///     .with_global_custom_instructions("Answer briefly.");
/// assert_eq!(request.mode, "architect");
/// ```
#[derive(Clone)]
pub struct SystemPromptRequest {
    /// Project working directory.
    pub cwd: PathBuf,
    /// Requested mode slug. Unknown slugs fall back to the default mode for
    /// full assembly.
    pub mode: String,
    pub catalog: ModeCatalog,
    pub custom_mode_prompts: Option<CustomModePrompts>,
    pub mcp_hub: Option<Arc<dyn McpHub>>,
    pub diff_strategy: Option<Arc<dyn DiffStrategy>>,
    /// Without this the diff strategy is ignored.
    pub diff_enabled: bool,
    pub supports_computer_use: bool,
    pub browser_viewport_size: Option<String>,
    pub enable_mcp_server_creation: bool,
    pub global_custom_instructions: Option<String>,
    /// Explicit response language. Takes precedence over `locale`.
    pub language: Option<String>,
    /// Host locale, normalised with [`format_language`] when no language is
    /// given.
    pub locale: Option<String>,
    pub ignore_instructions: Option<String>,
    pub shell: String,
    pub operating_system: String,
    pub home_dir: String,
}

impl SystemPromptRequest {
    pub fn new(cwd: impl Into<PathBuf>, mode: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            mode: mode.into(),
            catalog: ModeCatalog::builtin(),
            custom_mode_prompts: None,
            mcp_hub: None,
            diff_strategy: None,
            diff_enabled: false,
            supports_computer_use: false,
            browser_viewport_size: None,
            enable_mcp_server_creation: false,
            global_custom_instructions: None,
            language: None,
            locale: None,
            ignore_instructions: None,
            shell: default_shell().to_string(),
            operating_system: std::env::consts::OS.to_string(),
            home_dir: dirs::home_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn with_catalog(mut self, catalog: ModeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_custom_mode_prompts(mut self, prompts: CustomModePrompts) -> Self {
        self.custom_mode_prompts = Some(prompts);
        self
    }

    pub fn with_mcp_hub(mut self, hub: Arc<dyn McpHub>) -> Self {
        self.mcp_hub = Some(hub);
        self
    }

    pub fn with_diff_strategy(mut self, strategy: Arc<dyn DiffStrategy>) -> Self {
        self.diff_strategy = Some(strategy);
        self
    }

    pub fn with_diff_enabled(mut self, enabled: bool) -> Self {
        self.diff_enabled = enabled;
        self
    }

    pub fn with_computer_use(mut self, supported: bool) -> Self {
        self.supports_computer_use = supported;
        self
    }

    pub fn with_browser_viewport_size(mut self, size: impl Into<String>) -> Self {
        self.browser_viewport_size = Some(size.into());
        self
    }

    pub fn with_mcp_server_creation(mut self, enabled: bool) -> Self {
        self.enable_mcp_server_creation = enabled;
        self
    }

    pub fn with_global_custom_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.global_custom_instructions = Some(instructions.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_ignore_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.ignore_instructions = Some(instructions.into());
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_operating_system(mut self, os: impl Into<String>) -> Self {
        self.operating_system = os.into();
        self
    }

    pub fn with_home_dir(mut self, home: impl Into<String>) -> Self {
        self.home_dir = home.into();
        self
    }

    /// The explicit language, else the normalised locale.
    pub fn effective_language(&self) -> Option<String> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| self.locale.as_deref().map(format_language))
    }

    /// Values for `{{...}}` placeholders in override files.
    pub fn variables(&self) -> PromptVariables {
        PromptVariables {
            workspace: Some(self.cwd.display().to_string()),
            mode: Some(self.mode.clone()),
            language: self.effective_language(),
            shell: Some(self.shell.clone()),
            operating_system: Some(self.operating_system.clone()),
        }
    }

    /// The diff strategy, only when diff editing is enabled.
    fn effective_diff_strategy(&self) -> Option<&dyn DiffStrategy> {
        if self.diff_enabled {
            self.diff_strategy.as_deref()
        } else {
            None
        }
    }
}

fn default_shell() -> &'static str {
    if cfg!(windows) { "cmd.exe" } else { "/bin/sh" }
}

/// Generate the system prompt for `request.mode`.
///
/// Fails with [`PromptError::MissingContext`] before touching anything when
/// no context is given. I/O failures other than "not found" are returned.
pub async fn system_prompt(
    ctx: Option<&ExtensionContext>,
    request: &SystemPromptRequest,
) -> Result<String, PromptError> {
    let ctx = ctx.ok_or(PromptError::MissingContext)?;
    let cwd = request.cwd.as_path();
    let language = request.effective_language();
    let global_instructions = request.global_custom_instructions.as_deref().unwrap_or_default();
    let instructions_options = CustomInstructionsOptions {
        language: language.as_deref(),
        ignore_instructions: request.ignore_instructions.as_deref(),
    };
    let component = prompt_component(request.custom_mode_prompts.as_ref(), &request.mode);

    let override_body =
        load_system_prompt_file(ctx, cwd, &request.mode, &request.variables()).await?;
    if !override_body.is_empty() {
        info!("Generating override prompt for mode '{}'", request.mode);
        let role_definition = request.catalog.role_definition(&request.mode, component);
        let custom = custom_instructions_section(
            ctx,
            cwd,
            &request.mode,
            "",
            global_instructions,
            instructions_options,
        )
        .await?;
        return Ok(SystemPromptBuilder::new(role_definition)
            .slot(override_body)
            .slot(custom)
            .build());
    }

    let mode = request.catalog.current_mode(&request.mode);
    if mode.slug != request.mode {
        debug!(
            "Mode '{}' not found, assembling prompt for '{}'",
            request.mode, mode.slug
        );
    }
    info!("Assembling full prompt for mode '{}'", mode.slug);

    let role_definition = request.catalog.role_definition(&mode.slug, component);
    let diff_strategy = request.effective_diff_strategy();
    if let Some(strategy) = diff_strategy {
        debug!("Diff editing enabled with '{}'", strategy.name());
    }
    let mcp_hub = request.mcp_hub.as_deref();
    let include_mcp = mode.has_group(ToolGroup::Mcp) && has_available_servers(mcp_hub);
    let base_instructions = load_builtin_mode_instructions(ctx, &mode.slug).await;

    let (modes, mcp_servers) = tokio::join!(
        modes_section(ctx, cwd, &request.catalog),
        async {
            match mcp_hub {
                Some(hub) if include_mcp => {
                    mcp_servers_section(hub, request.enable_mcp_server_creation).await
                }
                _ => String::new(),
            }
        }
    );

    let tool_options = ToolDescriptionOptions {
        cwd,
        supports_computer_use: request.supports_computer_use,
        diff_strategy,
        browser_viewport_size: request.browser_viewport_size.as_deref(),
        include_mcp,
    };
    let system_info = SystemInfo {
        operating_system: &request.operating_system,
        shell: &request.shell,
        home_dir: &request.home_dir,
        cwd,
    };
    let custom = custom_instructions_section(
        ctx,
        cwd,
        &mode.slug,
        &base_instructions,
        global_instructions,
        instructions_options,
    )
    .await?;

    Ok(SystemPromptBuilder::new(role_definition)
        .slot(markdown_formatting_section())
        .slot(shared_tool_use_section())
        .slot(tool_descriptions_for_mode(mode, &tool_options))
        .slot(tool_use_guidelines_section())
        .slot(mcp_servers)
        .slot(capabilities_section(
            cwd,
            request.supports_computer_use,
            include_mcp,
            diff_strategy,
        ))
        .slot(modes)
        .slot(rules_section(cwd, request.supports_computer_use, diff_strategy))
        .slot(system_info_section(&system_info))
        .slot(objective_section())
        .slot(custom)
        .build())
}

/// Base instructions packaged for `mode`: the first candidate file with
/// content, trimmed. Unreadable candidates are skipped; no candidate yields
/// an empty string.
pub async fn load_builtin_mode_instructions(ctx: &ExtensionContext, mode: &str) -> String {
    let Some(builtin) = BuiltinMode::from_slug(mode) else {
        return String::new();
    };
    for candidate in builtin.instruction_candidates() {
        let path = ctx.package_root().join(candidate);
        match ctx.read_trimmed(&path).await {
            Ok(Some(content)) => {
                debug!("Base instructions for '{mode}' from {}", path.display());
                return content;
            }
            Ok(None) => {}
            Err(e) => debug!("Skipping instruction candidate: {e}"),
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::host::testing::MemoryFs;
    use crate::modes::DEFAULT_MODE_SLUG;

    fn memory_context(fs: MemoryFs) -> ExtensionContext {
        ExtensionContext::new("/pkg", EngineConfig::default().with_global_config_dir(None))
            .unwrap()
            .with_fs(Arc::new(fs))
    }

    #[tokio::test]
    async fn missing_context_fails_before_io() {
        let request = SystemPromptRequest::new("/proj", "code");
        let err = system_prompt(None, &request).await.unwrap_err();
        assert!(matches!(err, PromptError::MissingContext));
    }

    #[tokio::test]
    async fn instruction_candidates_are_tried_in_order() {
        let ctx = memory_context(
            MemoryFs::new()
                .with_failing("/pkg/dist/prompts/review.txt")
                .with_file("/pkg/dist/prompts/Reviewer/reviewer.txt", "  Review carefully.  "),
        );
        assert_eq!(load_builtin_mode_instructions(&ctx, "debug").await, "Review carefully.");
        assert_eq!(load_builtin_mode_instructions(&ctx, "pm").await, "");
        assert_eq!(load_builtin_mode_instructions(&ctx, "translator").await, "");
    }

    #[test]
    fn language_prefers_explicit_value() {
        let request = SystemPromptRequest::new("/proj", DEFAULT_MODE_SLUG).with_locale("pt-br");
        assert_eq!(request.effective_language().as_deref(), Some("pt-BR"));
        let request = request.with_language("ru");
        assert_eq!(request.effective_language().as_deref(), Some("ru"));
        assert_eq!(SystemPromptRequest::new("/proj", "code").effective_language(), None);
    }

    #[test]
    fn diff_strategy_requires_diff_enabled() {
        let request = SystemPromptRequest::new("/proj", "code")
            .with_diff_strategy(Arc::new(crate::diff::MultiSearchReplaceDiffStrategy));
        assert!(request.effective_diff_strategy().is_none());
        assert!(request.with_diff_enabled(true).effective_diff_strategy().is_some());
    }

    #[test]
    fn variables_carry_request_values() {
        let vars = SystemPromptRequest::new("/proj", "architect")
            .with_shell("/bin/zsh")
            .with_operating_system("linux")
            .variables();
        assert_eq!(
            vars.interpolate("{{workspace}} {{mode}} {{shell}} {{operatingSystem}}"),
            "/proj architect /bin/zsh linux"
        );
    }
}
