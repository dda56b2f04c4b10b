//! Command-line host configuration.
//!
//! [`CliConfig`] captures where the host finds things (project, package,
//! global config dir, JSON side files) and turns them into engine types via
//! [`build_context`](CliConfig::build_context) and
//! [`build_request`](CliConfig::build_request).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use modeprompt::prelude::*;
use serde::de::DeserializeOwned;

/// Failures while preparing an engine call.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Where the host finds its inputs.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Project working directory. Default: `"."`.
    pub cwd: PathBuf,
    /// Installed package root holding `dist/prompts`. Default: `"."`.
    pub package_root: PathBuf,
    /// Global config dir override. `None` uses `~/.roo`.
    pub global_config_dir: Option<PathBuf>,
    /// Skip the global config dir entirely. Default: `false`.
    pub no_global: bool,
    /// `{ "customModes": [...] }` file.
    pub custom_modes_path: Option<PathBuf>,
    /// `{ "servers": [...] }` MCP snapshot file.
    pub mcp_servers_path: Option<PathBuf>,
    /// Per-mode prompt components, `{ "<slug>": { ... } }`.
    pub mode_prompts_path: Option<PathBuf>,
    /// Extraction phrase tables.
    pub patterns_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            cwd: PathBuf::from("."),
            package_root: PathBuf::from("."),
            global_config_dir: None,
            no_global: false,
            custom_modes_path: None,
            mcp_servers_path: None,
            mode_prompts_path: None,
            patterns_path: None,
        }
    }
}

/// Flags that only matter for prompt generation.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub diff_enabled: bool,
    pub computer_use: bool,
    pub browser_viewport_size: Option<String>,
    pub mcp_server_creation: bool,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub global_instructions: Option<String>,
    pub ignore_instructions: Option<String>,
    pub shell: Option<String>,
}

impl CliConfig {
    pub fn build_engine_config(&self) -> Result<EngineConfig, CliError> {
        let mut config = EngineConfig::default();
        if self.no_global {
            config = config.with_global_config_dir(None);
        } else if let Some(dir) = &self.global_config_dir {
            config = config.with_global_config_dir(Some(dir.clone()));
        }
        if let Some(path) = &self.patterns_path {
            config = config.with_patterns(read_json::<ExtractionPatterns>(path)?);
        }
        Ok(config)
    }

    pub fn build_context(&self) -> Result<ExtensionContext, CliError> {
        Ok(ExtensionContext::new(
            &self.package_root,
            self.build_engine_config()?,
        )?)
    }

    pub fn load_catalog(&self) -> Result<ModeCatalog, CliError> {
        let Some(path) = &self.custom_modes_path else {
            return Ok(ModeCatalog::builtin());
        };
        let json = read_text(path)?;
        ModeCatalog::from_json(&json).map_err(|source| CliError::Json {
            path: path.clone(),
            source,
        })
    }

    pub fn load_mcp_hub(&self) -> Result<Option<StaticMcpHub>, CliError> {
        self.mcp_servers_path
            .as_deref()
            .map(read_json::<StaticMcpHub>)
            .transpose()
    }

    pub fn load_mode_prompts(&self) -> Result<Option<CustomModePrompts>, CliError> {
        self.mode_prompts_path
            .as_deref()
            .map(read_json::<CustomModePrompts>)
            .transpose()
    }

    /// Assemble a generation request for `mode`.
    pub fn build_request(
        &self,
        mode: &str,
        options: &PromptOptions,
    ) -> Result<SystemPromptRequest, CliError> {
        let mut request = SystemPromptRequest::new(&self.cwd, mode)
            .with_catalog(self.load_catalog()?)
            .with_diff_strategy(Arc::new(MultiSearchReplaceDiffStrategy))
            .with_diff_enabled(options.diff_enabled)
            .with_computer_use(options.computer_use)
            .with_mcp_server_creation(options.mcp_server_creation);

        if let Some(prompts) = self.load_mode_prompts()? {
            request = request.with_custom_mode_prompts(prompts);
        }
        if let Some(hub) = self.load_mcp_hub()? {
            request = request.with_mcp_hub(Arc::new(hub));
        }
        if let Some(size) = &options.browser_viewport_size {
            request = request.with_browser_viewport_size(size);
        }
        if let Some(language) = &options.language {
            request = request.with_language(language);
        }
        if let Some(locale) = &options.locale {
            request = request.with_locale(locale);
        }
        if let Some(text) = &options.global_instructions {
            request = request.with_global_custom_instructions(text);
        }
        if let Some(text) = &options.ignore_instructions {
            request = request.with_ignore_instructions(text);
        }
        if let Some(shell) = &options.shell {
            request = request.with_shell(shell);
        }
        Ok(request)
    }
}

/// Locale from a POSIX `LANG` value: `"pt_BR.UTF-8"` -> `"pt_BR"`.
pub fn locale_from_lang(lang: &str) -> Option<String> {
    let locale = lang.split(['.', '@']).next().unwrap_or_default().trim();
    match locale {
        "" | "C" | "POSIX" => None,
        other => Some(other.to_string()),
    }
}

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}
