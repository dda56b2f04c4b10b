//! Override prompt resolution.
//!
//! An override replaces the generated prompt body for a mode. It comes from
//! the first of:
//!
//! 1. `<cwd>/.roo/system-prompt-<mode>` in the project,
//! 2. the mode's packaged prompt file (`dist/prompts/<file>`),
//!
//! that exists and is not blank. The content is trimmed and interpolated
//! with the request's [`PromptVariables`]. No override yields an empty
//! string, which tells the assembler to build the full prompt.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::variables::PromptVariables;
use crate::error::PromptError;
use crate::host::ExtensionContext;
use crate::modes::BuiltinMode;

/// Prefix of the project override file name.
const OVERRIDE_FILE_PREFIX: &str = "system-prompt-";

/// Where the project override for `mode` lives.
pub fn system_prompt_file_path(ctx: &ExtensionContext, cwd: &Path, mode: &str) -> PathBuf {
    ctx.project_config_dir(cwd)
        .join(format!("{OVERRIDE_FILE_PREFIX}{mode}"))
}

/// Where the packaged override for `mode` lives, if the mode has one.
pub fn builtin_prompt_file_path(ctx: &ExtensionContext, mode: &str) -> Option<PathBuf> {
    BuiltinMode::from_slug(mode).map(|m| ctx.assets_dir().join(m.prompt_filename()))
}

/// Load the override prompt body for `mode`, or an empty string.
///
/// A missing file is not an error. Any other read failure is returned, and
/// the packaged file is never consulted once a project override is found.
pub async fn load_system_prompt_file(
    ctx: &ExtensionContext,
    cwd: &Path,
    mode: &str,
    variables: &PromptVariables,
) -> Result<String, PromptError> {
    let project_path = system_prompt_file_path(ctx, cwd, mode);
    if let Some(content) = ctx.read_trimmed(&project_path).await? {
        debug!("Using project prompt override {}", project_path.display());
        return Ok(variables.interpolate(&content));
    }

    if let Some(builtin_path) = builtin_prompt_file_path(ctx, mode)
        && let Some(content) = ctx.read_trimmed(&builtin_path).await?
    {
        debug!("Using packaged prompt override {}", builtin_path.display());
        return Ok(variables.interpolate(&content));
    }

    Ok(String::new())
}

/// Create the project configuration directory if needed and return it.
///
/// Safe to call concurrently: "already exists" counts as success.
pub async fn ensure_config_dir(ctx: &ExtensionContext, cwd: &Path) -> Result<PathBuf, PromptError> {
    let dir = ctx.project_config_dir(cwd);
    ctx.ensure_dir(&dir).await?;
    Ok(dir)
}
