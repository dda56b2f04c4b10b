//! Copying packaged prompt assets into a project.
//!
//! [`export_builtin_rules`] seeds the project config dir with the packaged
//! `rules-*` directories so they take part in resolution.
//! [`export_role_instructions`] copies the whole packaged prompts tree into
//! `<cwd>/prompts` for reading and editing.

use std::path::{Path, PathBuf};

use tracing::info;

use super::source::ensure_config_dir;
use crate::error::PromptError;
use crate::host::ExtensionContext;

/// Copy every packaged `rules-*` directory into the project config dir.
///
/// Directories are copied recursively and existing files are overwritten.
/// Returns the exported directory names in listing order.
pub async fn export_builtin_rules(
    ctx: &ExtensionContext,
    cwd: &Path,
) -> Result<Vec<String>, PromptError> {
    let assets = ctx.assets_dir();
    let rule_dirs: Vec<String> = ctx
        .list_dir(&assets)
        .await?
        .into_iter()
        .filter(|entry| entry.is_dir && entry.name.starts_with("rules-"))
        .map(|entry| entry.name)
        .collect();
    if rule_dirs.is_empty() {
        return Err(PromptError::NoBuiltinRules { path: assets });
    }

    let target = ensure_config_dir(ctx, cwd).await?;
    for name in &rule_dirs {
        copy_tree(ctx, &assets.join(name), &target.join(name)).await?;
    }
    info!(
        "Exported {} built-in rules director{} to {}",
        rule_dirs.len(),
        if rule_dirs.len() == 1 { "y" } else { "ies" },
        target.display()
    );
    Ok(rule_dirs)
}

/// Directory under the project root that receives the packaged prompts.
pub const EXPORTED_PROMPTS_DIR: &str = "prompts";

/// Copy the entire packaged prompts tree into `<cwd>/prompts`.
///
/// Existing files are overwritten. Returns the target directory.
pub async fn export_role_instructions(
    ctx: &ExtensionContext,
    cwd: &Path,
) -> Result<PathBuf, PromptError> {
    let assets = ctx.assets_dir();
    if ctx.list_dir(&assets).await?.is_empty() {
        return Err(PromptError::NoPackagedPrompts { path: assets });
    }

    let target = cwd.join(EXPORTED_PROMPTS_DIR);
    copy_tree(ctx, &assets, &target).await?;
    info!("Exported packaged prompts to {}", target.display());
    Ok(target)
}

async fn copy_tree(ctx: &ExtensionContext, from: &Path, to: &Path) -> Result<(), PromptError> {
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(from.to_path_buf(), to.to_path_buf())];
    while let Some((src, dst)) = pending.pop() {
        ctx.ensure_dir(&dst).await?;
        for entry in ctx.list_dir(&src).await? {
            let (src_path, dst_path) = (src.join(&entry.name), dst.join(&entry.name));
            if entry.is_dir {
                pending.push((src_path, dst_path));
            } else if entry.is_file {
                ctx.fs()
                    .copy_file(&src_path, &dst_path)
                    .await
                    .map_err(|source| PromptError::Copy {
                        from: src_path.clone(),
                        to: dst_path.clone(),
                        source,
                    })?;
            }
        }
    }
    Ok(())
}
