//! Mode summary resolution across ranked sources.
//!
//! [`load_mode_info`] answers "what is this mode, and when should I use it?"
//! without generating a prompt. Fields are gathered from, in rank order:
//!
//! 1. `rules-<mode>/` in the project config dir, then the global one,
//! 2. the packaged `dist/prompts/rules-<mode>/` documents, then the mode's
//!    packaged prompt file,
//! 3. the custom mode record, else the built-in record.
//!
//! Each field is settled by the first source that provides it
//! ([`ModeInfo::merge_missing`]); resolution stops once all three are set.
//! An unreadable file only removes itself from the chain.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::source::builtin_prompt_file_path;
use crate::error::PromptError;
use crate::host::{ExtensionContext, is_text_document};
use crate::modes::ModeConfig;

/// Role definition, description and "when to use" for one mode. Any field
/// may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,
}

impl ModeInfo {
    pub fn is_complete(&self) -> bool {
        self.role_definition.is_some() && self.description.is_some() && self.when_to_use.is_some()
    }

    /// Fill unset fields from `other`. Set fields are never replaced and
    /// blank values never fill anything.
    pub fn merge_missing(&mut self, other: ModeInfo) {
        fill(&mut self.role_definition, other.role_definition);
        fill(&mut self.description, other.description);
        fill(&mut self.when_to_use, other.when_to_use);
    }

    /// Reduce partial records, earliest first, with first-found-wins.
    pub fn first_found(sources: impl IntoIterator<Item = ModeInfo>) -> ModeInfo {
        let mut info = ModeInfo::default();
        for source in sources {
            if info.is_complete() {
                break;
            }
            info.merge_missing(source);
        }
        info
    }

    fn from_mode(mode: &ModeConfig) -> ModeInfo {
        ModeInfo {
            role_definition: Some(mode.role_definition.clone()),
            description: mode.description.clone(),
            when_to_use: mode.when_to_use.clone(),
        }
    }
}

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value.filter(|v| !v.trim().is_empty());
    }
}

/// Inputs to [`load_mode_info`] besides the slug.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeInfoOptions<'a> {
    /// Project directory. Without it the project and global rules tiers are
    /// skipped.
    pub cwd: Option<&'a Path>,
    pub custom_modes: Option<&'a [ModeConfig]>,
    pub builtin_mode: Option<&'a ModeConfig>,
}

/// Resolve [`ModeInfo`] for `mode_slug`. Never fails.
///
/// An unreadable document or directory is logged and skipped on its own;
/// the remaining sources, including the mode records, still contribute.
pub async fn load_mode_info(
    ctx: &ExtensionContext,
    mode_slug: &str,
    options: ModeInfoOptions<'_>,
) -> ModeInfo {
    resolve(ctx, mode_slug, options, OnError::Skip)
        .await
        .unwrap_or_default()
}

/// Fallible form of [`load_mode_info`]: the first I/O failure other than
/// "not found" is returned.
pub async fn try_load_mode_info(
    ctx: &ExtensionContext,
    mode_slug: &str,
    options: ModeInfoOptions<'_>,
) -> Result<ModeInfo, PromptError> {
    resolve(ctx, mode_slug, options, OnError::Propagate).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnError {
    Propagate,
    Skip,
}

impl OnError {
    fn settle<T: Default>(self, result: Result<T, PromptError>) -> Result<T, PromptError> {
        match result {
            Err(e) if self == OnError::Skip => {
                warn!("Skipping unreadable mode info source: {e}");
                Ok(T::default())
            }
            other => other,
        }
    }
}

async fn resolve(
    ctx: &ExtensionContext,
    mode_slug: &str,
    options: ModeInfoOptions<'_>,
    on_error: OnError,
) -> Result<ModeInfo, PromptError> {
    let mut info = ModeInfo::default();
    let rules_dir_name = format!("rules-{mode_slug}");

    // 1. Project then global rules directories.
    if let Some(cwd) = options.cwd {
        for config_dir in ctx.config_dirs_for(cwd) {
            if info.is_complete() {
                break;
            }
            let documents = rule_documents(ctx, &config_dir.join(&rules_dir_name), on_error).await?;
            info.merge_missing(ModeInfo::first_found(
                documents
                    .iter()
                    .map(|(_, content)| ctx.extractor().extract(content)),
            ));
        }
    }

    // 2. Packaged rules, then the packaged prompt file.
    if !info.is_complete() {
        let builtin_rules = builtin_rules_text(ctx, mode_slug, on_error).await?;
        if !builtin_rules.is_empty() {
            info.merge_missing(ctx.extractor().extract(&builtin_rules));
        }
    }
    if !info.is_complete()
        && let Some(path) = builtin_prompt_file_path(ctx, mode_slug)
        && let Some(content) = on_error.settle(ctx.read_trimmed(&path).await)?
    {
        info.merge_missing(ctx.extractor().extract(&content));
    }

    // 3. Structured records.
    if !info.is_complete() {
        let record = options
            .custom_modes
            .and_then(|modes| modes.iter().find(|m| m.slug == mode_slug))
            .or(options.builtin_mode);
        if let Some(record) = record {
            info.merge_missing(ModeInfo::from_mode(record));
        }
    }

    debug!(
        "Mode info for '{mode_slug}': role={} description={} when_to_use={}",
        info.role_definition.is_some(),
        info.description.is_some(),
        info.when_to_use.is_some()
    );
    Ok(info)
}

/// Non-blank `.md` / `.txt` documents of `dir` in name order. With
/// [`OnError::Skip`] each unreadable file is dropped individually.
async fn rule_documents(
    ctx: &ExtensionContext,
    dir: &Path,
    on_error: OnError,
) -> Result<Vec<(String, String)>, PromptError> {
    let mut documents = Vec::new();
    for entry in on_error.settle(ctx.list_dir(dir).await)? {
        if !entry.is_file || !is_text_document(&entry.name) {
            continue;
        }
        let path = dir.join(&entry.name);
        if let Some(content) = on_error.settle(ctx.read_trimmed(&path).await)? {
            documents.push((entry.name, content));
        }
    }
    Ok(documents)
}

async fn builtin_rules_text(
    ctx: &ExtensionContext,
    mode_slug: &str,
    on_error: OnError,
) -> Result<String, PromptError> {
    let dir = ctx.assets_dir().join(format!("rules-{mode_slug}"));
    let documents = rule_documents(ctx, &dir, on_error).await?;
    Ok(documents
        .iter()
        .map(|(name, content)| format!("# {name}\n\n{content}"))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// The packaged `rules-<mode>` documents as one text.
///
/// Each document becomes `# <file name>\n\n<content>`; documents are joined
/// with a blank line. Empty when the package ships no rules for the mode.
pub async fn load_builtin_mode_rules(
    ctx: &ExtensionContext,
    mode_slug: &str,
) -> Result<String, PromptError> {
    builtin_rules_text(ctx, mode_slug, OnError::Propagate).await
}

/// Resolved role definition, or empty.
pub async fn role_definition_from_rules(
    ctx: &ExtensionContext,
    mode_slug: &str,
    options: ModeInfoOptions<'_>,
) -> String {
    load_mode_info(ctx, mode_slug, options)
        .await
        .role_definition
        .unwrap_or_default()
}

/// Resolved description, or empty.
pub async fn description_from_rules(
    ctx: &ExtensionContext,
    mode_slug: &str,
    options: ModeInfoOptions<'_>,
) -> String {
    load_mode_info(ctx, mode_slug, options)
        .await
        .description
        .unwrap_or_default()
}

/// Resolved "when to use" guidance, or empty.
pub async fn when_to_use_from_rules(
    ctx: &ExtensionContext,
    mode_slug: &str,
    options: ModeInfoOptions<'_>,
) -> String {
    load_mode_info(ctx, mode_slug, options)
        .await
        .when_to_use
        .unwrap_or_default()
}
