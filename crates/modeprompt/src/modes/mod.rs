//! Mode records, the catalog, and per-mode user overrides.
//!
//! A mode is a named operating profile: a role definition, optional
//! description and "when to use" guidance, base instructions, and the tool
//! groups it may use. Built-in modes are a fixed process-wide list
//! ([`builtin_modes`]); custom modes arrive with each request inside a
//! [`ModeCatalog`], which is passed explicitly to every resolution call.

pub mod builtin;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use builtin::{BuiltinMode, DEFAULT_MODE_SLUG, builtin_modes};

/// Capability groups a mode can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolGroup {
    Read,
    Edit,
    Browser,
    Command,
    Mcp,
    Modes,
}

impl ToolGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Edit => "edit",
            Self::Browser => "browser",
            Self::Command => "command",
            Self::Mcp => "mcp",
            Self::Modes => "modes",
        }
    }
}

/// Restrictions attached to a group grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOptions {
    /// Only files whose path matches this regex may be edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A group grant: `"read"` or `["edit", { "fileRegex": "\\.md$" }]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupEntry {
    Plain(ToolGroup),
    WithOptions(ToolGroup, GroupOptions),
}

impl GroupEntry {
    pub fn group(&self) -> ToolGroup {
        match self {
            Self::Plain(group) | Self::WithOptions(group, _) => *group,
        }
    }

    pub fn options(&self) -> Option<&GroupOptions> {
        match self {
            Self::Plain(_) => None,
            Self::WithOptions(_, options) => Some(options),
        }
    }
}

/// Where a mode record comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeOrigin {
    BuiltIn,
    #[default]
    Custom,
}

/// A structured mode record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    pub slug: String,
    pub name: String,
    pub role_definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base instructions appended to the prompt for this mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    #[serde(default)]
    pub origin: ModeOrigin,
}

impl ModeConfig {
    pub fn has_group(&self, group: ToolGroup) -> bool {
        self.groups.iter().any(|g| g.group() == group)
    }

    pub fn group_options(&self, group: ToolGroup) -> Option<&GroupOptions> {
        self.groups
            .iter()
            .find(|g| g.group() == group)
            .and_then(GroupEntry::options)
    }
}

/// Per-mode user override of selected mode fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when_to_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
}

impl PromptComponent {
    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        [
            &self.role_definition,
            &self.when_to_use,
            &self.description,
            &self.custom_instructions,
        ]
        .into_iter()
        .all(|f| non_blank(f.as_deref()).is_none())
    }
}

/// Prompt components keyed by mode slug.
pub type CustomModePrompts = HashMap<String, PromptComponent>;

/// The component for `mode`, treating an all-empty component as absent.
pub fn prompt_component<'a>(
    prompts: Option<&'a CustomModePrompts>,
    mode: &str,
) -> Option<&'a PromptComponent> {
    prompts?.get(mode).filter(|c| !c.is_empty())
}

/// Built-in modes plus the caller's custom modes.
///
/// Custom modes shadow built-ins with the same slug.
#[derive(Debug, Clone, Default)]
pub struct ModeCatalog {
    custom: Vec<ModeConfig>,
}

/// On-disk shape of a custom modes file: `{ "customModes": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomModesFile {
    #[serde(default)]
    custom_modes: Vec<ModeConfig>,
}

impl ModeCatalog {
    /// Catalog with no custom modes.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_custom_modes(custom: Vec<ModeConfig>) -> Self {
        let custom = custom
            .into_iter()
            .map(|mut m| {
                m.origin = ModeOrigin::Custom;
                m
            })
            .collect();
        Self { custom }
    }

    /// Parse a `{ "customModes": [...] }` document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: CustomModesFile = serde_json::from_str(json)?;
        Ok(Self::with_custom_modes(file.custom_modes))
    }

    pub fn custom_modes(&self) -> &[ModeConfig] {
        &self.custom
    }

    pub fn custom_mode(&self, slug: &str) -> Option<&ModeConfig> {
        self.custom.iter().find(|m| m.slug == slug)
    }

    pub fn builtin_mode(&self, slug: &str) -> Option<&'static ModeConfig> {
        builtin_modes().iter().find(|m| m.slug == slug)
    }

    /// Custom record for `slug`, else the built-in one.
    pub fn mode(&self, slug: &str) -> Option<&ModeConfig> {
        self.custom_mode(slug).or_else(|| self.builtin_mode(slug))
    }

    /// Like [`mode`](Self::mode), falling back to the default built-in mode.
    pub fn current_mode(&self, slug: &str) -> &ModeConfig {
        self.mode(slug).unwrap_or(&builtin_modes()[0])
    }

    /// Every mode once: custom modes first, then built-ins not shadowed.
    pub fn all_modes(&self) -> Vec<&ModeConfig> {
        let mut modes: Vec<&ModeConfig> = self.custom.iter().collect();
        for builtin in builtin_modes() {
            if self.custom_mode(&builtin.slug).is_none() {
                modes.push(builtin);
            }
        }
        modes
    }

    /// Role definition that opens the prompt for `slug`.
    ///
    /// A custom mode record wins outright. Otherwise a non-blank role from
    /// the prompt component overrides the built-in record, and an unknown
    /// slug uses the default built-in mode.
    pub fn role_definition(&self, slug: &str, component: Option<&PromptComponent>) -> String {
        if let Some(custom) = self.custom_mode(slug) {
            return custom.role_definition.clone();
        }
        let builtin = self.builtin_mode(slug).unwrap_or(&builtin_modes()[0]);
        pick(
            component.and_then(|c| c.role_definition.as_deref()),
            Some(builtin.role_definition.as_str()),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// First non-blank of `over` and `base`, else empty.
fn pick(over: Option<&str>, base: Option<&str>) -> String {
    non_blank(over)
        .or_else(|| non_blank(base))
        .unwrap_or_default()
        .to_string()
}
