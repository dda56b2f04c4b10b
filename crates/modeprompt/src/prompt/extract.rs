//! Heuristic extraction of mode fields from free-form documents.
//!
//! A rules document is plain Markdown or text. Three fields are pulled out
//! of it with anchored, case-insensitive patterns:
//!
//! - **role definition**: a paragraph starting with a lead-in such as
//!   `You are`. The whole paragraph (lead-in included) is the value.
//! - **description**: a paragraph starting with a label such as
//!   `Description:`. The text after the colon is the value.
//! - **when to use**: same shape, different labels.
//!
//! A paragraph runs to the next blank line or the end of the text. Phrases
//! are data ([`ExtractionPatterns`]); the defaults cover English and Russian
//! and are not meant to be exhaustive.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::mode_info::ModeInfo;
use crate::error::PromptError;

/// Phrase tables recognised by [`FieldExtractor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionPatterns {
    /// Phrases that open a role definition paragraph.
    pub role_lead_ins: Vec<String>,
    /// Labels (without the colon) that open a description paragraph.
    pub description_labels: Vec<String>,
    /// Labels (without the colon) that open a "when to use" paragraph.
    pub when_to_use_labels: Vec<String>,
}

impl Default for ExtractionPatterns {
    fn default() -> Self {
        Self {
            role_lead_ins: strings(&["You are", "Roo как", "Ты являешься"]),
            description_labels: strings(&["Description", "Описание", "Short description"]),
            when_to_use_labels: strings(&["When to use", "Когда использовать", "Use this mode"]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Compiled form of [`ExtractionPatterns`].
///
/// A field with no configured phrases is never extracted.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    role: Option<Regex>,
    description: Option<Regex>,
    when_to_use: Option<Regex>,
}

/// Paragraph terminator: a blank line or the end of the text.
const PARAGRAPH_END: &str = r"(?:\n[ \t]*\r?\n|\z)";

impl FieldExtractor {
    pub fn new(patterns: &ExtractionPatterns) -> Result<Self, PromptError> {
        let role = alternation(&patterns.role_lead_ins)
            .map(|alts| {
                Regex::new(&format!(
                    r"(?is)(?:\A|\n)[ \t]*((?:{alts})[ \t]+.*?){PARAGRAPH_END}"
                ))
            })
            .transpose()?;
        let description = labelled(&patterns.description_labels)?;
        let when_to_use = labelled(&patterns.when_to_use_labels)?;
        Ok(Self {
            role,
            description,
            when_to_use,
        })
    }

    /// Extract whatever fields the document yields.
    pub fn extract(&self, content: &str) -> ModeInfo {
        ModeInfo {
            role_definition: capture(self.role.as_ref(), content),
            description: capture(self.description.as_ref(), content),
            when_to_use: capture(self.when_to_use.as_ref(), content),
        }
    }
}

fn labelled(labels: &[String]) -> Result<Option<Regex>, PromptError> {
    let Some(alts) = alternation(labels) else {
        return Ok(None);
    };
    let re = Regex::new(&format!(
        r"(?is)(?:\A|\n)[ \t]*(?:{alts})[ \t]*:[ \t]*(.*?){PARAGRAPH_END}"
    ))?;
    Ok(Some(re))
}

/// `a|b|c` of the escaped, non-blank phrases.
fn alternation(phrases: &[String]) -> Option<String> {
    let escaped: Vec<String> = phrases
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

fn capture(re: Option<&Regex>, content: &str) -> Option<String> {
    let caps = re?.captures(content)?;
    let value = caps.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
