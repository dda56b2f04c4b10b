//! Ordered prompt assembly.
//!
//! [`SystemPromptBuilder`] joins blocks with blank lines. Fixed
//! [`slot`](SystemPromptBuilder::slot)s keep their position even when empty,
//! so the layout of a generated prompt does not shift with its inputs;
//! [`raw_opt`](SystemPromptBuilder::raw_opt) blocks vanish when absent or
//! empty. Titled sections are rendered with [`section`].

/// Separator line that opens every titled section.
pub const SECTION_RULE: &str = "====";

/// Builder for a blank-line separated prompt.
///
/// # Example
///
/// ```
/// use modeprompt::prompt::SystemPromptBuilder;
/// use modeprompt::prompt::builder::section;
///
/// let prompt = SystemPromptBuilder::new("You are Roo.")
///     .slot(section("RULES", "- Be brief."))
///     .raw_opt(None::<String>)
///     .slot("")
///     .build();
///
/// assert_eq!(prompt, "You are Roo.\n\n====\n\nRULES\n\n- Be brief.\n\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SystemPromptBuilder {
    blocks: Vec<String>,
}

impl SystemPromptBuilder {
    /// Start with a preamble block. The preamble is a slot: it is kept even
    /// when empty.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            blocks: vec![preamble.into()],
        }
    }

    /// Append optional text. Skipped if absent or empty.
    pub fn raw_opt(mut self, content: Option<impl Into<String>>) -> Self {
        let content: String = content.map(Into::into).unwrap_or_default();
        if !content.is_empty() {
            self.blocks.push(content);
        }
        self
    }

    /// Append a fixed block, kept even when empty.
    pub fn slot(mut self, content: impl Into<String>) -> Self {
        self.blocks.push(content.into());
        self
    }

    /// Join every block with a blank line.
    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}

/// Render one titled section: `====\n\nTITLE\n\ncontent`.
pub fn section(title: &str, content: &str) -> String {
    format!("{SECTION_RULE}\n\n{title}\n\n{content}")
}
