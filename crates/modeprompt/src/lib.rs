//! Mode-aware system prompt engine.
//!
//! `modeprompt` builds the system prompt that drives an AI assistant in a
//! given operating mode ("architect", "reviewer", "business analyst", ...).
//! For a mode it resolves the role definition, description, "when to use"
//! guidance and base instructions from ranked sources (project files, the
//! user's global files, packaged assets, structured mode records),
//! substitutes runtime variables, and assembles the final document from
//! sections that switch on and off with the host's capabilities.
//!
//! # Getting started
//!
//! ```no_run
//! use modeprompt::prelude::*;
//!
//! # async fn run() -> Result<(), PromptError> {
//! let ctx = ExtensionContext::new("/opt/roo", EngineConfig::default())?;
//! let request = SystemPromptRequest::new("/work/project", "architect")
//!     .with_locale("en-us")
//!     .with_diff_enabled(true);
//!
//! let prompt = system_prompt(Some(&ctx), &request).await?;
//! println!("{prompt}");
//!
//! let info = load_mode_info(&ctx, "architect", ModeInfoOptions::default()).await;
//! println!("{:?}", info.when_to_use);
//! # Ok(())
//! # }
//! ```
//!
//! # Where things come from
//!
//! | Source | Location | Rank |
//! |--------|----------|------|
//! | Project override | `<cwd>/.roo/system-prompt-<mode>` | replaces generated body |
//! | Project rules | `<cwd>/.roo/rules-<mode>/*.md\|*.txt` | 1 |
//! | Global rules | `~/.roo/rules-<mode>/` | 2 |
//! | Packaged rules | `<package>/dist/prompts/rules-<mode>/`, then the mode's packaged prompt | 3 |
//! | Mode record | custom mode, else built-in | 4 |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`prompt`] | Interpolation, override resolution, field extraction, mode info, sections, assembly, rules export |
//! | [`modes`] | Built-in catalog, custom modes, prompt components, mode selection |
//! | [`host`] | [`HostFs`](host::HostFs) seam, [`LocalFs`](host::LocalFs), [`ExtensionContext`](host::ExtensionContext) |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) |
//! | [`mcp`] | [`McpHub`](mcp::McpHub) snapshots |
//! | [`diff`] | [`DiffStrategy`](diff::DiffStrategy) |
//! | [`error`] | [`PromptError`](error::PromptError) |

pub mod config;
pub mod diff;
pub mod error;
pub mod host;
pub mod mcp;
pub mod modes;
pub mod prelude;
pub mod prompt;

pub use error::PromptError;
