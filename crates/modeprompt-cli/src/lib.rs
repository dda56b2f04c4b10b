//! Command-line host for the `modeprompt` engine.
//!
//! Plays the role an editor extension plays in production: it supplies the
//! package root, the local filesystem, custom modes and MCP snapshots, and
//! prints what the engine produces.
//!
//! ```sh
//! # Full system prompt for the architect mode
//! modeprompt --package-root /opt/roo prompt architect --diff
//!
//! # What the debug mode is for
//! modeprompt --package-root /opt/roo info debug
//!
//! # Copy packaged rules into ./.roo for editing
//! modeprompt --package-root /opt/roo export-rules
//!
//! # Copy every packaged prompt into ./prompts
//! modeprompt --package-root /opt/roo export-instructions
//! ```

pub mod config;

pub use config::{CliConfig, CliError, PromptOptions, locale_from_lang};
