//! Engine configuration.
//!
//! [`EngineConfig`] holds the filesystem conventions the engine resolves
//! against and the phrase tables the extractor recognises. Everything has a
//! sensible default; override individual settings with the builder methods.
//!
//! ```
//! use modeprompt::config::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_config_dir_name(".roo")
//!     .with_global_config_dir(None);
//! assert_eq!(config.config_dir_name, ".roo");
//! assert!(config.global_config_dir.is_none());
//! ```

use std::path::PathBuf;

use crate::prompt::extract::ExtractionPatterns;

/// Name of the reserved per-project configuration directory.
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".roo";

/// Packaged assets directory, relative to the package root.
pub const DEFAULT_ASSETS_DIR: &str = "dist/prompts";

/// Filesystem conventions and extraction phrases used by every resolution.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Per-project configuration directory name. Default: `.roo`.
    pub config_dir_name: String,
    /// Packaged prompt assets, relative to the package root.
    /// Default: `dist/prompts`.
    pub assets_dir: PathBuf,
    /// User-global configuration directory, ranked after the project one.
    /// Default: `~/.roo`. `None` disables the global tier.
    pub global_config_dir: Option<PathBuf>,
    /// Lead-in and label phrases recognised by the extractor.
    pub patterns: ExtractionPatterns,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_dir_name: DEFAULT_CONFIG_DIR_NAME.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            global_config_dir: dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_DIR_NAME)),
            patterns: ExtractionPatterns::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_config_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config_dir_name = name.into();
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Set (or with `None`, disable) the user-global configuration directory.
    pub fn with_global_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_config_dir = dir;
        self
    }

    pub fn with_patterns(mut self, patterns: ExtractionPatterns) -> Self {
        self.patterns = patterns;
        self
    }
}
