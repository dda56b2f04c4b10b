//! Error type shared by every resolution and assembly step.
//!
//! Only conditions the caller has to act on are errors. A missing override
//! file, an absent rules directory, or a document that does not match an
//! extraction pattern all resolve to "nothing found" and never reach this
//! type.

use std::io;
use std::path::PathBuf;

/// Failures surfaced by the prompt engine.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The host did not supply an [`ExtensionContext`](crate::host::ExtensionContext).
    #[error("extension context is required for generating system prompt")]
    MissingContext,

    /// A file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory exists but could not be listed.
    #[error("failed to list {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory creation failed for a reason other than "already exists".
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying a packaged asset into the project failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The package ships no prompt assets to export.
    #[error("no packaged prompts found under {}", path.display())]
    NoPackagedPrompts { path: PathBuf },

    /// The package ships no `rules-*` directories to export.
    #[error("no built-in rules directories found under {}", path.display())]
    NoBuiltinRules { path: PathBuf },

    /// An extraction phrase produced an invalid pattern.
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Whether an I/O error means "the thing is not there".
///
/// A directory sitting where a file was expected counts as absent too.
pub(crate) fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::IsADirectory | io::ErrorKind::NotADirectory
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_absent() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(is_absent(&err));
    }

    #[test]
    fn permission_denied_is_not_absent() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(!is_absent(&err));
    }

    #[test]
    fn read_error_mentions_path() {
        let err = PromptError::Read {
            path: PathBuf::from("/proj/.roo/system-prompt-code"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/proj/.roo/system-prompt-code"));
        assert!(msg.contains("denied"));
    }
}
