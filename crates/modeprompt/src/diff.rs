//! Diff-based editing strategies.
//!
//! When diff editing is enabled the prompt offers an `apply_diff` tool whose
//! description comes from the host's [`DiffStrategy`].

use std::path::Path;

pub trait DiffStrategy: Send + Sync {
    /// Short identifier, for logs.
    fn name(&self) -> &str;

    /// Description of the `apply_diff` tool, in the same shape as the other
    /// tool descriptions.
    fn tool_description(&self, cwd: &Path) -> String;
}

/// Search/replace blocks, several per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiSearchReplaceDiffStrategy;

impl DiffStrategy for MultiSearchReplaceDiffStrategy {
    fn name(&self) -> &str {
        "multi-search-replace"
    }

    fn tool_description(&self, cwd: &Path) -> String {
        format!(
            "\
## apply_diff
Description: Replace existing content in a file using one or more search/replace blocks. \
The SEARCH section must match the current file content exactly, including whitespace. \
Use read_file first if you are unsure of the current content.
Parameters:
- path: (required) The path of the file to modify (relative to the current workspace directory {cwd})
- diff: (required) One or more search/replace blocks
Diff format:
```
<<<<<<< SEARCH
:start_line: (required) The line number where the search block starts
-------
[exact content to find]
=======
[new content to replace with]
>>>>>>> REPLACE
```
Usage:
<apply_diff>
<path>File path here</path>
<diff>
Your search/replace content here
</diff>
</apply_diff>",
            cwd = cwd.display()
        )
    }
}
