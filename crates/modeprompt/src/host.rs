//! Host seams: filesystem access and the execution context.
//!
//! The engine never touches the filesystem directly. Every read, listing and
//! directory creation goes through [`HostFs`], so a host (editor extension,
//! CLI, test harness) decides where bytes come from. [`LocalFs`] is the
//! tokio-backed implementation used outside of tests.
//!
//! [`ExtensionContext`] bundles the filesystem, the installed package root
//! (where the packaged prompt assets live) and the [`EngineConfig`]. Prompt
//! generation refuses to run without one.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tracing::trace;

use crate::config::EngineConfig;
use crate::error::{PromptError, is_absent};
use crate::prompt::extract::FieldExtractor;

/// Boxed future returned by [`HostFs`] methods.
///
/// Keeps the trait dyn-compatible so contexts can hold `Arc<dyn HostFs>`.
pub type FsFuture<'a, T> = Pin<Box<dyn Future<Output = io::Result<T>> + Send + 'a>>;

/// A directory entry with file/directory discrimination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_file: bool,
    pub is_dir: bool,
}

/// Filesystem capabilities the engine consumes from its host.
///
/// Implementations must report a missing path as
/// [`io::ErrorKind::NotFound`] so it can be told apart from real failures.
pub trait HostFs: Send + Sync {
    /// Read a UTF-8 text file.
    fn read_to_string<'a>(&'a self, path: &'a Path) -> FsFuture<'a, String>;

    /// Create a directory and its parents. Succeeds if it already exists.
    fn create_dir_all<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()>;

    /// List a directory, sorted by entry name.
    fn read_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<DirEntry>>;

    /// Copy a single file, overwriting the destination.
    fn copy_file<'a>(&'a self, from: &'a Path, to: &'a Path) -> FsFuture<'a, ()>;
}

/// [`HostFs`] over the local filesystem via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl HostFs for LocalFs {
    fn read_to_string<'a>(&'a self, path: &'a Path) -> FsFuture<'a, String> {
        Box::pin(tokio::fs::read_to_string(path))
    }

    fn create_dir_all<'a>(&'a self, path: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(tokio::fs::create_dir_all(path))
    }

    fn read_dir<'a>(&'a self, path: &'a Path) -> FsFuture<'a, Vec<DirEntry>> {
        Box::pin(async move {
            let mut reader = tokio::fs::read_dir(path).await?;
            let mut entries = Vec::new();
            while let Some(entry) = reader.next_entry().await? {
                let file_type = entry.file_type().await?;
                entries.push(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_file: file_type.is_file(),
                    is_dir: file_type.is_dir(),
                });
            }
            // OS listing order is unspecified; sort for deterministic output.
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(entries)
        })
    }

    fn copy_file<'a>(&'a self, from: &'a Path, to: &'a Path) -> FsFuture<'a, ()> {
        Box::pin(async move { tokio::fs::copy(from, to).await.map(|_| ()) })
    }
}

/// The execution handle every prompt operation runs against.
pub struct ExtensionContext {
    package_root: PathBuf,
    fs: Arc<dyn HostFs>,
    config: EngineConfig,
    extractor: FieldExtractor,
}

impl fmt::Debug for ExtensionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionContext")
            .field("package_root", &self.package_root)
            .field("config", &self.config)
            .finish()
    }
}

impl ExtensionContext {
    /// Create a context over the local filesystem.
    ///
    /// Fails only if the configured extraction phrases do not compile.
    pub fn new(package_root: impl Into<PathBuf>, config: EngineConfig) -> Result<Self, PromptError> {
        let extractor = FieldExtractor::new(&config.patterns)?;
        Ok(Self {
            package_root: package_root.into(),
            fs: Arc::new(LocalFs),
            config,
            extractor,
        })
    }

    /// Replace the filesystem implementation.
    pub fn with_fs(mut self, fs: Arc<dyn HostFs>) -> Self {
        self.fs = fs;
        self
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    pub fn fs(&self) -> &dyn HostFs {
        self.fs.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    /// Packaged prompt assets directory (`<package>/dist/prompts`).
    pub fn assets_dir(&self) -> PathBuf {
        self.package_root.join(&self.config.assets_dir)
    }

    /// The reserved configuration directory of a project (`<cwd>/.roo`).
    pub fn project_config_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.config.config_dir_name)
    }

    /// Configuration directories in rank order: project, then global.
    pub fn config_dirs_for(&self, cwd: &Path) -> Vec<PathBuf> {
        let mut dirs = vec![self.project_config_dir(cwd)];
        if let Some(global) = &self.config.global_config_dir {
            dirs.push(global.clone());
        }
        dirs
    }

    /// Read a text file, trimmed. `None` when absent or blank.
    pub(crate) async fn read_trimmed(&self, path: &Path) -> Result<Option<String>, PromptError> {
        match self.fs.read_to_string(path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if is_absent(&e) => {
                trace!("{} not present", path.display());
                Ok(None)
            }
            Err(source) => Err(PromptError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// List a directory. An absent directory lists as empty.
    pub(crate) async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>, PromptError> {
        match self.fs.read_dir(path).await {
            Ok(entries) => Ok(entries),
            Err(e) if is_absent(&e) => Ok(Vec::new()),
            Err(source) => Err(PromptError::ListDir {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Non-blank `.md` / `.txt` documents of a directory, in listing order,
    /// as `(file name, trimmed content)` pairs.
    pub(crate) async fn text_documents(
        &self,
        dir: &Path,
    ) -> Result<Vec<(String, String)>, PromptError> {
        let mut documents = Vec::new();
        for entry in self.list_dir(dir).await? {
            if !entry.is_file || !is_text_document(&entry.name) {
                continue;
            }
            if let Some(content) = self.read_trimmed(&dir.join(&entry.name)).await? {
                documents.push((entry.name, content));
            }
        }
        Ok(documents)
    }

    /// Create a directory, treating "already exists" as success.
    pub(crate) async fn ensure_dir(&self, path: &Path) -> Result<(), PromptError> {
        match self.fs.create_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(PromptError::CreateDir {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// `.md` or `.txt`, case-insensitive.
pub(crate) fn is_text_document(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("txt"))
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn context(root: &Path) -> ExtensionContext {
        ExtensionContext::new(root, EngineConfig::default().with_global_config_dir(None)).unwrap()
    }

    #[test]
    fn text_document_extensions() {
        assert!(is_text_document("role.md"));
        assert!(is_text_document("ROLE.TXT"));
        assert!(!is_text_document("role.json"));
        assert!(!is_text_document("README"));
    }

    #[tokio::test]
    async fn local_fs_lists_sorted_with_kinds() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();

        let entries = LocalFs.read_dir(dir.path()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.md", "c"]);
        assert!(entries[0].is_file);
        assert!(entries[2].is_dir);
    }

    #[tokio::test]
    async fn read_trimmed_absent_and_blank_are_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blank.md"), "  \n\t ").unwrap();
        let ctx = context(dir.path());

        assert!(ctx.read_trimmed(&dir.path().join("nope.md")).await.unwrap().is_none());
        assert!(ctx.read_trimmed(&dir.path().join("blank.md")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn read_trimmed_propagates_other_failures() {
        let fs = testing::MemoryFs::new().with_failing("/locked.md");
        let ctx = context(Path::new("/pkg")).with_fs(Arc::new(fs));
        let err = ctx.read_trimmed(Path::new("/locked.md")).await.unwrap_err();
        assert!(matches!(err, PromptError::Read { .. }));
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());
        let target = dir.path().join(".roo");
        ctx.ensure_dir(&target).await.unwrap();
        ctx.ensure_dir(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn text_documents_skips_other_files_and_blank_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1-role.md"), "  You are X.  ").unwrap();
        fs::write(dir.path().join("2-empty.txt"), "   ").unwrap();
        fs::write(dir.path().join("3-data.json"), "{}").unwrap();
        fs::create_dir(dir.path().join("4-nested.md")).unwrap();
        let ctx = context(dir.path());

        let docs = ctx.text_documents(dir.path()).await.unwrap();
        assert_eq!(docs, vec![("1-role.md".to_string(), "You are X.".to_string())]);
    }

    #[test]
    fn config_dirs_rank_project_before_global() {
        let config = EngineConfig::default().with_global_config_dir(Some(PathBuf::from("/home/u/.roo")));
        let ctx = ExtensionContext::new("/pkg", config).unwrap();
        let dirs = ctx.config_dirs_for(Path::new("/proj"));
        assert_eq!(dirs, vec![PathBuf::from("/proj/.roo"), PathBuf::from("/home/u/.roo")]);
    }
}
