//! File system collaborator
//!
//! Generated artifacts are written through the [`Filesystem`] trait so the
//! orchestrator never touches `std::fs` directly. Paths handed to the trait
//! are relative to the project root.

use crate::error::{CrudError, Result};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What happened to one target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// New file created
    Written,
    /// Existing file replaced (forced)
    Overwritten,
    /// Existing file left alone (not forced)
    SkippedExisting,
    /// Content appended to a shared target
    Appended,
    /// Shared target already holds the content; nothing written
    AlreadyPresent,
}

impl FileOutcome {
    /// Whether anything was written to disk
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Written | Self::Overwritten | Self::Appended)
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Written => "created",
            Self::Overwritten => "overwritten",
            Self::SkippedExisting => "exists, skipped",
            Self::Appended => "appended",
            Self::AlreadyPresent => "already registered",
        })
    }
}

/// File operations needed by the generator
pub trait Filesystem {
    /// Whether a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write a whole file unless it exists and `force` is off
    ///
    /// The write is atomic: readers see the old content or the new content.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parent directories cannot be written.
    fn write_if_absent_or_forced(&self, path: &Path, content: &str, force: bool) -> Result<FileOutcome>;

    /// Append `content` unless the file already contains `marker`
    ///
    /// A missing file is created starting with `preamble`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or written.
    fn append_unless_present(
        &self,
        path: &Path,
        marker: &str,
        content: &str,
        preamble: Option<&str>,
    ) -> Result<FileOutcome>;

    /// Create a directory and all parents
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Paths matching a glob pattern
    ///
    /// # Errors
    ///
    /// Returns an error when the pattern is malformed.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// [`Filesystem`] on the local disk, rooted at a project directory
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a filesystem rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    fn write_atomic(full_path: &Path, content: &str) -> Result<()> {
        let parent = full_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| CrudError::io(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| CrudError::io(parent, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| CrudError::io(full_path, e))?;
        temp.persist(full_path)
            .map_err(|e| CrudError::io(full_path, e.error))?;
        Ok(())
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| CrudError::io(full_path, e))
    }

    fn write_if_absent_or_forced(&self, path: &Path, content: &str, force: bool) -> Result<FileOutcome> {
        let full_path = self.resolve(path);
        let existed = full_path.exists();
        if existed && !force {
            tracing::debug!(path = %path.display(), "File exists, skipping");
            return Ok(FileOutcome::SkippedExisting);
        }

        Self::write_atomic(&full_path, content)?;
        tracing::debug!(path = %path.display(), overwritten = existed, "Wrote file");

        Ok(if existed {
            FileOutcome::Overwritten
        } else {
            FileOutcome::Written
        })
    }

    fn append_unless_present(
        &self,
        path: &Path,
        marker: &str,
        content: &str,
        preamble: Option<&str>,
    ) -> Result<FileOutcome> {
        let full_path = self.resolve(path);

        // Re-read right before the check so an earlier append is always seen.
        let current = if full_path.exists() {
            fs::read_to_string(&full_path).map_err(|e| CrudError::io(&full_path, e))?
        } else {
            preamble.unwrap_or_default().to_string()
        };

        if current.contains(marker) {
            tracing::debug!(path = %path.display(), marker, "Already registered");
            return Ok(FileOutcome::AlreadyPresent);
        }

        let mut updated = current;
        updated.push_str(content);
        Self::write_atomic(&full_path, &updated)?;
        tracing::debug!(path = %path.display(), "Appended");

        Ok(FileOutcome::Appended)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);
        fs::create_dir_all(&full_path).map_err(|e| CrudError::io(full_path, e))
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        // The root is literal even when it contains `[`, `?` or `*`
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let full_pattern = Path::new(&root).join(pattern);
        let paths = glob::glob(&full_pattern.to_string_lossy())?
            .filter_map(std::result::Result::ok)
            .map(|path| match path.strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => path.clone(),
            })
            .collect();
        Ok(paths)
    }
}
