//! Files that travel through a build: templates, assets, generated sources
//! and compiled outputs.
//!
//! [`TexFile`] owns the temporary directory it lives in. Everything else is a
//! plain path. Anything the relocator may copy implements [`MovableFile`].

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Prefix for per-letter working directories.
pub const LETTER_DIR_PREFIX: &str = "lg-letter";

/// An artifact that can be copied to another directory by base name.
pub trait MovableFile {
    /// Current absolute path of the artifact.
    fn path(&self) -> &Path;
}

/// Shared rendering template, addressed by name and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub path: PathBuf,
}

impl Template {
    /// Template named after the file name of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "letter".to_string());
        Template { name, path }
    }
}

/// Supporting file (letterhead, logo, class file) copied next to every
/// generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: PathBuf,
}

impl Asset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Asset { path: path.into() }
    }
}

impl MovableFile for Asset {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Generated LaTeX source plus the temporary directory that owns it.
///
/// Dropping a `TexFile` removes its directory; [`TexFile::destroy`] does the
/// same but reports the outcome.
#[derive(Debug)]
pub struct TexFile {
    path: PathBuf,
    dir: TempDir,
}

impl TexFile {
    /// Create a fresh temporary directory and write `contents` to
    /// `<dir>/<file_name>`.
    pub fn create(file_name: &str, contents: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(LETTER_DIR_PREFIX).tempdir()?;
        let path = dir.path().join(file_name);
        std::fs::write(&path, contents)?;
        Ok(TexFile { path, dir })
    }

    /// Directory owning this file (and, after staging, its assets and PDF).
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Base name without extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Remove the owning directory and everything in it.
    pub fn destroy(self) -> io::Result<()> {
        self.dir.close()
    }
}

impl MovableFile for TexFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Compiled PDF, living in its [`TexFile`]'s directory until relocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub path: PathBuf,
}

impl MovableFile for PdfFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
