//! Scope guard for every temporary directory a build creates.
//!
//! A [`Scratch`] is armed before the first letter is rendered. It owns the
//! working root and each generated [`TexFile`]; dropping it (normal return,
//! `?` early return, unwinding) removes all of them. Removal problems are
//! logged, never returned.

use lettergen_core::TexFile;
use tempfile::TempDir;

#[derive(Debug, Default)]
pub struct Scratch {
    root: Option<TempDir>,
    tex_files: Vec<TexFile>,
}

impl Scratch {
    /// Guard that will remove `root` on teardown.
    pub fn new(root: TempDir) -> Self {
        Scratch {
            root: Some(root),
            tex_files: Vec::new(),
        }
    }

    /// Take ownership of generated tex files (and their directories).
    pub fn adopt(&mut self, tex_files: Vec<TexFile>) {
        self.tex_files.extend(tex_files);
    }

    pub fn tex_files(&self) -> &[TexFile] {
        &self.tex_files
    }

    /// Remove the working root, then every per-letter directory.
    ///
    /// Idempotent: a second call finds nothing left to remove.
    pub fn teardown(&mut self) {
        if let Some(root) = self.root.take() {
            let path = root.path().to_path_buf();
            tracing::debug!(working_directory = %path.display(), "remove working directory");
            if let Err(e) = root.close() {
                tracing::warn!(working_directory = %path.display(), error = %e, "failed to remove working directory");
            }
        }

        for tex_file in self.tex_files.drain(..) {
            let dir = tex_file.dir().to_path_buf();
            tracing::debug!(working_directory = %dir.display(), "remove working directory");
            if let Err(e) = tex_file.destroy() {
                tracing::warn!(working_directory = %dir.display(), error = %e, "failed to remove working directory");
            }
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        self.teardown();
    }
}
