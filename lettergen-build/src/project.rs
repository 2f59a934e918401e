//! Build orchestration.
//!
//! ## `Project::build`: stage order
//!
//! 1. Take (or lazily create) the working root and arm the [`Scratch`] guard.
//! 2. Render every letter into its own tex file.
//! 3. Stage all assets into each tex file's directory.
//! 4. Compile every tex file; any failure discards all PDFs.
//! 5. Copy the PDFs into the output directory.
//! 6. Tear down the working root and every per-letter directory.
//!
//! Step 6 runs on every exit path.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;

use lettergen_core::{Asset, Letter, MovableFile, Template};
use lettergen_renderer::TemplateEngine;

use crate::compiler::{compile_tex_files, LatexCompiler, PdfCompiler};
use crate::error::BuildError;
use crate::relocate::move_files_to_dir;
use crate::render::{generate_tex_files, TexRenderer};
use crate::scratch::Scratch;

/// Prefix for the per-build working root.
pub const WORK_DIR_PREFIX: &str = "lg";

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Number of tex files generated (one per letter).
    pub tex_files: usize,
    /// Final PDF paths inside the output directory, in letter order.
    pub outputs: Vec<PathBuf>,
}

/// Letters, template and assets that build into one output directory.
pub struct Project {
    letters: Vec<Letter>,
    template: Template,
    assets: Vec<Asset>,
    out_dir: PathBuf,
    work_dir: Option<TempDir>,
    renderer: Box<dyn TexRenderer>,
    compiler: Box<dyn PdfCompiler>,
}

impl Project {
    /// New project using the tera [`TemplateEngine`] and the default
    /// [`LatexCompiler`].
    pub fn new(
        letters: Vec<Letter>,
        template: Template,
        assets: Vec<Asset>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Project {
            letters,
            template,
            assets,
            out_dir: out_dir.into(),
            work_dir: None,
            renderer: Box::new(TemplateEngine::default()),
            compiler: Box::new(LatexCompiler::default()),
        }
    }

    pub fn with_renderer(mut self, renderer: impl TexRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_compiler(mut self, compiler: impl PdfCompiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Working root, if one currently exists.
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_ref().map(|d| d.path())
    }

    /// Create the working root unless it already exists.
    pub fn setup_work_dir(&mut self) -> Result<&Path, BuildError> {
        let dir = match self.work_dir.take() {
            Some(dir) => dir,
            None => {
                let dir = tempfile::Builder::new()
                    .prefix(WORK_DIR_PREFIX)
                    .tempdir()
                    .map_err(|source| BuildError::WorkingDirectory { source })?;
                tracing::debug!(working_directory = %dir.path().display(), "created working directory");
                dir
            }
        };
        Ok(self.work_dir.insert(dir).path())
    }

    /// Run every stage. See the module docs for ordering and cleanup.
    pub fn build(&mut self) -> Result<BuildSummary, BuildError> {
        self.setup_work_dir()?;
        let mut scratch = match self.work_dir.take() {
            Some(root) => Scratch::new(root),
            None => Scratch::default(),
        };

        match generate_tex_files(self.renderer.as_mut(), &self.template, &self.letters) {
            Ok(tex_files) => scratch.adopt(tex_files),
            Err(failure) => {
                scratch.adopt(failure.tex_files);
                return Err(failure.error);
            }
        }
        let tex_count = scratch.tex_files().len();

        let assets: Vec<&dyn MovableFile> = self.assets.iter().map(|a| a as &dyn MovableFile).collect();
        for tex_file in scratch.tex_files() {
            move_files_to_dir(&assets, tex_file.dir()).map_err(|source| BuildError::AssetStaging {
                dir: tex_file.dir().to_path_buf(),
                source,
            })?;
        }

        let pdf_files = compile_tex_files(self.compiler.as_mut(), scratch.tex_files())?;

        let movable: Vec<&dyn MovableFile> = pdf_files.iter().map(|p| p as &dyn MovableFile).collect();
        let relocated = move_files_to_dir(&movable, &self.out_dir);
        scratch.teardown();
        let outputs = relocated.map_err(|source| BuildError::Relocation {
            dir: self.out_dir.clone(),
            source,
        })?;

        let files: Vec<String> = outputs.iter().map(|p| p.display().to_string()).collect();
        tracing::info!(letters = outputs.len(), files = %files.join(","), "generated letters");

        Ok(BuildSummary {
            tex_files: tex_count,
            outputs,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
