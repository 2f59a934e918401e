//! # lettergen-build
//!
//! Build orchestration: render every letter into its own tex file, stage
//! assets next to it, compile it, and collect the PDFs.
//!
//! Call [`pipeline::run`] with a loaded [`lettergen_core::ProjectConfig`], or
//! assemble a [`Project`] directly and call [`Project::build`].

pub mod compiler;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod relocate;
pub mod render;
pub mod scratch;

pub use compiler::{compile_tex_files, LatexCompiler, PdfCompiler};
pub use error::{BuildError, CompileError, CopyError};
pub use project::{BuildSummary, Project};
pub use relocate::{copy_file, move_files_to_dir};
pub use render::{generate_tex_files, render_template, GenerationFailure, TexRenderer};
pub use scratch::Scratch;
