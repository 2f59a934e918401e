//! Error types for lettergen-build.

use std::path::PathBuf;

use thiserror::Error;

use lettergen_core::{ConfigError, DataError};
use lettergen_renderer::RenderError;

/// Failure of the copy primitive.
#[derive(Debug, Error)]
#[error("copy {from} to {to}: {source}")]
pub struct CopyError {
    pub from: PathBuf,
    pub to: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failure of one LaTeX engine invocation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The engine could not be started at all (not installed, not executable).
    #[error("failed to run {program} on {tex}: {source}")]
    Spawn {
        program: String,
        tex: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but reported failure. `output` holds the tail of its log.
    #[error("{program} failed on {tex} ({status})\n{output}")]
    Exit {
        program: String,
        tex: PathBuf,
        status: String,
        output: String,
    },

    /// The engine exited successfully but left no PDF behind.
    #[error("{program} produced no pdf at {pdf}")]
    MissingOutput { program: String, pdf: PathBuf },
}

/// All errors that can arise from a build. Each variant names the stage
/// that failed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("create temporary work dir: {source}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },

    #[error("render template into tex file for '{letter}': {source}")]
    Render {
        letter: String,
        #[source]
        source: RenderError,
    },

    #[error("stage assets into {dir}: {source}")]
    AssetStaging {
        dir: PathBuf,
        #[source]
        source: CopyError,
    },

    #[error("compile tex into pdf: {0}")]
    Compile(#[from] CompileError),

    #[error("move pdf files to {dir}: {source}")]
    Relocation {
        dir: PathBuf,
        #[source]
        source: CopyError,
    },

    #[error("load letter data: {0}")]
    Data(#[from] DataError),

    #[error("load config: {0}")]
    Config(#[from] ConfigError),
}
