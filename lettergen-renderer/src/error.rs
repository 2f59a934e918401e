//! Error types for lettergen-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from rendering a letter into a tex file.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error (syntax error, unknown variable, …).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while reading the template or writing the tex file.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    /// `date_format` contains an invalid chrono specifier.
    #[error("invalid date format '{0}'")]
    DateFormat(String),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}
