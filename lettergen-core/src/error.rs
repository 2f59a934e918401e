//! Error types for lettergen-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading letter data files and discovering assets.
#[derive(Debug, Error)]
pub enum DataError {
    /// Underlying I/O failure, annotated with the file that was being read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error, with file path and line context from serde_json.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The recipients file parsed but contained no entries.
    #[error("no recipients in {path}")]
    NoRecipients { path: PathBuf },
}

/// Errors from locating and loading `lettergen.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (scaffold path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The project config file did not exist at the expected path.
    #[error("project config not found at {path}; run `lettergen init` or pass --defaults")]
    NotFound { path: PathBuf },

    /// `dirs::config_dir()` returned `None`.
    #[error("cannot determine user config directory")]
    HomeNotFound,
}

pub(crate) fn data_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DataError {
    DataError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn config_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
