//! lettergen core library: letter data, build artifacts, configuration.
//!
//! - [`types`]: letters and the JSON data they are built from
//! - [`artifact`]: templates, assets, generated sources, compiled PDFs
//! - [`data`]: data file readers and asset discovery
//! - [`config`]: `lettergen.yaml` loading and layering
//! - [`error`]: [`DataError`], [`ConfigError`]

pub mod artifact;
pub mod config;
pub mod data;
pub mod error;
pub mod types;

pub use artifact::{Asset, MovableFile, PdfFile, Template, TexFile};
pub use config::{CompilerConfig, DataPaths, ProjectConfig, UserDefaults};
pub use error::{ConfigError, DataError};
pub use types::{letters_for, FileStem, Letter, Metadata, Recipient, Sender};
