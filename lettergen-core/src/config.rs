//! Project configuration (`lettergen.yaml`) and user-level defaults.
//!
//! # Layering
//!
//! ```text
//! built-in defaults
//!   ← <config_dir>/lettergen/config.yaml   (compiler, date_format only)
//!     ← <project>/lettergen.yaml
//!       ← CLI flags (applied by the caller)
//! ```
//!
//! # API pattern
//!
//! Every function touching a well-known location has two forms:
//! - `fn_at(dir: &Path, …)`: explicit directory; used in tests with `TempDir`
//! - `fn(…)`: derives the directory from `dirs::config_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{config_io_err, ConfigError};

/// File name of the project config inside a project root.
pub const CONFIG_FILE: &str = "lettergen.yaml";

// ---------------------------------------------------------------------------
// 1. Types
// ---------------------------------------------------------------------------

/// External LaTeX engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub program: String,
    pub args: Vec<String>,
    /// How many times the engine runs per letter (references need two).
    pub runs: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            program: "pdflatex".to_string(),
            args: vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
            runs: 1,
        }
    }
}

/// Locations of the three JSON data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub recipients: PathBuf,
    pub sender: PathBuf,
    pub metadata: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            recipients: PathBuf::from("data/to.json"),
            sender: PathBuf::from("data/from.json"),
            metadata: PathBuf::from("data/metadata.json"),
        }
    }
}

/// Fully layered project configuration.
///
/// Paths returned by [`load_at`] are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub template: PathBuf,
    pub assets: PathBuf,
    pub output: PathBuf,
    pub data: DataPaths,
    pub compiler: CompilerConfig,
    pub date_format: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            template: PathBuf::from("templates/letter.tex"),
            assets: PathBuf::from("assets"),
            output: PathBuf::from("out"),
            data: DataPaths::default(),
            compiler: CompilerConfig::default(),
            date_format: "%d.%m.%Y".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Copy with every relative path joined onto `root`.
    pub fn resolved(mut self, root: &Path) -> Self {
        for path in [
            &mut self.template,
            &mut self.assets,
            &mut self.output,
            &mut self.data.recipients,
            &mut self.data.sender,
            &mut self.data.metadata,
        ] {
            *path = root.join(&*path);
        }
        self
    }
}

/// User-level defaults. Only engine settings are honoured here; data and
/// template paths are always project-relative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserDefaults {
    #[serde(default)]
    pub compiler: Option<CompilerConfig>,
    #[serde(default)]
    pub date_format: Option<String>,
}

/// On-disk shape of `lettergen.yaml`; absent keys fall through to lower layers.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    template: Option<PathBuf>,
    assets: Option<PathBuf>,
    output: Option<PathBuf>,
    data: Option<DataPaths>,
    compiler: Option<CompilerConfig>,
    date_format: Option<String>,
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<root>/lettergen.yaml`: pure, no I/O.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<config_dir>/lettergen/config.yaml`: pure, no I/O.
pub fn user_config_path_at(config_dir: &Path) -> PathBuf {
    config_dir.join("lettergen").join("config.yaml")
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

fn read_yaml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| config_io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load user defaults below `config_dir`. A missing file yields empty defaults.
pub fn load_user_defaults_at(config_dir: &Path) -> Result<UserDefaults, ConfigError> {
    let path = user_config_path_at(config_dir);
    if !path.exists() {
        return Ok(UserDefaults::default());
    }
    tracing::debug!(path = %path.display(), "loading user defaults");
    read_yaml(&path)
}

/// `load_user_defaults_at` convenience wrapper.
pub fn load_user_defaults() -> Result<UserDefaults, ConfigError> {
    load_user_defaults_at(&config_dir()?)
}

/// Load and layer the config for the project rooted at `root`.
///
/// Returns `ConfigError::NotFound` when `lettergen.yaml` is absent, unless
/// `allow_missing` is set, in which case defaults are used.
pub fn load_at(
    root: &Path,
    user: &UserDefaults,
    allow_missing: bool,
) -> Result<ProjectConfig, ConfigError> {
    let path = config_path(root);
    let file: ConfigFile = if path.exists() {
        tracing::debug!(path = %path.display(), "loading project config");
        read_yaml(&path)?
    } else if allow_missing {
        ConfigFile::default()
    } else {
        return Err(ConfigError::NotFound { path });
    };

    let mut config = ProjectConfig::default();
    if let Some(compiler) = &user.compiler {
        config.compiler = compiler.clone();
    }
    if let Some(format) = &user.date_format {
        config.date_format = format.clone();
    }

    let ConfigFile {
        template,
        assets,
        output,
        data,
        compiler,
        date_format,
    } = file;
    if let Some(v) = template {
        config.template = v;
    }
    if let Some(v) = assets {
        config.assets = v;
    }
    if let Some(v) = output {
        config.output = v;
    }
    if let Some(v) = data {
        config.data = v;
    }
    if let Some(v) = compiler {
        config.compiler = v;
    }
    if let Some(v) = date_format {
        config.date_format = v;
    }

    Ok(config.resolved(root))
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `config` to `<root>/lettergen.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `rename`.
pub fn save_at(root: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
    std::fs::create_dir_all(root).map_err(|e| config_io_err(root, e))?;
    let path = config_path(root);
    let tmp_path = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| config_io_err(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(config_io_err(&path, e));
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
