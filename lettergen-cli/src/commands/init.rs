//! `lettergen init [DIR] [--force]`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use lettergen_core::{config, ProjectConfig};

/// Starter files written relative to the project root.
const STARTER_FILES: &[(&str, &str)] = &[
    ("templates/letter.tex", include_str!("../scaffold/letter.tex")),
    ("data/to.json", include_str!("../scaffold/to.json")),
    ("data/from.json", include_str!("../scaffold/from.json")),
    ("data/metadata.json", include_str!("../scaffold/metadata.json")),
];

/// Scaffold a new letter project.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project root; created if missing.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite files that already exist.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Created,
    Overwritten,
    Kept,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let root = &self.dir;
        fs::create_dir_all(root)
            .with_context(|| format!("cannot create project directory '{}'", root.display()))?;

        let mut report = Vec::new();

        let config_path = config::config_path(root);
        let outcome = self.outcome_for(&config_path);
        if outcome != Outcome::Kept {
            config::save_at(root, &ProjectConfig::default())
                .with_context(|| format!("failed to write '{}'", config_path.display()))?;
        }
        report.push((config_path, outcome));

        for (rel, contents) in STARTER_FILES {
            let path = root.join(rel);
            let outcome = self.outcome_for(&path);
            if outcome != Outcome::Kept {
                write_starter(&path, contents)?;
            }
            report.push((path, outcome));
        }

        let assets = root.join(&ProjectConfig::default().assets);
        fs::create_dir_all(&assets)
            .with_context(|| format!("cannot create '{}'", assets.display()))?;

        for (path, outcome) in &report {
            match outcome {
                Outcome::Created => println!("  {}  {}", "+".green(), path.display()),
                Outcome::Overwritten => println!("  {}  {}", "~".yellow(), path.display()),
                Outcome::Kept => println!("  {}  {} (kept)", "·".dimmed(), path.display()),
            }
        }
        println!(
            "{} Project ready in '{}'. Edit data/*.json, then run `lettergen build`.",
            "✓".green(),
            root.display()
        );
        Ok(())
    }

    fn outcome_for(&self, path: &Path) -> Outcome {
        match (path.exists(), self.force) {
            (false, _) => Outcome::Created,
            (true, true) => Outcome::Overwritten,
            (true, false) => Outcome::Kept,
        }
    }
}

fn write_starter(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create '{}'", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote starter file");
    Ok(())
}
