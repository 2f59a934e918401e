//! `lettergen build`: load config and data, then render, compile and
//! collect one PDF per recipient.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use lettergen_build::pipeline::{self, PlannedLetter};
use lettergen_build::BuildSummary;
use lettergen_core::{config, ConfigError, ProjectConfig, UserDefaults};

/// Arguments for `lettergen build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project root containing `lettergen.yaml`.
    #[arg(long, short = 'p', default_value = ".")]
    pub project: PathBuf,

    /// Output directory for the PDFs (overrides the config file).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// LaTeX engine to run (overrides the config file).
    #[arg(long, value_name = "PROG")]
    pub compiler: Option<String>,

    /// Use built-in defaults when `lettergen.yaml` is missing.
    #[arg(long)]
    pub defaults: bool,

    /// List the letters and their PDFs without rendering or compiling.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlanJson<'a> {
    dry_run: bool,
    letters: &'a [PlannedLetter],
}

#[derive(Tabled)]
struct PlanTableRow {
    #[tabled(rename = "letter")]
    letter: String,
    #[tabled(rename = "recipient")]
    recipient: String,
    #[tabled(rename = "output")]
    output: String,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(
            template = %config.template.display(),
            output = %config.output.display(),
            compiler = %config.compiler.program,
            "resolved project config"
        );

        if self.dry_run {
            let planned = pipeline::plan(&config).context("failed to plan build")?;
            if self.json {
                let payload = PlanJson {
                    dry_run: true,
                    letters: &planned,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).context("failed to serialize plan JSON")?
                );
            } else {
                print_plan(&planned);
            }
            return Ok(());
        }

        let summary = pipeline::run(&config).context("build failed")?;
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("failed to serialize build JSON")?
            );
        } else {
            print_summary(&summary);
        }
        Ok(())
    }

    /// Built-in defaults ← user config ← `lettergen.yaml` ← flags.
    fn load_config(&self) -> Result<ProjectConfig> {
        let user = match config::load_user_defaults() {
            Ok(user) => user,
            Err(ConfigError::HomeNotFound) => {
                tracing::debug!("no user config directory, using built-in defaults");
                UserDefaults::default()
            }
            Err(e) => return Err(e).context("failed to load user defaults"),
        };

        let mut config = config::load_at(&self.project, &user, self.defaults)
            .with_context(|| format!("failed to load project '{}'", self.project.display()))?;
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(program) = &self.compiler {
            config.compiler.program = program.clone();
        }
        Ok(config)
    }
}

fn print_plan(planned: &[PlannedLetter]) {
    println!(
        "{} {} letters would be built",
        "[dry-run]".bright_black(),
        planned.len()
    );
    let rows: Vec<PlanTableRow> = planned
        .iter()
        .map(|p| PlanTableRow {
            letter: p.file_stem.clone(),
            recipient: p.recipient.clone(),
            output: p.output.display().to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn print_summary(summary: &BuildSummary) {
    println!(
        "{} Built {} letters ({} tex files)",
        "✓".green().bold(),
        summary.outputs.len(),
        summary.tex_files
    );
    for path in &summary.outputs {
        println!("  {}  {}", "✎".green(), path.display());
    }
}
