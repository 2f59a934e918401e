//! Config-driven pipeline entrypoint used by the CLI.

use std::path::PathBuf;

use serde::Serialize;

use lettergen_core::{data, ProjectConfig, Template};
use lettergen_renderer::TemplateEngine;

use crate::compiler::LatexCompiler;
use crate::error::BuildError;
use crate::project::{BuildSummary, Project};

/// One letter as it would be built, without rendering anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedLetter {
    pub file_stem: String,
    pub recipient: String,
    pub output: PathBuf,
}

/// Read data files and assets named by `config` and assemble a [`Project`]
/// wired to the real renderer and compiler.
pub fn load_project(config: &ProjectConfig) -> Result<Project, BuildError> {
    let letters = data::read_letters(
        &config.data.recipients,
        &config.data.sender,
        &config.data.metadata,
    )?;
    let assets = data::discover_assets(&config.assets)?;
    tracing::debug!(letters = letters.len(), assets = assets.len(), "loaded project data");

    Ok(Project::new(
        letters,
        Template::from_path(config.template.clone()),
        assets,
        config.output.clone(),
    )
    .with_renderer(TemplateEngine::new(&config.date_format))
    .with_compiler(LatexCompiler::new(&config.compiler)))
}

/// What `run` would produce, in letter order.
pub fn plan(config: &ProjectConfig) -> Result<Vec<PlannedLetter>, BuildError> {
    let project = load_project(config)?;
    Ok(project
        .letters()
        .iter()
        .map(|l| PlannedLetter {
            file_stem: l.file_stem.to_string(),
            recipient: l.recipient.name.clone(),
            output: project.out_dir().join(l.file_stem.pdf_name()),
        })
        .collect())
}

/// Load and build the project described by `config`.
pub fn run(config: &ProjectConfig) -> Result<BuildSummary, BuildError> {
    load_project(config)?.build()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lettergen_core::{CompilerConfig, DataError};
    use tempfile::TempDir;

    use super::*;

    fn scaffold(root: &std::path::Path) -> ProjectConfig {
        fs::create_dir_all(root.join("data")).unwrap();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(
            root.join("data/metadata.json"),
            r#"{"subject":"S","signature":"Sig","opening":"Hi,","closing":"Bye","has_attachments":false,"has_ps":false}"#,
        )
        .unwrap();
        fs::write(root.join("data/from.json"), r#"{"name":"Me"}"#).unwrap();
        fs::write(
            root.join("data/to.json"),
            r#"[{"name":"Alice"},{"name":"Bob"}]"#,
        )
        .unwrap();
        fs::write(root.join("templates/letter.tex"), "{{ opening }} {{ recipient.name }}").unwrap();
        fs::write(root.join("assets/logo.png"), "png").unwrap();
        ProjectConfig::default().resolved(root)
    }

    #[test]
    fn plan_lists_outputs_without_building() {
        let root = TempDir::new().unwrap();
        let config = scaffold(root.path());
        let planned = plan(&config).expect("plan");
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].file_stem, "alice");
        assert_eq!(planned[1].output, root.path().join("out").join("bob.pdf"));
        assert!(!root.path().join("out").exists(), "plan must not write");
    }

    #[test]
    fn missing_data_file_is_data_error() {
        let root = TempDir::new().unwrap();
        let config = scaffold(root.path());
        fs::remove_file(&config.data.sender).unwrap();
        let err = run(&config).unwrap_err();
        assert!(matches!(err, BuildError::Data(DataError::Io { .. })), "got: {err}");
    }

    #[test]
    #[cfg(unix)]
    fn run_builds_with_configured_engine() {
        let root = TempDir::new().unwrap();
        let mut config = scaffold(root.path());
        // Fails unless the logo was staged next to the tex file.
        config.compiler = CompilerConfig {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                r#"test -f logo.png && cp "$0" "${0%.tex}.pdf""#.to_string(),
            ],
            runs: 1,
        };
        let summary = run(&config).expect("run");
        assert_eq!(summary.tex_files, 2);
        let out = root.path().join("out");
        assert_eq!(summary.outputs, vec![out.join("alice.pdf"), out.join("bob.pdf")]);
        assert_eq!(fs::read_to_string(out.join("bob.pdf")).unwrap(), "Hi, Bob");
    }
}
