//! LaTeX → PDF compilation.
//!
//! [`PdfCompiler`] is the injection seam; [`LatexCompiler`] shells out to a
//! real engine (`pdflatex` by default). Compilation is blocking and runs in
//! the tex file's own directory so relative asset paths resolve.

use std::process::{Command, Stdio};

use lettergen_core::{CompilerConfig, MovableFile, PdfFile, TexFile};

use crate::error::{BuildError, CompileError};

/// Number of engine output lines kept in [`CompileError::Exit`].
const OUTPUT_TAIL_LINES: usize = 20;

/// Turns one generated source into a PDF in the same directory.
pub trait PdfCompiler {
    fn compile(&mut self, tex: &TexFile) -> Result<PdfFile, CompileError>;
}

/// External LaTeX engine invocation.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    args: Vec<String>,
    runs: u32,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self::new(&CompilerConfig::default())
    }
}

impl LatexCompiler {
    pub fn new(config: &CompilerConfig) -> Self {
        LatexCompiler {
            program: config.program.clone(),
            args: config.args.clone(),
            runs: config.runs.max(1),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

fn tail(bytes: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

impl PdfCompiler for LatexCompiler {
    fn compile(&mut self, tex: &TexFile) -> Result<PdfFile, CompileError> {
        let file_name = tex.path().file_name().unwrap_or_default();

        for run in 1..=self.runs {
            tracing::trace!(program = %self.program, tex = %tex.path().display(), run, "running latex engine");
            let output = Command::new(&self.program)
                .args(&self.args)
                .arg(file_name)
                .current_dir(tex.dir())
                .stdin(Stdio::null())
                .output()
                .map_err(|e| CompileError::Spawn {
                    program: self.program.clone(),
                    tex: tex.path().to_path_buf(),
                    source: e,
                })?;

            if !output.status.success() {
                let mut log = tail(&output.stdout, OUTPUT_TAIL_LINES);
                let stderr = tail(&output.stderr, OUTPUT_TAIL_LINES);
                if !stderr.is_empty() {
                    if !log.is_empty() {
                        log.push('\n');
                    }
                    log.push_str(&stderr);
                }
                return Err(CompileError::Exit {
                    program: self.program.clone(),
                    tex: tex.path().to_path_buf(),
                    status: output.status.to_string(),
                    output: log,
                });
            }
        }

        let pdf = tex.dir().join(format!("{}.pdf", tex.stem()));
        if !pdf.is_file() {
            return Err(CompileError::MissingOutput {
                program: self.program.clone(),
                pdf,
            });
        }
        Ok(PdfFile { path: pdf })
    }
}

/// Compile every tex file in order.
///
/// On the first failure the error is returned and every PDF compiled so far
/// is dropped: a failed run never delivers partial output.
pub fn compile_tex_files(
    compiler: &mut dyn PdfCompiler,
    tex_files: &[TexFile],
) -> Result<Vec<PdfFile>, BuildError> {
    let mut pdf_files = Vec::with_capacity(tex_files.len());
    for tex in tex_files {
        let pdf = compiler.compile(tex)?;
        tracing::debug!(
            input_file = %tex.path().display(),
            output_file = %pdf.path.display(),
            "render letter as pdf"
        );
        pdf_files.push(pdf);
    }
    Ok(pdf_files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
