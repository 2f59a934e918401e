//! Tex generation stage.

use lettergen_core::{Letter, MovableFile, Template, TexFile};
use lettergen_renderer::{RenderError, TemplateEngine};

use crate::error::BuildError;

/// Renders one letter against the shared template into its own tex file.
///
/// Implementations must create the owning directory of the returned
/// [`TexFile`].
pub trait TexRenderer {
    fn render(&mut self, letter: &Letter, template: &Template) -> Result<TexFile, RenderError>;
}

impl TexRenderer for TemplateEngine {
    fn render(&mut self, letter: &Letter, template: &Template) -> Result<TexFile, RenderError> {
        self.transform(letter, template)
    }
}

/// Tex files produced before a render failure, handed back with the error so
/// the caller can clean them up.
#[derive(Debug)]
pub struct GenerationFailure {
    pub tex_files: Vec<TexFile>,
    pub error: BuildError,
}

/// Render a single letter, wrapping the collaborator error with the letter it
/// was attempted for.
pub fn render_template(
    renderer: &mut dyn TexRenderer,
    letter: &Letter,
    template: &Template,
) -> Result<TexFile, BuildError> {
    let tex_file = renderer
        .render(letter, template)
        .map_err(|source| BuildError::Render {
            letter: letter.file_stem.to_string(),
            source,
        })?;

    tracing::debug!(
        tex_file = %tex_file.path().display(),
        template = %template.path.display(),
        "creating tex file from template"
    );
    Ok(tex_file)
}

/// Render every letter in order, stopping at the first failure.
pub fn generate_tex_files(
    renderer: &mut dyn TexRenderer,
    template: &Template,
    letters: &[Letter],
) -> Result<Vec<TexFile>, GenerationFailure> {
    let mut tex_files = Vec::with_capacity(letters.len());
    for letter in letters {
        match render_template(renderer, letter, template) {
            Ok(tex_file) => tex_files.push(tex_file),
            Err(error) => return Err(GenerationFailure { tex_files, error }),
        }
    }

    tracing::info!(tex_files = tex_files.len(), "generated tex files");
    Ok(tex_files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lettergen_core::{letters_for, Metadata, Recipient, Sender};
    use std::path::PathBuf;

    /// Fails on the n-th call (1-indexed).
    struct FailingRenderer {
        fail_on: usize,
        calls: usize,
    }

    impl TexRenderer for FailingRenderer {
        fn render(&mut self, letter: &Letter, _t: &Template) -> Result<TexFile, RenderError> {
            self.calls += 1;
            if self.calls == self.fail_on {
                return Err(RenderError::Io {
                    path: PathBuf::from("letter.tex"),
                    source: std::io::Error::other("boom"),
                });
            }
            Ok(TexFile::create(&letter.file_stem.tex_name(), "x").unwrap())
        }
    }

    fn letters(n: usize) -> Vec<Letter> {
        let recipients = (1..=n)
            .map(|i| Recipient {
                name: format!("r{i}"),
                street: String::new(),
                city: String::new(),
                salutation: None,
            })
            .collect();
        letters_for(recipients, &Sender::default(), &Metadata::default())
    }

    #[test]
    fn success_returns_one_per_letter_in_order() {
        let mut r = FailingRenderer { fail_on: 0, calls: 0 };
        let tpl = Template::from_path("letter.tex");
        let files = generate_tex_files(&mut r, &tpl, &letters(3)).expect("generate");
        let stems: Vec<_> = files.iter().map(|f| f.stem().to_string()).collect();
        assert_eq!(stems, ["r1", "r2", "r3"]);
    }

    #[test]
    fn failure_stops_and_returns_prefix() {
        let mut r = FailingRenderer { fail_on: 2, calls: 0 };
        let tpl = Template::from_path("letter.tex");
        let failure = generate_tex_files(&mut r, &tpl, &letters(3)).unwrap_err();
        assert_eq!(r.calls, 2, "letters after the failing one must not be rendered");
        assert_eq!(failure.tex_files.len(), 1);
        match failure.error {
            BuildError::Render { letter, .. } => assert_eq!(letter, "r2"),
            other => panic!("expected Render, got {other:?}"),
        }
    }
}
