//! Tera rendering engine. Turns a [`Letter`] plus a [`Template`] into a
//! [`TexFile`] in its own temporary directory.
//!
//! Templates are plain LaTeX with tera tags. LaTeX sequences that collide
//! with tera delimiters (`{#`, `{{`, `{%`) must be wrapped in
//! `{% raw %}…{% endraw %}` or separated by a space.

use std::collections::HashMap;
use std::path::PathBuf;

use tera::Tera;

use lettergen_core::artifact::{Template, TexFile};
use lettergen_core::types::Letter;

use crate::context::LetterContext;
use crate::error::{io_err, RenderError};
use crate::escape::latex_filter;

/// Default date format for the `date` context variable.
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

fn build_tera() -> Tera {
    let mut tera = Tera::default();
    // LaTeX output: html autoescaping would mangle `&` and `<`.
    tera.autoescape_on(vec![]);
    tera.register_filter("latex", latex_filter);
    tera
}

/// Tera-based engine. Create once per build and reuse; each template file is
/// read and compiled on first use.
pub struct TemplateEngine {
    tera: Tera,
    date_format: String,
    loaded: HashMap<String, PathBuf>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl TemplateEngine {
    /// Construct an engine whose `date` variable uses `date_format`.
    pub fn new(date_format: &str) -> Self {
        TemplateEngine {
            tera: build_tera(),
            date_format: date_format.to_string(),
            loaded: HashMap::new(),
        }
    }

    fn ensure_loaded(&mut self, template: &Template) -> Result<(), RenderError> {
        if self.loaded.get(&template.name) == Some(&template.path) {
            return Ok(());
        }
        let source = std::fs::read_to_string(&template.path)
            .map_err(|e| io_err(&template.path, e))?;
        self.tera.add_raw_template(&template.name, &source)?;
        self.loaded
            .insert(template.name.clone(), template.path.clone());
        tracing::debug!(template = %template.name, path = %template.path.display(), "loaded template");
        Ok(())
    }

    /// Render `letter` against `template` and return the LaTeX source.
    ///
    /// Line endings are normalised to LF.
    pub fn render_to_string(
        &mut self,
        letter: &Letter,
        template: &Template,
    ) -> Result<String, RenderError> {
        self.ensure_loaded(template)?;
        let ctx = LetterContext::from_letter(letter, &self.date_format)?;
        self.render_with_context(&ctx, template)
    }

    /// Render a caller-provided [`LetterContext`]; `template` must be loadable.
    pub fn render_with_context(
        &mut self,
        ctx: &LetterContext,
        template: &Template,
    ) -> Result<String, RenderError> {
        self.ensure_loaded(template)?;
        let tera_ctx = ctx.to_tera_context()?;
        let content = self.tera.render(&template.name, &tera_ctx)?;
        Ok(content.replace("\r\n", "\n"))
    }

    /// Render `letter` and write `<file_stem>.tex` into a fresh temporary
    /// directory owned by the returned [`TexFile`].
    pub fn transform(&mut self, letter: &Letter, template: &Template) -> Result<TexFile, RenderError> {
        let content = self.render_to_string(letter, template)?;
        let name = letter.file_stem.tex_name();
        TexFile::create(&name, &content).map_err(|e| io_err(name, e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
