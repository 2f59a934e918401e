//! # lettergen-renderer
//!
//! Tera-based template engine that renders one LaTeX source file per letter.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lettergen_core::{Letter, MovableFile, Template};
//! use lettergen_renderer::TemplateEngine;
//!
//! fn render_all(letters: &[Letter], template: &Template) {
//!     let mut engine = TemplateEngine::default();
//!     for letter in letters {
//!         if let Ok(tex) = engine.transform(letter, template) {
//!             println!("{}", tex.path().display());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod escape;

pub use context::LetterContext;
pub use engine::{TemplateEngine, DEFAULT_DATE_FORMAT};
pub use error::RenderError;
pub use escape::latex_escape;
