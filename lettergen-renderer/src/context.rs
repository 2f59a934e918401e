//! Serializable rendering payload built from a [`Letter`].

use std::fmt::Write as _;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lettergen_core::types::{Letter, Metadata, Recipient, Sender};

use crate::error::RenderError;

/// Rendering payload for one letter.
///
/// `recipient`, `sender` and `metadata` mirror the data files; `opening` is
/// already resolved against the recipient's salutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterContext {
    pub file_stem: String,
    pub recipient: Recipient,
    pub sender: Sender,
    pub metadata: Metadata,
    pub opening: String,
    /// Letter date, formatted with the project's `date_format`.
    pub date: String,
    pub meta: MetaCtx,
}

/// Generator info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub lettergen_version: String,
    pub generated_at: DateTime<Utc>,
}

impl LetterContext {
    /// Build a context dated today (local time).
    pub fn from_letter(letter: &Letter, date_format: &str) -> Result<Self, RenderError> {
        Self::from_letter_on(letter, Local::now().date_naive(), date_format)
    }

    /// Build a context for an explicit letter date.
    pub fn from_letter_on(
        letter: &Letter,
        date: NaiveDate,
        date_format: &str,
    ) -> Result<Self, RenderError> {
        let mut formatted = String::new();
        write!(formatted, "{}", date.format(date_format))
            .map_err(|_| RenderError::DateFormat(date_format.to_string()))?;

        Ok(LetterContext {
            file_stem: letter.file_stem.0.clone(),
            recipient: letter.recipient.clone(),
            sender: letter.sender.clone(),
            metadata: letter.metadata.clone(),
            opening: letter.opening().to_string(),
            date: formatted,
            meta: MetaCtx {
                lettergen_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: Utc::now(),
            },
        })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettergen_core::types::letters_for;

    fn letter() -> Letter {
        let recipient = Recipient {
            name: "Alice Example".to_string(),
            street: "Elm St 2".to_string(),
            city: "Shelbyville".to_string(),
            salutation: Some("Dear Alice,".to_string()),
        };
        let metadata = Metadata {
            subject: "Report".to_string(),
            opening: "Dear Sir or Madam,".to_string(),
            ..Metadata::default()
        };
        letters_for(vec![recipient], &Sender::default(), &metadata).remove(0)
    }

    #[test]
    fn context_fields_populated() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let ctx = LetterContext::from_letter_on(&letter(), date, "%d.%m.%Y").expect("ctx");
        assert_eq!(ctx.file_stem, "alice-example");
        assert_eq!(ctx.opening, "Dear Alice,");
        assert_eq!(ctx.date, "09.03.2024");
        assert_eq!(ctx.metadata.subject, "Report");
    }

    #[test]
    fn invalid_date_format_is_an_error() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let err = LetterContext::from_letter_on(&letter(), date, "%Y-%m-%").unwrap_err();
        assert!(matches!(err, RenderError::DateFormat(_)), "got: {err}");
    }

    #[test]
    fn to_tera_context_succeeds() {
        let ctx = LetterContext::from_letter(&letter(), "%Y-%m-%d").expect("ctx");
        let tera_ctx = ctx.to_tera_context().expect("context conversion");
        assert!(tera_ctx.contains_key("recipient"));
    }
}
