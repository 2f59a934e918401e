//! Domain types for letters and the data files they are built from.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Data file types are serializable/deserializable via serde + serde_json.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Base name (without extension) shared by a letter's `.tex` and `.pdf` files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileStem(pub String);

impl fmt::Display for FileStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FileStem {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FileStem {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl FileStem {
    /// Lower-case ASCII slug of `name`; `letter` when nothing survives.
    pub fn slug(name: &str) -> Self {
        let mut out = String::with_capacity(name.len());
        let mut dash = false;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
                dash = false;
            } else if !out.is_empty() && !dash {
                out.push('-');
                dash = true;
            }
        }
        while out.ends_with('-') {
            out.pop();
        }
        if out.is_empty() {
            out.push_str("letter");
        }
        Self(out)
    }

    /// `<stem>.tex`
    pub fn tex_name(&self) -> String {
        format!("{}.tex", self.0)
    }

    /// `<stem>.pdf`
    pub fn pdf_name(&self) -> String {
        format!("{}.pdf", self.0)
    }
}

// ---------------------------------------------------------------------------
// Data file structs
// ---------------------------------------------------------------------------

/// Per-run letter metadata, read from `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub subject: String,
    pub signature: String,
    pub opening: String,
    pub closing: String,
    pub has_attachments: bool,
    pub has_ps: bool,
}

/// One addressee. The recipients file holds a JSON array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    /// Overrides the metadata `opening` for this recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
}

/// The letter author, read from `from.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sender {
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
}

// ---------------------------------------------------------------------------
// Letter
// ---------------------------------------------------------------------------

/// One unit of work: yields exactly one `.tex` and one `.pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub file_stem: FileStem,
    pub recipient: Recipient,
    pub sender: Sender,
    pub metadata: Metadata,
}

impl Letter {
    /// Opening line for this letter: the recipient salutation when set.
    pub fn opening(&self) -> &str {
        self.recipient
            .salutation
            .as_deref()
            .unwrap_or(&self.metadata.opening)
    }
}

/// Build one [`Letter`] per recipient, in input order.
///
/// File stems are slugs of the recipient name; collisions get a numeric
/// suffix (`-2`, `-3`, …) so that every output PDF has a distinct name.
pub fn letters_for(recipients: Vec<Recipient>, sender: &Sender, metadata: &Metadata) -> Vec<Letter> {
    let mut taken: HashSet<String> = HashSet::new();
    recipients
        .into_iter()
        .map(|recipient| {
            let base = FileStem::slug(&recipient.name).0;
            let mut stem = base.clone();
            let mut n = 1;
            while !taken.insert(stem.clone()) {
                n += 1;
                stem = format!("{base}-{n}");
            }
            Letter {
                file_stem: FileStem(stem),
                recipient,
                sender: sender.clone(),
                metadata: metadata.clone(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
