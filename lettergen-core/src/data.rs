//! Readers for the JSON data files a project is built from, and asset
//! discovery.
//!
//! ```text
//! data/
//!   to.json         [ { "name": …, "street": …, "city": … }, … ]
//!   from.json       { "name": …, "street": …, "city": …, "phone": …, "mail": … }
//!   metadata.json   { "subject", "signature", "opening", "closing",
//!                     "has_attachments", "has_ps" }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::artifact::Asset;
use crate::error::{data_io_err, DataError};
use crate::types::{letters_for, Letter, Metadata, Recipient, Sender};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let contents = std::fs::read_to_string(path).map_err(|e| data_io_err(path, e))?;
    serde_json::from_str(&contents).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read letter metadata from a JSON object.
pub fn read_metadata(path: &Path) -> Result<Metadata, DataError> {
    read_json(path)
}

/// Read the letter author from a JSON object.
pub fn read_sender(path: &Path) -> Result<Sender, DataError> {
    read_json(path)
}

/// Read recipients from a JSON array. An empty array is an error.
pub fn read_recipients(path: &Path) -> Result<Vec<Recipient>, DataError> {
    let recipients: Vec<Recipient> = read_json(path)?;
    if recipients.is_empty() {
        return Err(DataError::NoRecipients {
            path: path.to_path_buf(),
        });
    }
    Ok(recipients)
}

/// Read all three data files and build one letter per recipient.
pub fn read_letters(
    recipients: &Path,
    sender: &Path,
    metadata: &Path,
) -> Result<Vec<Letter>, DataError> {
    let metadata = read_metadata(metadata)?;
    let sender = read_sender(sender)?;
    let recipients = read_recipients(recipients)?;
    Ok(letters_for(recipients, &sender, &metadata))
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// A missing directory yields no assets; hidden files are skipped.
pub fn discover_assets(dir: &Path) -> Result<Vec<Asset>, DataError> {
    if !dir.exists() {
        tracing::debug!(assets_dir = %dir.display(), "assets directory missing, no assets staged");
        return Ok(vec![]);
    }
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| data_io_err(dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries.into_iter().map(|e| Asset::new(e.path())).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
