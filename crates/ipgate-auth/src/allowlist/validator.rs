//! Write-time validation and normalization of allow-list text.
//!
//! Evaluation tolerates bad entries by never matching them. Saving goes
//! through here instead, so typos are reported to the operator rather
//! than silently locking addresses out.

use serde::Serialize;

use ipgate_core::error::AppError;

use super::entry::{AllowListEntry, EntryError};
use super::policy::split_entries;

/// An entry rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidEntry {
    /// 1-based position among the non-blank entries.
    pub position: usize,
    /// The entry text after trimming.
    pub text: String,
    /// Why the entry was rejected.
    pub reason: String,
}

/// Check every entry, returning the ones that would never match.
pub fn validate(text: &str) -> Vec<InvalidEntry> {
    split_entries(text)
        .enumerate()
        .filter_map(|(idx, raw)| {
            AllowListEntry::try_parse(raw)
                .err()
                .map(|err: EntryError| InvalidEntry {
                    position: idx + 1,
                    text: raw.to_string(),
                    reason: err.to_string(),
                })
        })
        .collect()
}

/// Rewrite allow-list text into the canonical one-entry-per-line form.
///
/// Entries are trimmed, blanks dropped, and legacy comma separators turned
/// into newlines. Entry text itself is kept as written.
pub fn normalize(text: &str) -> String {
    split_entries(text).collect::<Vec<_>>().join("\n")
}

/// Upgrade a legacy comma-separated value to the newline format.
///
/// Returns `None` when the value is already in canonical form.
pub fn upgrade_legacy(text: &str) -> Option<String> {
    let upgraded = normalize(text);
    (upgraded != text).then_some(upgraded)
}

/// Validate and normalize text about to be saved.
pub fn ensure_valid(text: &str) -> Result<String, AppError> {
    let invalid = validate(text);
    if invalid.is_empty() {
        return Ok(normalize(text));
    }

    let details = invalid
        .iter()
        .map(|e| format!("entry {} '{}': {}", e.position, e.text, e.reason))
        .collect::<Vec<_>>()
        .join("; ");
    Err(AppError::validation(format!(
        "Invalid allow-list entries: {details}"
    )))
}
