//! Per-session record produced by the extraction stage.

use serde::{Deserialize, Serialize};

use crate::extract::ExtractedFields;

/// Title given to a session whose page could not be fetched.
pub const ERROR_TITLE: &str = "ERROR";

/// Placeholder used for a missing title or chair slot.
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator used when a list field is stored as a single cell.
pub const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub title: String,
    pub chairs: Vec<String>,
    pub presenters: Vec<String>,
    pub speakers: Vec<String>,
    pub moderators: Vec<String>,
    pub panelists: Vec<String>,
}

impl SessionRecord {
    #[must_use]
    pub fn from_extracted(session_id: impl Into<String>, fields: ExtractedFields) -> Self {
        Self {
            session_id: session_id.into(),
            title: fields.title,
            chairs: fields.chairs,
            presenters: fields.presenters,
            speakers: fields.speakers,
            moderators: fields.moderators,
            panelists: fields.panelists,
        }
    }

    /// Placeholder appended when a session fails, keeping one row per identifier.
    #[must_use]
    pub fn error(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            title: ERROR_TITLE.to_string(),
            chairs: Vec::new(),
            presenters: Vec::new(),
            speakers: Vec::new(),
            moderators: Vec::new(),
            panelists: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE
    }

    #[must_use]
    pub fn chairs_joined(&self) -> String {
        self.chairs.join(LIST_SEPARATOR)
    }

    #[must_use]
    pub fn presenters_joined(&self) -> String {
        self.presenters.join(LIST_SEPARATOR)
    }

    #[must_use]
    pub fn speakers_joined(&self) -> String {
        self.speakers.join(LIST_SEPARATOR)
    }

    #[must_use]
    pub fn moderators_joined(&self) -> String {
        self.moderators.join(LIST_SEPARATOR)
    }

    #[must_use]
    pub fn panelists_joined(&self) -> String {
        self.panelists.join(LIST_SEPARATOR)
    }
}

/// Split a stored list cell back into its entries.
///
/// Entries are separated by commas; surrounding whitespace is trimmed and
/// empty entries are dropped.
#[must_use]
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
