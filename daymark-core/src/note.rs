//! Daily journal notes.

use serde::{Deserialize, Serialize};

/// A free-text note attached to one calendar day.
///
/// The date string is the identity: at most one note record per day.
/// Saving empty content keeps the record around but removes the day from
/// "dates with notes" enumerations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNote {
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    pub content: String,
    /// Epoch milliseconds of the last save
    pub updated_at: i64,
}

impl DailyNote {
    /// Whether this note counts as "present" for enumeration purposes.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
