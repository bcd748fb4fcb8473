//! Calendar event types.
//!
//! Events are stored locally and exchanged with the remote snapshot store
//! in the same JSON shape, so the serde renames here define the wire format.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DaymarkError, DaymarkResult};

/// A calendar event.
///
/// `created_at` is epoch milliseconds, stamped by the store on first save
/// and never mutated afterwards. A value of 0 means "not yet saved".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Start time of day, `HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// End time of day, `HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_important: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

impl Event {
    /// Create a new event with a fresh id and an unset creation timestamp.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            date: date.into(),
            start_time: None,
            end_time: None,
            description: None,
            is_important: false,
            color: None,
            icon: None,
            created_at: 0,
        }
    }

    /// Check the date and time fields and rewrite them in canonical form.
    ///
    /// chrono's parsers accept unpadded input like `2025-3-1` or `9:5`;
    /// stored verbatim, such a string would miss every date-keyed lookup
    /// and sort as a separate day. Parsing and reformatting guarantees
    /// every stored event carries a real, zero-padded calendar day.
    pub fn canonicalize(&mut self) -> DaymarkResult<()> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            DaymarkError::InvalidEvent(format!("'{}' is not a valid YYYY-MM-DD date", self.date))
        })?;
        self.date = date.format("%Y-%m-%d").to_string();

        for time in [&mut self.start_time, &mut self.end_time].into_iter().flatten() {
            let parsed = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
                DaymarkError::InvalidEvent(format!("'{time}' is not a valid HH:MM time"))
            })?;
            *time = parsed.format("%H:%M").to_string();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_has_unset_created_at() {
        let event = Event::new("Lunch", "2025-03-01");
        assert_eq!(event.created_at, 0);
        assert!(!event.id.is_empty());
    }

    #[test]
    fn test_new_events_get_distinct_ids() {
        let a = Event::new("A", "2025-03-01");
        let b = Event::new("B", "2025-03-01");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_canonicalize_accepts_dates_and_times() {
        let mut event = Event::new("Standup", "2025-03-20");
        event.start_time = Some("09:30".to_string());
        event.end_time = Some("09:45".to_string());
        assert!(event.canonicalize().is_ok());

        // Already-canonical fields pass through unchanged
        assert_eq!(event.date, "2025-03-20");
        assert_eq!(event.start_time.as_deref(), Some("09:30"));
    }

    #[test]
    fn test_canonicalize_pads_unpadded_input() {
        let mut event = Event::new("Lunch", "2025-3-1");
        event.start_time = Some("9:5".to_string());
        event.canonicalize().unwrap();

        assert_eq!(event.date, "2025-03-01");
        assert_eq!(event.start_time.as_deref(), Some("09:05"));
    }

    #[test]
    fn test_canonicalize_rejects_bad_date() {
        let mut event = Event::new("Oops", "2025-13-40");
        assert!(event.canonicalize().is_err());

        let mut event = Event::new("Oops", "March 1st");
        assert!(event.canonicalize().is_err());
    }

    #[test]
    fn test_canonicalize_rejects_bad_time() {
        let mut event = Event::new("Oops", "2025-03-01");
        event.start_time = Some("25:00".to_string());
        assert!(event.canonicalize().is_err());
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let mut event = Event::new("Lunch", "2025-03-01");
        event.id = "e1".to_string();
        event.created_at = 1740000000000;
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"isImportant\""));
        assert!(json.contains("\"createdAt\""));
        // Unset optional fields stay off the wire
        assert!(!json.contains("startTime"));
    }
}
