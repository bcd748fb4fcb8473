//! The whole-snapshot payload exchanged with the remote store.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::note::DailyNote;

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// The complete local dataset plus one timestamp for the whole thing.
///
/// Pushes and pulls always move a full `Snapshot`; there is no delta
/// protocol. `updated_at` is stamped by whoever pushes, and ordering
/// between devices is decided by comparing it against the locally
/// remembered last-sync value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub notes: Vec<DailyNote>,
    pub updated_at: i64,
}

impl Snapshot {
    pub fn new(events: Vec<Event>, notes: Vec<DailyNote>, updated_at: i64) -> Self {
        Snapshot {
            events,
            notes,
            updated_at,
        }
    }

    pub fn empty(updated_at: i64) -> Self {
        Snapshot::new(Vec::new(), Vec::new(), updated_at)
    }
}
