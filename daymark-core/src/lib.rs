//! Core types and sync machinery for the daymark ecosystem.
//!
//! This crate provides everything the daymark binaries share:
//! - `Event`, `DailyNote` and `Snapshot` for calendar/journal data
//! - `store` for the local SQLite database (events, notes, settings)
//! - `notify` for cross-context change signaling
//! - `remote` for the HTTP snapshot transport
//! - `sync` for the push/pull reconciliation engine and session state
//! - `token` for remote-id derivation and sync-token handling

pub mod daymark;
pub mod daymark_config;
pub mod error;
pub mod event;
pub mod note;
pub mod notify;
pub mod remote;
pub mod snapshot;
pub mod store;
pub mod sync;
pub mod token;

// Re-export the common types at crate root for convenience
pub use error::{DaymarkError, DaymarkResult};
pub use event::Event;
pub use note::DailyNote;
pub use snapshot::Snapshot;
