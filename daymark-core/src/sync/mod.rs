//! The reconciliation engine and its persisted session state.

mod engine;
mod session;

pub use engine::{LoginOutcome, PullOutcome, PushOutcome, SyncEngine};
pub use session::{Session, Theme};
