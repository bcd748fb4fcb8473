//! Transport to the remote snapshot store.

mod client;
mod protocol;

pub use client::SnapshotClient;
pub use protocol::{
    CreateSnapshotRequest, CreateSnapshotResponse, ErrorResponse, ReplaceOutcome, SnapshotMeta,
    SnapshotTransport,
};
