//! The JSON protocol shared between the daymark binaries and the
//! snapshot server, plus the transport seam the sync engine works against.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DaymarkResult;
use crate::snapshot::Snapshot;

/// Body of `POST /snapshots`. The client supplies its derived id so that
/// every device logging in with the same identity lands on the same
/// resource without server-side coordination.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSnapshotRequest {
    pub id: String,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Response to `POST /snapshots`: the id the server stored under.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSnapshotResponse {
    pub id: String,
}

/// Response to `PUT /snapshots/{id}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub updated_at: i64,
}

/// Standard error body, `{ "error": ... }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result of a whole-snapshot replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
    /// The resource doesn't exist remotely (404). Expected after a remote
    /// reset; the caller repairs by creating.
    Missing,
}

/// The sync engine's view of the remote store.
///
/// Absence of the remote resource is a normal condition, not an error:
/// `fetch` reports it as `Ok(None)` and `replace` as `Missing`. Everything
/// else (network, non-2xx, bad JSON) is a `Transport` error.
#[async_trait]
pub trait SnapshotTransport {
    async fn fetch(&self, id: &str) -> DaymarkResult<Option<Snapshot>>;

    async fn replace(&self, id: &str, snapshot: &Snapshot) -> DaymarkResult<ReplaceOutcome>;

    async fn create(&self, id: &str, snapshot: &Snapshot) -> DaymarkResult<String>;

    /// Quick reachability probe. Any failure means offline.
    async fn is_online(&self) -> bool;
}
