//! HTTP implementation of the snapshot transport, against daymark-server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{DaymarkError, DaymarkResult};
use crate::snapshot::Snapshot;

use super::protocol::{
    CreateSnapshotRequest, CreateSnapshotResponse, ErrorResponse, ReplaceOutcome,
    SnapshotTransport,
};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

pub struct SnapshotClient {
    http: reqwest::Client,
    base_url: String,
}

impl SnapshotClient {
    pub fn new(base_url: String, timeout: Duration) -> SnapshotClient {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        SnapshotClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn snapshot_url(&self, id: &str) -> String {
        format!("{}/snapshots/{}", self.base_url, id)
    }

    /// Pull the error message out of a non-2xx response, falling back to
    /// the status line when the body isn't our error shape.
    async fn error_from(resp: reqwest::Response) -> DaymarkError {
        let status = resp.status();
        match resp.json::<ErrorResponse>().await {
            Ok(body) => DaymarkError::Transport(body.error),
            Err(_) => DaymarkError::Transport(format!("Server returned {status}")),
        }
    }
}

#[async_trait]
impl SnapshotTransport for SnapshotClient {
    /// GET /snapshots/{id}; 404 means "no snapshot yet", not a failure.
    async fn fetch(&self, id: &str) -> DaymarkResult<Option<Snapshot>> {
        let resp = self
            .http
            .get(self.snapshot_url(id))
            .send()
            .await
            .map_err(|e| DaymarkError::Transport(format!("Failed to reach server: {e}")))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let snapshot = resp
            .json::<Snapshot>()
            .await
            .map_err(|e| DaymarkError::Transport(format!("Malformed snapshot response: {e}")))?;

        Ok(Some(snapshot))
    }

    /// PUT /snapshots/{id}; 404 asks the caller to repair via `create`.
    async fn replace(&self, id: &str, snapshot: &Snapshot) -> DaymarkResult<ReplaceOutcome> {
        let resp = self
            .http
            .put(self.snapshot_url(id))
            .json(snapshot)
            .send()
            .await
            .map_err(|e| DaymarkError::Transport(format!("Failed to reach server: {e}")))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ReplaceOutcome::Missing);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        Ok(ReplaceOutcome::Replaced)
    }

    /// POST /snapshots with our derived id; the server echoes it back.
    async fn create(&self, id: &str, snapshot: &Snapshot) -> DaymarkResult<String> {
        let request = CreateSnapshotRequest {
            id: id.to_string(),
            snapshot: snapshot.clone(),
        };

        let resp = self
            .http
            .post(format!("{}/snapshots", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| DaymarkError::Transport(format!("Failed to reach server: {e}")))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let created = resp
            .json::<CreateSnapshotResponse>()
            .await
            .map_err(|e| DaymarkError::Transport(format!("Malformed create response: {e}")))?;

        Ok(created.id)
    }

    async fn is_online(&self) -> bool {
        self.http
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }
}
