//! Shared state: the on-disk snapshot store, one JSON file per remote id.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use daymark_core::Snapshot;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    snapshots_dir: PathBuf,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .join("daymark-server");
        Self::with_dir(base)
    }

    /// Build state rooted at an arbitrary directory. Tests point this at a
    /// temp dir.
    pub fn with_dir(base: PathBuf) -> Result<Self> {
        let snapshots_dir = base.join("snapshots");
        fs::create_dir_all(&snapshots_dir).context("Failed to create snapshots directory")?;
        Ok(AppState { snapshots_dir })
    }

    fn path(&self, id: &str) -> PathBuf {
        self.snapshots_dir.join(format!("{id}.json"))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path(id).exists()
    }

    pub fn read(&self, id: &str) -> Result<Option<Snapshot>> {
        let path = self.path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot {id}"))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Snapshot {id} is corrupted"))?;

        Ok(Some(snapshot))
    }

    /// Write the snapshot atomically so a crashed write never leaves a
    /// half-written file behind.
    pub fn write(&self, id: &str, snapshot: &Snapshot) -> Result<()> {
        let path = self.path(id);
        let temp = self.snapshots_dir.join(format!("{id}.json.tmp"));

        let content = serde_json::to_string(snapshot)?;
        fs::write(&temp, content)
            .with_context(|| format!("Failed to write snapshot {id}"))?;
        fs::rename(&temp, &path)
            .with_context(|| format!("Failed to write snapshot {id}"))?;

        Ok(())
    }
}
