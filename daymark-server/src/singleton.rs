//! One daymark-server per machine, enforced with an exclusive file lock.
//!
//! Two instances writing the same snapshot files would race each other's
//! temp-and-rename updates, so the second one refuses to start.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::PathBuf;

const LOCK_FILE: &str = "daymark-server.lock";

/// Holds the lock for the life of the process; dropping it releases.
pub struct LockGuard {
    _file: File,
}

fn lock_path() -> Result<PathBuf> {
    let runtime_dir = dirs::runtime_dir()
        .or_else(|| dirs::cache_dir())
        .ok_or_else(|| anyhow::anyhow!("Could not determine runtime directory"))?;

    let dir = runtime_dir.join("daymark");
    fs::create_dir_all(&dir)?;

    Ok(dir.join(LOCK_FILE))
}

pub fn acquire_lock() -> Result<LockGuard> {
    let path = lock_path()?;
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "daymark-server is already running; only one instance may own the snapshot store.\n\
            If no other instance exists, delete the stale lock at {}",
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
