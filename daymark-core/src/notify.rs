//! Cross-context change signaling.
//!
//! Two layers, both fire-and-forget:
//! - an in-process broadcast channel for subscribers in this process
//! - a `refresh` marker file in the data directory, bumped atomically on
//!   every write, that other daymark processes poll cheaply
//!
//! Signals carry no payload worth trusting. A consumer that sees one
//! re-reads the store; the store is the source of truth.

use std::path::PathBuf;

use tokio::sync::broadcast;

const MARKER_FILE: &str = "refresh";

/// Signals observable by in-process subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Local data changed (a write, or a pull that rewrote the store).
    Updated,
    SyncStarted,
    SyncComplete,
    SyncError,
}

#[derive(Clone)]
pub struct ChangeNotifier {
    data_dir: PathBuf,
    sender: broadcast::Sender<Signal>,
}

impl ChangeNotifier {
    pub fn new(data_dir: PathBuf) -> ChangeNotifier {
        let (sender, _) = broadcast::channel(64);
        ChangeNotifier { data_dir, sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.sender.subscribe()
    }

    /// Emit an in-process signal. Having no subscribers is normal.
    pub fn emit(&self, signal: Signal) {
        let _ = self.sender.send(signal);
    }

    fn marker_path(&self) -> PathBuf {
        self.data_dir.join(MARKER_FILE)
    }

    /// Current marker value, 0 when the file doesn't exist yet.
    pub fn marker(&self) -> u64 {
        std::fs::read_to_string(self.marker_path())
            .ok()
            .and_then(|content| content.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Emit `Updated` in-process and bump the cross-process marker.
    ///
    /// Marker IO failures are swallowed: notification is best-effort and
    /// must never fail a local write.
    pub fn notify_updated(&self) {
        self.emit(Signal::Updated);
        let _ = self.bump_marker();
    }

    fn bump_marker(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let path = self.marker_path();
        let temp = self.data_dir.join(format!("{MARKER_FILE}.tmp"));
        let next = self.marker() + 1;

        std::fs::write(&temp, next.to_string())?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}
