//! The push/pull reconciliation engine.
//!
//! Conflict policy is last-write-wins at whole-snapshot granularity: a
//! push replaces the entire remote snapshot, a pull replaces the entire
//! local store. The single conflict-avoidance rule is that a pull is
//! skipped while the dirty flag is set, so unpushed local writes are never
//! clobbered; the next push then overwrites remote regardless of what
//! changed there. A device that keeps writing locally while its pushes
//! fail can therefore ignore newer remote edits indefinitely; token import
//! or a successful push are the ways out.

use crate::error::{DaymarkError, DaymarkResult};
use crate::event::Event;
use crate::note::DailyNote;
use crate::notify::{ChangeNotifier, Signal};
use crate::remote::{ReplaceOutcome, SnapshotTransport};
use crate::snapshot::{Snapshot, now_millis};
use crate::store::Store;
use crate::token;

use super::session::Session;

/// How a push attempt ended. The skip variants are quiet by design:
/// background pushes fire after every write and most of them have nothing
/// to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed { events: usize, notes: usize },
    /// Another push or pull is in flight in this context.
    Busy,
    /// Not logged in.
    NoRemote,
    /// The server didn't answer the health probe.
    Offline,
    /// Transport failure. The dirty flag stays set so the next trigger
    /// retries.
    Failed(String),
}

/// How a pull cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    Applied { events: usize, notes: usize },
    /// Unpushed local writes exist; local wins until they are pushed.
    SkippedDirty,
    /// Remote is not newer than what we last reconciled.
    UpToDate,
    /// No remote snapshot exists. The next push recreates it.
    Missing,
    Busy,
    NoRemote,
    Failed(String),
}

/// How a login bootstrap ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// An existing remote snapshot was found and applied locally.
    Pulled { events: usize, notes: usize },
    /// No snapshot existed; one was created from the current local data.
    Created,
}

/// The reconciliation engine: owns the local store, the transport, and the
/// change notifier.
///
/// `is_syncing` guards against overlapping push/pull within this context
/// only. It is deliberately not a cross-process lock; two daymark
/// processes may race a push, and whichever lands last wins the snapshot.
/// The persisted session flags, by contrast, live in the settings table
/// and are re-read at every operation so separate processes cooperate.
pub struct SyncEngine<T: SnapshotTransport> {
    store: Store,
    transport: T,
    notifier: ChangeNotifier,
    is_syncing: bool,
}

impl<T: SnapshotTransport> SyncEngine<T> {
    pub fn new(store: Store, transport: T, notifier: ChangeNotifier) -> SyncEngine<T> {
        SyncEngine {
            store,
            transport,
            notifier,
            is_syncing: false,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> DaymarkResult<Session> {
        self.store.session()
    }

    // ------------------------------------------------------------------
    // Write wrappers
    //
    // Store write, then dirty flag, then notification. Local writes never
    // wait on the network; scheduling the push is the caller's business
    // (the CLI attempts one immediately, `watch` debounces).
    // ------------------------------------------------------------------

    pub fn save_event(&self, event: &Event) -> DaymarkResult<Event> {
        let stored = self.store.save_event(event)?;
        self.mark_dirty()?;
        Ok(stored)
    }

    pub fn delete_event(&self, id: &str) -> DaymarkResult<bool> {
        let existed = self.store.delete_event(id)?;
        // Deleting an absent id still counts as a write
        self.mark_dirty()?;
        Ok(existed)
    }

    pub fn save_daily_note(&self, date: &str, content: &str) -> DaymarkResult<DailyNote> {
        let note = self.store.save_daily_note(date, content)?;
        self.mark_dirty()?;
        Ok(note)
    }

    fn mark_dirty(&self) -> DaymarkResult<()> {
        self.store.set_dirty(true)?;
        self.notifier.notify_updated();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Push
    // ------------------------------------------------------------------

    /// Push the full local dataset to the remote snapshot.
    pub async fn push(&mut self) -> DaymarkResult<PushOutcome> {
        if self.is_syncing {
            return Ok(PushOutcome::Busy);
        }
        let session = self.store.session()?;
        let Some(remote_id) = session.remote_id else {
            return Ok(PushOutcome::NoRemote);
        };
        if !self.transport.is_online().await {
            return Ok(PushOutcome::Offline);
        }

        self.is_syncing = true;
        self.notifier.emit(Signal::SyncStarted);
        let outcome = self.push_inner(&remote_id).await;
        self.is_syncing = false;

        match &outcome {
            Ok(PushOutcome::Pushed { .. }) => self.notifier.emit(Signal::SyncComplete),
            _ => self.notifier.emit(Signal::SyncError),
        }

        outcome
    }

    async fn push_inner(&mut self, remote_id: &str) -> DaymarkResult<PushOutcome> {
        let stamp = now_millis();
        let snapshot = Snapshot::new(self.store.all_events()?, self.store.all_notes()?, stamp);
        let events = snapshot.events.len();
        let notes = snapshot.notes.len();

        let result = match self.transport.replace(remote_id, &snapshot).await {
            Ok(ReplaceOutcome::Replaced) => Ok(()),
            // Remote resource vanished; recreate it with the same payload
            Ok(ReplaceOutcome::Missing) => {
                self.transport.create(remote_id, &snapshot).await.map(|_| ())
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.store.set_last_sync_timestamp(stamp)?;
                self.store.set_dirty(false)?;
                Ok(PushOutcome::Pushed { events, notes })
            }
            // Dirty stays set: the next write or timer tick retries
            Err(e) => Ok(PushOutcome::Failed(e.to_string())),
        }
    }

    // ------------------------------------------------------------------
    // Pull
    // ------------------------------------------------------------------

    /// One pull cycle: fetch the remote snapshot and apply it wholesale if
    /// it is strictly newer and no local writes are pending (or if a token
    /// import forced the next pull).
    pub async fn pull(&mut self) -> DaymarkResult<PullOutcome> {
        if self.is_syncing {
            return Ok(PullOutcome::Busy);
        }
        let session = self.store.session()?;
        let Some(remote_id) = session.remote_id.clone() else {
            return Ok(PullOutcome::NoRemote);
        };

        self.is_syncing = true;
        self.notifier.emit(Signal::SyncStarted);
        let outcome = self.pull_inner(&remote_id, &session).await;
        self.is_syncing = false;

        match &outcome {
            Ok(PullOutcome::Failed(_)) => self.notifier.emit(Signal::SyncError),
            _ => self.notifier.emit(Signal::SyncComplete),
        }

        outcome
    }

    async fn pull_inner(&mut self, remote_id: &str, session: &Session) -> DaymarkResult<PullOutcome> {
        let remote = match self.transport.fetch(remote_id).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(PullOutcome::Missing),
            Err(e) => return Ok(PullOutcome::Failed(e.to_string())),
        };

        let newer = remote.updated_at > session.last_sync_timestamp;

        if session.force_pull {
            // Explicit user override: apply even over pending local writes
            let (events, notes) = self.apply_remote(&remote)?;
            self.store.set_dirty(false)?;
            self.store.set_force_pull(false)?;
            return Ok(PullOutcome::Applied { events, notes });
        }

        if !newer {
            return Ok(PullOutcome::UpToDate);
        }
        if session.dirty {
            // Local-pending-writes win; the next push overwrites remote
            return Ok(PullOutcome::SkippedDirty);
        }

        let (events, notes) = self.apply_remote(&remote)?;
        Ok(PullOutcome::Applied { events, notes })
    }

    fn apply_remote(&mut self, remote: &Snapshot) -> DaymarkResult<(usize, usize)> {
        self.store.replace_all(&remote.events, &remote.notes)?;
        self.store.set_last_sync_timestamp(remote.updated_at)?;
        self.notifier.notify_updated();
        Ok((remote.events.len(), remote.notes.len()))
    }

    // ------------------------------------------------------------------
    // Session bootstrap
    // ------------------------------------------------------------------

    /// Log in: derive the remote id from the identity, then pull the
    /// existing snapshot or create one from the current local data.
    ///
    /// Transport failures propagate and leave the session unchanged, so a
    /// failed login attempt has no side effects.
    pub async fn login(&mut self, identity: &str) -> DaymarkResult<LoginOutcome> {
        let remote_id = token::derive_remote_id(identity);

        let outcome = match self.transport.fetch(&remote_id).await? {
            Some(remote) => {
                let (events, notes) = self.apply_remote(&remote)?;
                LoginOutcome::Pulled { events, notes }
            }
            None => {
                // First login for this identity: seed the remote with
                // whatever is already here so pre-login data isn't stranded
                let stamp = now_millis();
                let snapshot =
                    Snapshot::new(self.store.all_events()?, self.store.all_notes()?, stamp);
                self.transport.create(&remote_id, &snapshot).await?;
                self.store.set_last_sync_timestamp(stamp)?;
                LoginOutcome::Created
            }
        };

        self.store.set_remote_id(&remote_id)?;
        self.store.set_dirty(false)?;
        self.store.set_authenticated(true)?;

        Ok(outcome)
    }

    /// Log out: clear the session flags locally. The remote snapshot and
    /// all local data stay put, recoverable by logging in again.
    pub fn logout(&self) -> DaymarkResult<()> {
        self.store.clear_session()
    }

    // ------------------------------------------------------------------
    // Token transfer
    // ------------------------------------------------------------------

    /// The current remote id, for the user to copy to another device.
    pub fn export_token(&self) -> DaymarkResult<Option<String>> {
        Ok(self.store.session()?.remote_id)
    }

    /// Adopt a pasted sync token after verifying it resolves to a real
    /// remote snapshot. Arms `force_pull` so the next pull cycle applies
    /// that snapshot unconditionally, pending local writes or not.
    pub async fn import_token(&mut self, raw_token: &str) -> DaymarkResult<String> {
        let token = token::normalize_token(raw_token)?;

        match self.transport.fetch(&token).await? {
            Some(_) => {}
            None => {
                return Err(DaymarkError::InvalidToken(format!(
                    "no snapshot found for token '{token}'"
                )));
            }
        }

        self.store.set_remote_id(&token)?;
        self.store.set_last_sync_timestamp(0)?;
        self.store.set_force_pull(true)?;
        self.store.set_authenticated(true)?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{DaymarkError, DaymarkResult};
    use crate::token::derive_remote_id;

    use super::*;

    /// In-memory stand-in for the snapshot server.
    #[derive(Clone)]
    struct MemoryTransport {
        inner: Arc<MemoryTransportInner>,
    }

    struct MemoryTransportInner {
        snapshots: Mutex<HashMap<String, Snapshot>>,
        online: AtomicBool,
        failing: AtomicBool,
    }

    impl MemoryTransport {
        fn new() -> MemoryTransport {
            MemoryTransport {
                inner: Arc::new(MemoryTransportInner {
                    snapshots: Mutex::new(HashMap::new()),
                    online: AtomicBool::new(true),
                    failing: AtomicBool::new(false),
                }),
            }
        }

        fn set_online(&self, online: bool) {
            self.inner.online.store(online, Ordering::SeqCst);
        }

        fn set_failing(&self, failing: bool) {
            self.inner.failing.store(failing, Ordering::SeqCst);
        }

        fn insert(&self, id: &str, snapshot: Snapshot) {
            self.inner
                .snapshots
                .lock()
                .unwrap()
                .insert(id.to_string(), snapshot);
        }

        fn get(&self, id: &str) -> Option<Snapshot> {
            self.inner.snapshots.lock().unwrap().get(id).cloned()
        }

        fn remove(&self, id: &str) {
            self.inner.snapshots.lock().unwrap().remove(id);
        }

        fn check(&self) -> DaymarkResult<()> {
            if self.inner.failing.load(Ordering::SeqCst) {
                return Err(DaymarkError::Transport("connection refused".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SnapshotTransport for MemoryTransport {
        async fn fetch(&self, id: &str) -> DaymarkResult<Option<Snapshot>> {
            self.check()?;
            Ok(self.get(id))
        }

        async fn replace(&self, id: &str, snapshot: &Snapshot) -> DaymarkResult<ReplaceOutcome> {
            self.check()?;
            let mut snapshots = self.inner.snapshots.lock().unwrap();
            if !snapshots.contains_key(id) {
                return Ok(ReplaceOutcome::Missing);
            }
            snapshots.insert(id.to_string(), snapshot.clone());
            Ok(ReplaceOutcome::Replaced)
        }

        async fn create(&self, id: &str, snapshot: &Snapshot) -> DaymarkResult<String> {
            self.check()?;
            self.insert(id, snapshot.clone());
            Ok(id.to_string())
        }

        async fn is_online(&self) -> bool {
            self.inner.online.load(Ordering::SeqCst)
        }
    }

    // The TempDir guard rides along so the marker directory outlives the
    // engine and is removed when the test ends
    fn make_engine(transport: MemoryTransport) -> (SyncEngine<MemoryTransport>, tempfile::TempDir) {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let notifier = ChangeNotifier::new(dir.path().to_path_buf());
        (SyncEngine::new(store, transport, notifier), dir)
    }

    fn make_event(id: &str, title: &str, date: &str) -> Event {
        let mut event = Event::new(title, date);
        event.id = id.to_string();
        event
    }

    async fn logged_in_engine(
        transport: &MemoryTransport,
        identity: &str,
    ) -> (SyncEngine<MemoryTransport>, tempfile::TempDir) {
        let (mut engine, dir) = make_engine(transport.clone());
        engine.login(identity).await.unwrap();
        (engine, dir)
    }

    #[tokio::test]
    async fn test_save_marks_dirty_and_push_clears_it() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;

        let event = make_event("e1", "Lunch", "2025-03-01");
        engine.save_event(&event).unwrap();

        let session = engine.session().unwrap();
        assert!(session.dirty);

        let outcome = engine.push().await.unwrap();
        assert_eq!(outcome, PushOutcome::Pushed { events: 1, notes: 0 });

        let session = engine.session().unwrap();
        assert!(!session.dirty);
        assert!(session.last_sync_timestamp > 0);
    }

    #[tokio::test]
    async fn test_push_skips_when_logged_out() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = make_engine(transport);

        engine.save_event(&make_event("e1", "Lunch", "2025-03-01")).unwrap();
        assert_eq!(engine.push().await.unwrap(), PushOutcome::NoRemote);

        // The local write stuck around regardless
        assert_eq!(engine.store().all_events().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_push_skips_when_offline() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;

        engine.save_event(&make_event("e1", "Lunch", "2025-03-01")).unwrap();
        transport.set_online(false);

        assert_eq!(engine.push().await.unwrap(), PushOutcome::Offline);
        assert!(engine.session().unwrap().dirty);
    }

    #[tokio::test]
    async fn test_failed_push_keeps_dirty_for_retry() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;

        engine.save_event(&make_event("e1", "Lunch", "2025-03-01")).unwrap();

        // is_online passes but the PUT itself blows up
        transport.set_failing(true);
        let outcome = engine.push().await.unwrap();
        assert!(matches!(outcome, PushOutcome::Failed(_)));
        assert!(engine.session().unwrap().dirty);

        transport.set_failing(false);
        let outcome = engine.push().await.unwrap();
        assert!(matches!(outcome, PushOutcome::Pushed { .. }));
        assert!(!engine.session().unwrap().dirty);
    }

    #[tokio::test]
    async fn test_push_repairs_missing_remote() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;
        let remote_id = derive_remote_id("alice");

        // Remote resource disappears out from under us
        transport.remove(&remote_id);

        engine.save_event(&make_event("e1", "Lunch", "2025-03-01")).unwrap();
        let outcome = engine.push().await.unwrap();
        assert_eq!(outcome, PushOutcome::Pushed { events: 1, notes: 0 });

        let remote = transport.get(&remote_id).unwrap();
        assert_eq!(remote.events.len(), 1);
        assert_eq!(remote.events[0].id, "e1");
    }

    #[tokio::test]
    async fn test_pull_applies_newer_remote() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;
        let remote_id = derive_remote_id("alice");

        // Another device pushed a newer snapshot
        let newer = now_millis() + 1000;
        transport.insert(
            &remote_id,
            Snapshot::new(
                vec![make_event("e9", "From elsewhere", "2025-04-01")],
                vec![DailyNote {
                    date: "2025-04-01".to_string(),
                    content: "remote note".to_string(),
                    updated_at: newer,
                }],
                newer,
            ),
        );

        let outcome = engine.pull().await.unwrap();
        assert_eq!(outcome, PullOutcome::Applied { events: 1, notes: 1 });

        let events = engine.store().all_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "From elsewhere");
        assert_eq!(engine.store().daily_note("2025-04-01").unwrap(), "remote note");
        assert_eq!(engine.session().unwrap().last_sync_timestamp, newer);
    }

    #[tokio::test]
    async fn test_pull_skips_older_remote() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;

        engine.save_event(&make_event("e1", "Lunch", "2025-03-01")).unwrap();
        engine.push().await.unwrap();

        // Remote still holds what we just pushed; nothing newer
        assert_eq!(engine.pull().await.unwrap(), PullOutcome::UpToDate);
    }

    #[tokio::test]
    async fn test_local_wins_over_pull_while_dirty() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;
        let remote_id = derive_remote_id("alice");

        // A pending local write...
        engine.save_event(&make_event("local", "Mine", "2025-03-01")).unwrap();

        // ...and a strictly newer remote snapshot from another device
        let newer = now_millis() + 1000;
        transport.insert(
            &remote_id,
            Snapshot::new(vec![make_event("remote", "Theirs", "2025-03-02")], vec![], newer),
        );

        assert_eq!(engine.pull().await.unwrap(), PullOutcome::SkippedDirty);

        // Local data is untouched
        let events = engine.store().all_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "local");
    }

    #[tokio::test]
    async fn test_pull_reports_missing_remote_quietly() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;
        let remote_id = derive_remote_id("alice");

        transport.remove(&remote_id);
        assert_eq!(engine.pull().await.unwrap(), PullOutcome::Missing);
    }

    #[tokio::test]
    async fn test_pull_failure_is_an_outcome_not_an_error() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = logged_in_engine(&transport, "alice").await;

        transport.set_failing(true);
        let outcome = engine.pull().await.unwrap();
        assert!(matches!(outcome, PullOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_push_then_pull_round_trip() {
        let transport = MemoryTransport::new();

        // Device one pushes events [A, B] and one note
        let (mut first, _dir) = logged_in_engine(&transport, "alice").await;
        first.save_event(&make_event("a", "A", "2025-03-01")).unwrap();
        first.save_event(&make_event("b", "B", "2025-03-02")).unwrap();
        first.save_daily_note("2025-03-01", "hello").unwrap();
        first.push().await.unwrap();

        // Device two, fresh store, logs in with the same identity
        let (mut second, _second_dir) = make_engine(transport.clone());
        let outcome = second.login("alice").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Pulled { events: 2, notes: 1 });

        let events = second.store().all_events().unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(second.store().daily_note("2025-03-01").unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_lunch_scenario() {
        // Empty local and remote state
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = make_engine(transport.clone());
        assert_eq!(engine.login("charan").await.unwrap(), LoginOutcome::Created);

        // Save one event
        let event = make_event("e1", "Lunch", "2025-03-01");
        let stored = engine.save_event(&event).unwrap();

        let events = engine.store().all_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
        assert!(engine.session().unwrap().dirty);

        // Push sets the sync clock and clears dirty
        engine.push().await.unwrap();
        let session = engine.session().unwrap();
        assert!(!session.dirty);
        assert!(session.last_sync_timestamp > 0);

        // A second device pulling must see e1 with identical fields
        let (mut second, _second_dir) = make_engine(transport);
        second.login("charan").await.unwrap();
        let events = second.store().all_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], stored);
    }

    #[tokio::test]
    async fn test_login_creates_from_local_data() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = make_engine(transport.clone());

        // Data written before ever logging in
        engine.save_event(&make_event("pre", "Before login", "2025-03-01")).unwrap();

        assert_eq!(engine.login("alice").await.unwrap(), LoginOutcome::Created);

        // The pre-login event reached the remote rather than being stranded
        let remote = transport.get(&derive_remote_id("alice")).unwrap();
        assert_eq!(remote.events.len(), 1);
        assert_eq!(remote.events[0].id, "pre");
        assert!(!engine.session().unwrap().dirty);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_unchanged() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = make_engine(transport.clone());

        transport.set_failing(true);
        assert!(engine.login("alice").await.is_err());

        let session = engine.session().unwrap();
        assert_eq!(session.remote_id, None);
        assert!(!session.authenticated);
    }

    #[tokio::test]
    async fn test_logout_clears_session_but_not_data() {
        let transport = MemoryTransport::new();
        let (engine, _dir) = logged_in_engine(&transport, "alice").await;

        engine.save_event(&make_event("e1", "Lunch", "2025-03-01")).unwrap();
        engine.logout().unwrap();

        let session = engine.session().unwrap();
        assert_eq!(session.remote_id, None);
        assert!(!session.authenticated);
        assert_eq!(engine.store().all_events().unwrap().len(), 1);

        // The remote snapshot is also untouched
        assert!(transport.get(&derive_remote_id("alice")).is_some());
    }

    #[tokio::test]
    async fn test_token_export_import() {
        let transport = MemoryTransport::new();
        let (first, _dir) = logged_in_engine(&transport, "alice").await;
        let token = first.export_token().unwrap().unwrap();
        assert_eq!(token, derive_remote_id("alice"));

        let (mut second, _second_dir) = make_engine(transport);
        let adopted = second.import_token(&format!("  {} ", token.to_uppercase())).await.unwrap();
        assert_eq!(adopted, token);

        let session = second.session().unwrap();
        assert_eq!(session.remote_id.as_deref(), Some(token.as_str()));
        assert!(session.force_pull);
        assert!(session.authenticated);
    }

    #[tokio::test]
    async fn test_import_of_unknown_token_fails_fast() {
        let transport = MemoryTransport::new();
        let (mut engine, _dir) = make_engine(transport);

        let result = engine.import_token("nosuchtoken").await;
        assert!(matches!(result, Err(DaymarkError::InvalidToken(_))));
        assert_eq!(engine.session().unwrap().remote_id, None);
    }

    #[tokio::test]
    async fn test_token_import_forces_pull_over_dirty() {
        let transport = MemoryTransport::new();

        // Someone else's snapshot under tokenX
        let (mut first, _first_dir) = logged_in_engine(&transport, "other-device").await;
        first.save_event(&make_event("theirs", "Theirs", "2025-03-05")).unwrap();
        first.push().await.unwrap();
        let token = first.export_token().unwrap().unwrap();

        // This device has pending local writes
        let (mut engine, _dir) = logged_in_engine(&transport, "me").await;
        engine.save_event(&make_event("mine", "Mine", "2025-03-01")).unwrap();
        assert!(engine.session().unwrap().dirty);

        engine.import_token(&token).await.unwrap();

        // The forced pull applies despite dirty and discards local writes
        let outcome = engine.pull().await.unwrap();
        assert_eq!(outcome, PullOutcome::Applied { events: 1, notes: 0 });

        let events = engine.store().all_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "theirs");

        let session = engine.session().unwrap();
        assert!(!session.dirty);
        assert!(!session.force_pull);
    }
}
