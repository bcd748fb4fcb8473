pub mod tui;

use anyhow::Result;
use daymark_core::daymark::Daymark;
use daymark_core::remote::SnapshotClient;
use daymark_core::store::Store;
use daymark_core::sync::{PushOutcome, Session, SyncEngine};
use owo_colors::OwoColorize;

use tui::create_spinner;

/// Open the sync engine over the local database.
///
/// When the on-disk database cannot be opened the CLI keeps working
/// against an in-memory store so reads and writes still succeed for this
/// run; nothing persists and the user is told so.
pub fn open_engine(daymark: &Daymark) -> Result<SyncEngine<SnapshotClient>> {
    let store = match daymark.open_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "{}",
                format!("Warning: could not open the local database ({e}). Changes made now will not be saved.")
                    .yellow()
            );
            Store::open_in_memory()?
        }
    };

    Ok(SyncEngine::new(store, daymark.client(), daymark.notifier()))
}

/// Bail unless a sync session exists.
pub fn require_session(engine: &SyncEngine<SnapshotClient>) -> Result<Session> {
    let session = engine.session()?;

    if !session.logged_in() {
        anyhow::bail!(
            "Not logged in.\n\n\
            Start a session with:\n  \
            daymark login <identity>\n\n\
            Or adopt a sync token from another device:\n  \
            daymark token import <token>"
        );
    }

    Ok(session)
}

/// One quiet push attempt after a local write.
///
/// Logged-out and busy runs say nothing; everything here is background
/// noise compared to the local write that already succeeded.
pub async fn attempt_push(engine: &mut SyncEngine<SnapshotClient>) {
    let logged_in = match engine.session() {
        Ok(session) => session.logged_in(),
        Err(_) => false,
    };
    if !logged_in {
        return;
    }

    let spinner = create_spinner("Syncing".to_string());
    let outcome = engine.push().await;
    spinner.finish_and_clear();

    match outcome {
        Ok(PushOutcome::Pushed { .. }) => println!("{}", "Synced".dimmed()),
        Ok(PushOutcome::Offline) => {
            println!("{}", "Offline - will sync on the next push".dimmed())
        }
        Ok(PushOutcome::Failed(reason)) => {
            println!("{}", format!("Sync failed: {reason}").red())
        }
        Ok(_) => {}
        Err(e) => println!("{}", e.to_string().red()),
    }
}
