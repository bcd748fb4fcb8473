use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use daymark_core::daymark::Daymark;
use daymark_core::sync::{PullOutcome, PushOutcome};
use owo_colors::OwoColorize;

use crate::utils::{open_engine, require_session};

/// How often the loop checks whether a local write left the dirty flag
/// set. This is the push debounce: rapid successive writes collapse into
/// the next tick's single push.
const PUSH_DEBOUNCE: Duration = Duration::from_secs(2);

/// The background sync worker: one long-lived process per session driving
/// the pull timer and the debounced push, so one-shot commands and other
/// processes don't each need to own the remote connection.
pub async fn run(daymark: &Daymark) -> Result<()> {
    let mut engine = open_engine(daymark)?;
    require_session(&engine)?;

    println!(
        "Watching for changes, pulling every {}s. Ctrl-C to stop.",
        daymark.pull_interval().as_secs()
    );

    let mut pull_tick = tokio::time::interval(daymark.pull_interval());
    let mut push_tick = tokio::time::interval(PUSH_DEBOUNCE);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopped");
                return Ok(());
            }
            _ = pull_tick.tick() => {
                match engine.pull().await? {
                    PullOutcome::Applied { events, notes } => {
                        log(&format!("pulled {events} events, {notes} notes"));
                    }
                    PullOutcome::SkippedDirty => {
                        log(&"pull skipped, local changes pending".dimmed().to_string());
                    }
                    PullOutcome::Failed(reason) => {
                        log(&format!("pull failed: {reason}").red().to_string());
                    }
                    // UpToDate / Missing / Busy are the steady state
                    _ => {}
                }
            }
            _ = push_tick.tick() => {
                if engine.session()?.dirty {
                    match engine.push().await? {
                        PushOutcome::Pushed { events, notes } => {
                            log(&format!("pushed {events} events, {notes} notes"));
                        }
                        PushOutcome::Failed(reason) => {
                            log(&format!("push failed: {reason}").red().to_string());
                        }
                        PushOutcome::Offline => {
                            log(&"push skipped, server unreachable".dimmed().to_string());
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

fn log(message: &str) {
    println!("{} {message}", Local::now().format("%H:%M:%S").dimmed());
}
