use anyhow::Result;
use daymark_core::daymark::Daymark;
use daymark_core::sync::PushOutcome;
use owo_colors::OwoColorize;

use crate::utils::{open_engine, require_session};
use crate::utils::tui::create_spinner;

pub async fn run(daymark: &Daymark) -> Result<()> {
    let mut engine = open_engine(daymark)?;
    require_session(&engine)?;

    let spinner = create_spinner("Pushing".to_string());
    let outcome = engine.push().await?;
    spinner.finish_and_clear();

    match outcome {
        PushOutcome::Pushed { events, notes } => {
            println!("Pushed {events} events and {notes} notes");
        }
        PushOutcome::Busy => println!("{}", "A sync is already running".dimmed()),
        PushOutcome::Offline => {
            println!("{}", "Server unreachable - your changes stay queued locally".red())
        }
        PushOutcome::Failed(reason) => println!("{}", reason.red()),
        // require_session already ruled this out
        PushOutcome::NoRemote => {}
    }

    Ok(())
}
