use anyhow::Result;
use daymark_core::daymark::Daymark;
use daymark_core::sync::PullOutcome;
use owo_colors::OwoColorize;

use crate::utils::{open_engine, require_session};
use crate::utils::tui::create_spinner;

pub async fn run(daymark: &Daymark) -> Result<()> {
    let mut engine = open_engine(daymark)?;
    require_session(&engine)?;

    let spinner = create_spinner("Pulling".to_string());
    let outcome = engine.pull().await?;
    spinner.finish_and_clear();

    render_outcome(&outcome);

    Ok(())
}

pub fn render_outcome(outcome: &PullOutcome) {
    match outcome {
        PullOutcome::Applied { events, notes } => {
            println!("Pulled {events} events and {notes} notes");
        }
        PullOutcome::UpToDate => println!("Already in sync"),
        PullOutcome::SkippedDirty => {
            println!(
                "{}",
                "Local changes pending - local edits win until pushed".dimmed()
            );
        }
        PullOutcome::Missing => {
            println!("{}", "No remote snapshot yet - push to create one".dimmed())
        }
        PullOutcome::Busy => println!("{}", "A sync is already running".dimmed()),
        PullOutcome::Failed(reason) => println!("{}", reason.red()),
        PullOutcome::NoRemote => {}
    }
}
