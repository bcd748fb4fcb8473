use anyhow::{Context, Result};
use daymark_core::daymark::Daymark;
use daymark_core::sync::LoginOutcome;
use owo_colors::OwoColorize;

use crate::utils::open_engine;
use crate::utils::tui::create_spinner;

pub async fn run(daymark: &Daymark, identity: &str) -> Result<()> {
    let mut engine = open_engine(daymark)?;

    let spinner = create_spinner("Connecting".to_string());
    let result = engine.login(identity).await;
    spinner.finish_and_clear();

    let outcome = result.context("Could not reach the sync server")?;

    match outcome {
        LoginOutcome::Pulled { events, notes } => {
            println!(
                "Logged in as {}. Pulled {} events and {} notes.",
                identity.bold(),
                events,
                notes
            );
        }
        LoginOutcome::Created => {
            println!(
                "Logged in as {}. Created a new sync space.",
                identity.bold()
            );
        }
    }

    if let Some(token) = engine.export_token()? {
        println!(
            "{}",
            format!("Sync token: {token} (use `daymark token import` on other devices)").dimmed()
        );
    }

    Ok(())
}
