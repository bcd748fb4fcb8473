use anyhow::Result;
use daymark_core::daymark::Daymark;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::utils::open_engine;

pub fn run(daymark: &Daymark) -> Result<()> {
    let engine = open_engine(daymark)?;

    if !engine.session()?.logged_in() {
        println!("{}", "Not logged in".dimmed());
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt("Log out? Your events and notes stay on this device.")
        .default(false)
        .interact()?;

    if !confirmed {
        return Ok(());
    }

    engine.logout()?;
    println!("Logged out. Log in again with the same identity to resume syncing.");

    Ok(())
}
