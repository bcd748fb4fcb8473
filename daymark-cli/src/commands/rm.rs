use anyhow::Result;
use daymark_core::daymark::Daymark;
use owo_colors::OwoColorize;

use crate::utils::{attempt_push, open_engine};

pub async fn run(daymark: &Daymark, id: &str) -> Result<()> {
    let mut engine = open_engine(daymark)?;

    let existed = engine.delete_event(id)?;

    if existed {
        println!("Removed event {}", id.bold());
    } else {
        println!("{}", format!("No event with id {id} (already gone?)").dimmed());
    }

    attempt_push(&mut engine).await;

    Ok(())
}
