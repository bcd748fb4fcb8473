use anyhow::Result;
use daymark_core::daymark::Daymark;
use owo_colors::OwoColorize;

use crate::utils::{attempt_push, open_engine};

pub async fn run(daymark: &Daymark, date: &str, content: Option<String>) -> Result<()> {
    let mut engine = open_engine(daymark)?;

    match content {
        Some(content) => {
            engine.save_daily_note(date, &content)?;
            if content.trim().is_empty() {
                println!("Cleared note for {}", date.bold());
            } else {
                println!("Saved note for {}", date.bold());
            }
            attempt_push(&mut engine).await;
        }
        None => {
            let content = engine.store().daily_note(date)?;
            if content.trim().is_empty() {
                println!("{}", format!("No note for {date}").dimmed());
            } else {
                println!("{}", content);
            }
        }
    }

    Ok(())
}
