use anyhow::Result;
use daymark_core::Event;
use daymark_core::daymark::Daymark;
use owo_colors::OwoColorize;

use crate::utils::{attempt_push, open_engine};

#[allow(clippy::too_many_arguments)]
pub async fn run(
    daymark: &Daymark,
    title: String,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
    important: bool,
    color: Option<String>,
    icon: Option<String>,
) -> Result<()> {
    let mut engine = open_engine(daymark)?;

    let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    let mut event = Event::new(title, date);
    event.start_time = start;
    event.end_time = end;
    event.description = description;
    event.is_important = important;
    event.color = color;
    event.icon = icon;

    let stored = engine.save_event(&event)?;

    println!("Added {} on {}", stored.title.bold(), stored.date);
    println!("  {}", format!("id: {}", stored.id).dimmed());

    attempt_push(&mut engine).await;

    Ok(())
}
