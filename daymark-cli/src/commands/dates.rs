use anyhow::Result;
use daymark_core::daymark::Daymark;
use owo_colors::OwoColorize;

use crate::utils::open_engine;

pub fn run(daymark: &Daymark) -> Result<()> {
    let engine = open_engine(daymark)?;

    let dates = engine.store().note_dates()?;

    if dates.is_empty() {
        println!("{}", "No notes yet".dimmed());
        return Ok(());
    }

    for date in dates {
        println!("{date}");
    }

    Ok(())
}
