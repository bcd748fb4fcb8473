use anyhow::Result;
use chrono::NaiveDate;
use daymark_core::Event;
use daymark_core::daymark::Daymark;
use owo_colors::OwoColorize;

use crate::utils::open_engine;

pub fn run(daymark: &Daymark, date: Option<&str>) -> Result<()> {
    let engine = open_engine(daymark)?;

    let mut events = match date {
        Some(date) => engine.store().events_on(date)?,
        None => engine.store().all_events()?,
    };

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    events.sort_by(|a, b| {
        (&a.date, &a.start_time, a.created_at).cmp(&(&b.date, &b.start_time, b.created_at))
    });

    // Group events by day and print
    let mut current_date: Option<String> = None;

    for event in &events {
        if current_date.as_deref() != Some(event.date.as_str()) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(&event.date).bold());
            current_date = Some(event.date.clone());
        }

        println!("  {} {}", format_time(event), render_event(event));
    }

    Ok(())
}

fn render_event(event: &Event) -> String {
    let title = if event.is_important {
        format!("{} {}", "!".red(), event.title)
    } else {
        event.title.clone()
    };
    format!("{} {}", title, format!("[{}]", event.id).dimmed())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: &str) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return date.to_string();
    };

    let today = chrono::Local::now().date_naive();
    let diff = (parsed - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => parsed.format("%a %b %-d %Y").to_string(),
    }
}

/// Format the time portion of an event (e.g. "15:00-16:00" or "all-day")
fn format_time(event: &Event) -> String {
    match (&event.start_time, &event.end_time) {
        (Some(start), Some(end)) => format!("{start}-{end}"),
        (Some(start), None) => format!("{start:>7}    "),
        _ => "all-day    ".to_string(),
    }
}
