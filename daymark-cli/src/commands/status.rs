use anyhow::Result;
use chrono::{Local, TimeZone};
use daymark_core::daymark::Daymark;
use daymark_core::remote::SnapshotTransport;
use owo_colors::OwoColorize;

use crate::utils::open_engine;
use crate::utils::tui::create_spinner;

pub async fn run(daymark: &Daymark) -> Result<()> {
    let engine = open_engine(daymark)?;
    let session = engine.session()?;

    match &session.remote_id {
        Some(token) => {
            println!("Session:   logged in");
            println!("Token:     {token}");
            println!("Last sync: {}", format_last_sync(session.last_sync_timestamp));
            if session.dirty {
                println!("Pending:   {}", "local changes waiting to push".yellow());
            } else {
                println!("Pending:   none");
            }
        }
        None => println!("Session:   {}", "not logged in".dimmed()),
    }

    let events = engine.store().all_events()?.len();
    let notes = engine.store().note_dates()?.len();
    println!("Events:    {events}");
    println!("Notes:     {notes}");

    let client = daymark.client();
    let spinner = create_spinner("Checking server".to_string());
    let online = client.is_online().await;
    spinner.finish_and_clear();

    if online {
        println!("Server:    {} ({})", client.base_url(), "reachable".green());
    } else {
        println!("Server:    {} ({})", client.base_url(), "unreachable".red());
    }

    Ok(())
}

fn format_last_sync(timestamp: i64) -> String {
    if timestamp == 0 {
        return "never".to_string();
    }
    match Local.timestamp_millis_opt(timestamp).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}
