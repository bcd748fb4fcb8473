mod commands;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daymark_core::daymark::Daymark;

#[derive(Parser)]
#[command(name = "daymark")]
#[command(about = "Local-first calendar and journal that syncs across your devices")]
struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this snapshot server instead of the configured one
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a calendar event
    Add {
        title: String,

        /// Event date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Flag the event as important
        #[arg(short, long)]
        important: bool,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },
    /// List events, grouped by day
    List {
        /// Only show events on this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove an event by id
    Rm { id: String },
    /// Show or save the daily note for a date
    Note {
        /// The date (YYYY-MM-DD)
        date: String,

        /// Note content; omit to show the current note
        content: Option<String>,
    },
    /// List dates that have a note
    Dates,
    /// Start a sync session for an identity
    Login { identity: String },
    /// End the sync session on this device
    Logout,
    /// Push local data to the sync server
    Push,
    /// Pull remote data from the sync server
    Pull,
    /// Show session, sync and data status
    Status,
    /// Export or import the sync token
    Token {
        #[command(subcommand)]
        action: commands::token::TokenAction,
    },
    /// Run the background sync loop
    Watch,
    /// Show the resolved configuration
    Config,
    /// Show or set the theme preference
    Theme {
        /// "light" or "dark"; omit to show the current theme
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut daymark = Daymark::load()?;
    if let Some(dir) = cli.data_dir {
        daymark.set_data_dir(dir);
    }
    if let Some(server) = cli.server {
        daymark.set_server_url(server);
    }

    match cli.command {
        Commands::Add {
            title,
            date,
            start,
            end,
            description,
            important,
            color,
            icon,
        } => {
            commands::add::run(
                &daymark,
                title,
                date,
                start,
                end,
                description,
                important,
                color,
                icon,
            )
            .await
        }
        Commands::List { date } => commands::list::run(&daymark, date.as_deref()),
        Commands::Rm { id } => commands::rm::run(&daymark, &id).await,
        Commands::Note { date, content } => commands::note::run(&daymark, &date, content).await,
        Commands::Dates => commands::dates::run(&daymark),
        Commands::Login { identity } => commands::login::run(&daymark, &identity).await,
        Commands::Logout => commands::logout::run(&daymark),
        Commands::Push => commands::push::run(&daymark).await,
        Commands::Pull => commands::pull::run(&daymark).await,
        Commands::Status => commands::status::run(&daymark).await,
        Commands::Token { action } => commands::token::run(&daymark, action).await,
        Commands::Watch => commands::watch::run(&daymark).await,
        Commands::Config => commands::config::run(&daymark),
        Commands::Theme { value } => commands::theme::run(&daymark, value.as_deref()),
    }
}
