use anyhow::Result;
use clap::Subcommand;
use daymark_core::daymark::Daymark;
use owo_colors::OwoColorize;

use crate::utils::{open_engine, require_session};
use crate::utils::tui::create_spinner;

#[derive(Subcommand)]
pub enum TokenAction {
    /// Show the sync token for this session
    Export,
    /// Adopt a sync token copied from another device
    Import { token: String },
}

pub async fn run(daymark: &Daymark, action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Export => export(daymark),
        TokenAction::Import { token } => import(daymark, &token).await,
    }
}

fn export(daymark: &Daymark) -> Result<()> {
    let engine = open_engine(daymark)?;
    let session = require_session(&engine)?;

    if let Some(token) = session.remote_id {
        println!("{token}");
    }

    Ok(())
}

async fn import(daymark: &Daymark, token: &str) -> Result<()> {
    let mut engine = open_engine(daymark)?;

    let spinner = create_spinner("Verifying token".to_string());
    let result = engine.import_token(token).await;
    spinner.finish_and_clear();

    let adopted = result?;
    println!("Token {} imported.", adopted.bold());

    // The import armed a forced pull; run it now rather than waiting for
    // the next timer tick
    let spinner = create_spinner("Pulling".to_string());
    let outcome = engine.pull().await?;
    spinner.finish_and_clear();

    super::pull::render_outcome(&outcome);

    Ok(())
}
