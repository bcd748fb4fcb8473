use anyhow::Result;
use daymark_core::daymark::Daymark;
use daymark_core::sync::Theme;

use crate::utils::open_engine;

pub fn run(daymark: &Daymark, value: Option<&str>) -> Result<()> {
    let engine = open_engine(daymark)?;

    match value {
        None => {
            println!("{}", engine.store().theme()?.as_str());
        }
        Some(value) => {
            let theme = match value {
                "light" => Theme::Light,
                "dark" => Theme::Dark,
                other => anyhow::bail!("Unknown theme '{other}'. Use \"light\" or \"dark\"."),
            };
            engine.store().set_theme(theme)?;
            println!("Theme set to {}", theme.as_str());
        }
    }

    Ok(())
}
