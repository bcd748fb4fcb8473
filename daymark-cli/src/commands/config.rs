use anyhow::Result;
use daymark_core::daymark::Daymark;
use daymark_core::daymark_config::DaymarkConfig;

pub fn run(daymark: &Daymark) -> Result<()> {
    let config = daymark.config();

    println!("config file:          {}", DaymarkConfig::config_path()?.display());
    println!("data dir:             {}", daymark.data_path().display());
    println!("database:             {}", daymark.db_path().display());
    println!("server url:           {}", config.server_url);
    println!("pull interval:        {}s", config.pull_interval_secs);
    println!("request timeout:      {}s", config.request_timeout_secs);

    Ok(())
}
